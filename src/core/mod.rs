//! Application core: the poll loop

mod poller;

pub use poller::{CycleOutcome, Poller};
