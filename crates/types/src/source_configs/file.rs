//! File source configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a source reading a JSON array from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSourceConfig {
    pub path: PathBuf,
}
