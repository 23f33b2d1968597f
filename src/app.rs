//! Wiring: turn an [`AppConfig`] into a running poller

use anyhow::{Context, Result};
use flamewatch_core::{Pipeline, Registry, RenderSinkAdapter};
use log::{info, warn};

use crate::config::AppConfig;
use crate::core::{CycleOutcome, Poller};

/// Registry with every built-in source and displayer
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    flamewatch_sources::register_all(&mut registry);
    flamewatch_displayers::register_all(&mut registry);
    registry
}

/// Build and initialize everything the poll loop needs
///
/// Fails on any configuration problem, including displayers that cannot
/// initialize; none of these are retried.
pub fn build_poller(config: &AppConfig, registry: &Registry) -> Result<Poller> {
    config.validate()?;

    let pipeline = Pipeline::new(&config.pipeline)?;

    let source = registry
        .create_source(&config.source)
        .context("creating data source")?;
    if !source.is_available() {
        warn!("Source '{}' is not available yet", source.metadata().id);
    }
    info!(
        "Polling {} source ({}) every {:?}",
        source.metadata().name,
        source.metadata().description,
        config.poll_interval()
    );

    let displayers = config
        .sinks
        .iter()
        .map(|sink| registry.create_displayer(sink))
        .collect::<Result<Vec<_>>>()?;
    let mut sinks = RenderSinkAdapter::new(displayers);
    sinks.initialize().context("initializing displayers")?;
    info!("Displaying to: {}", sinks.displayer_ids().join(", "));

    Ok(Poller::new(
        source,
        pipeline,
        sinks,
        config.poll_interval(),
        config.overlap_policy,
    ))
}

/// Run exactly one poll cycle
///
/// Returns whether that cycle's frame reached the displayers. A displayer
/// failure is an error.
pub async fn run_once(poller: &mut Poller) -> Result<bool> {
    let outcome = poller.poll_once().await?;
    Ok(matches!(outcome, CycleOutcome::Applied(_)))
}
