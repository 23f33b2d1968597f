use anyhow::Result;
use clap::Parser;
use flamewatch::config::AppConfig;
use flamewatch::{build_poller, default_registry, run_once};
use flamewatch_types::{HttpSourceConfig, SourceConfig};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// flamewatch - Polling dashboard for flame and gas sensor readings
#[derive(Parser, Debug, Clone)]
#[command(name = "flamewatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Poll this HTTP endpoint (overrides the configured source)
    #[arg(short = 'e', long = "endpoint", value_name = "URL")]
    endpoint: Option<String>,

    /// Seconds between polls
    #[arg(short = 'i', long = "interval", value_name = "SECS")]
    interval: Option<u64>,

    /// Run a single poll cycle and exit
    #[arg(long = "once")]
    once: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long = "save-config")]
    save_config: bool,

    /// List available sources and displayers
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting flamewatch v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = AppConfig::load_from_path(path)?;
            info!("Loaded config from: {}", path.display());
            config
        }
        None => AppConfig::load()?,
    };

    if let Some(endpoint) = &cli.endpoint {
        let timeout_ms = match &config.source {
            SourceConfig::Http(http) => http.timeout_ms,
            _ => HttpSourceConfig::default().timeout_ms,
        };
        config.source = SourceConfig::Http(HttpSourceConfig {
            endpoint: endpoint.clone(),
            timeout_ms,
        });
    }
    if let Some(secs) = cli.interval {
        config.poll_interval_ms = secs.saturating_mul(1000);
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let registry = default_registry();

    if cli.list {
        println!("Sources:    {}", registry.list_sources().join(", "));
        println!("Displayers: {}", registry.list_displayers().join(", "));
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.save_config {
        config.validate()?;
        let path = match &cli.config {
            Some(path) => {
                config.save_to_path(path)?;
                path.clone()
            }
            None => config.save()?,
        };
        println!("Saved configuration to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    // Fetches are cooperative tasks on a single thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut poller = build_poller(&config, &registry)?;

        if cli.once {
            let code = if run_once(&mut poller).await? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
            return Ok::<_, anyhow::Error>(code);
        }

        tokio::select! {
            result = poller.run() => result?,
            _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
        }
        Ok(ExitCode::SUCCESS)
    })
}
