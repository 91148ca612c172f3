//! comoderator - meeting chat co-moderator.
//!
//! Main entry point for the comoderator CLI.

mod cli;
mod setup;

use std::path::Path;

use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use comoderator_config::ConfigValidator;
use comoderator_protocols::{EngineEvent, EngineState, SelectorCatalog};

use cli::{Cli, Commands, OutputFormat};
use setup::{build_engine, comoderator_dir, load_config};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.comoderator/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = comoderator_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("comoderator")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Console logs go to stderr; stdout carries the event stream.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Join {
            meeting_link,
            session_id,
        } => {
            let session_id = session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            run_join(&cli.config, &meeting_link, &session_id).await
        }
        Commands::Selectors { format } => print_selectors(&cli.config, format),
        Commands::CheckConfig => check_config(&cli.config),
    }
}

/// Join a meeting and stream events as JSON lines until Ctrl-C.
async fn run_join(
    config_path: &Path,
    meeting_link: &str,
    session_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    for warning in ConfigValidator::validate(&config)?.into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }
    let engine = build_engine(&config);
    let mut events = engine.subscribe();

    info!("Starting comoderator v{}", env!("CARGO_PKG_VERSION"));

    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    match serde_json::to_string(&event) {
                        Ok(line) => println!("{}", line),
                        Err(e) => warn!("Failed to serialize {} event: {}", event.kind(), e),
                    }
                    if matches!(
                        event,
                        EngineEvent::StateChanged {
                            state: EngineState::Failed
                        }
                    ) {
                        return;
                    }
                }
                Err(RecvError::Lagged(n)) => warn!("Event stream lagged, {} events dropped", n),
                Err(RecvError::Closed) => return,
            }
        }
    });

    if let Err(e) = engine.join(meeting_link, session_id).await {
        error!("Failed to join {}: {}", meeting_link, e);
        let _ = engine.leave().await;
        printer.abort();
        return Err(e.into());
    }

    info!("Monitoring chat; press Ctrl-C to leave");

    let failed = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for Ctrl-C: {}", e);
            }
            info!("Leaving meeting");
            false
        }
        _ = printer => true,
    };

    engine.leave().await?;

    if failed {
        return Err("session failed; browser connection lost".into());
    }
    Ok(())
}

fn print_selectors(
    config_path: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    println!("{}", render_selectors(&config.selectors, format)?);
    Ok(())
}

fn render_selectors(
    selectors: &SelectorCatalog,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Toml => toml::to_string_pretty(selectors)?,
        OutputFormat::Json => serde_json::to_string_pretty(selectors)?,
    })
}

fn check_config(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let result = ConfigValidator::validate(&config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("Configuration OK ({} warnings)", result.warnings.len());
        Ok(())
    } else {
        Err(format!("{} configuration errors", result.errors.len()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_selectors_json() {
        let rendered = render_selectors(&SelectorCatalog::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value["chat_input"].is_array());
    }

    #[test]
    fn test_render_selectors_toml_round_trip() {
        let rendered = render_selectors(&SelectorCatalog::default(), OutputFormat::Toml).unwrap();
        let parsed: SelectorCatalog = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, SelectorCatalog::default());
    }
}
