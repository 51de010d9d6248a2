/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Interactive console or one-shot command against the interceptor service
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;
mod tui;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use interceptor_adapter::ResourceApi;
use interceptor_console::{Console, ConsoleConfig};

use crate::cli::Command;
use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "interceptor-console", version, about = "Operator console for the interceptor service")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    /// Overrides `api_url` from the configuration file
    #[arg(long = "api-url", value_name = "URL", env = "INTERCEPTOR_API_URL")]
    api_url: Option<String>,
    /// Overrides `log_level` from the configuration file
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

/// Where formatted log lines go
enum LogSink {
    Stderr,
    Buffer(LogBufferHandle),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = ConsoleConfig::load(args.config_path.as_deref())?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }

    let command = args.command.unwrap_or(Command::Tui);
    let is_tui = matches!(command, Command::Tui);
    let log_buffer: LogBufferHandle = Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
    let sink = if is_tui {
        LogSink::Buffer(log_buffer.clone())
    } else {
        LogSink::Stderr
    };
    let _file_guard = init_tracing(&config.log_level, sink, config.log_file.as_deref())?;

    info!(api_url = %config.api_url, "starting interceptor-console");
    let api: Arc<dyn ResourceApi> = Arc::new(config.build_client()?);

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    if is_tui {
        let (console, console_events) = Console::new(api);
        tui::run_tui_with_log(console, console_events, log_buffer, shutdown)
            .await
            .context("run tui")?;
    } else {
        cli::run_command(command, api, shutdown).await?;
    }
    Ok(())
}

fn init_tracing(
    log_level: &str,
    sink: LogSink,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let console_layer = match sink {
        LogSink::Stderr => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
        LogSink::Buffer(buffer) => tracing_subscriber::fmt::layer()
            .with_writer(LogWriterFactory::new(buffer))
            .with_ansi(false)
            .with_target(false)
            .boxed(),
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .context("log_file must name a file")?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
