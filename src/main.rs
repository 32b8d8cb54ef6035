// SafeSpace - empathic conversational support
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;

use safespace::cli::{reply_text, ChatRepl};
use safespace::config::{default_config_path, load_config, write_default_config, Settings};
use safespace::errors::UserFriendlyError;
use safespace::metrics::PipelineMetrics;
use safespace::pipeline::ResponseOrchestrator;
use safespace::resources;
use safespace::server::AppServer;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "safespace")]
#[command(about = "A safe, confidential space to talk about how you feel", version)]
struct Args {
    /// Run mode (defaults to chat)
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: ~/.safespace/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Interactive chat
    Chat,
    /// Send a single message and print the reply (reads stdin if no text)
    Query {
        text: Vec<String>,

        /// Print the structured result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides server.bind_address)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print crisis lines and support resources
    Resources,
    /// Print self-care tips
    Tips,
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Chat);

    // Keep the chat transcript readable unless asked otherwise
    let default_level = match command {
        Command::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    match command {
        Command::InitConfig { force } => {
            let path = match args.config {
                Some(path) => path,
                None => default_config_path()?,
            };
            write_default_config(&path, force)?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
        Command::Resources => {
            let settings = load_config(args.config.as_deref())?;
            println!("{}", resources::resources_text(settings.crisis.region));
            Ok(())
        }
        Command::Tips => {
            println!("{}", resources::self_care_text());
            Ok(())
        }
        Command::Chat => {
            let settings = load_config(args.config.as_deref())?;
            let orchestrator = build_orchestrator(&settings)?;
            ChatRepl::new(Arc::new(orchestrator)).run().await
        }
        Command::Query { text, json } => {
            let settings = load_config(args.config.as_deref())?;
            run_query(&settings, text, json).await
        }
        Command::Serve { bind } => {
            let mut settings = load_config(args.config.as_deref())?;
            if let Some(bind) = bind {
                settings.server.bind_address = bind;
            }
            run_server(settings).await
        }
    }
}

fn build_orchestrator(settings: &Settings) -> Result<ResponseOrchestrator> {
    let orchestrator = ResponseOrchestrator::from_settings(settings)?;
    if !orchestrator.is_ai_enabled() {
        tracing::info!("No generation credential configured, running in rule-based mode");
    }
    Ok(orchestrator)
}

async fn run_query(settings: &Settings, text: Vec<String>, json: bool) -> Result<()> {
    let message = if text.is_empty() {
        if io::stdin().is_terminal() {
            anyhow::bail!("No message given. Usage: safespace query <text>");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read message from stdin")?;
        buffer
    } else {
        text.join(" ")
    };

    let orchestrator = build_orchestrator(settings)?;
    let result = orchestrator.process(message.trim(), &[]).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", reply_text(&result));
    }
    Ok(())
}

async fn run_server(settings: Settings) -> Result<()> {
    let metrics = Arc::new(PipelineMetrics::new()?);
    let orchestrator = build_orchestrator(&settings)?.with_metrics(Arc::clone(&metrics));

    AppServer::new(Arc::new(orchestrator), metrics, settings.server)
        .serve()
        .await
        .user_context_with_suggestion(
            "Could not start the SafeSpace server",
            "Check that the bind address is free, or pass --bind 127.0.0.1:<port>",
        )
}

/// Initialize tracing to stderr
///
/// `RUST_LOG` wins; otherwise `SAFESPACE_DEBUG=1` selects debug and
/// `default_level` applies.
fn init_tracing(default_level: &str) {
    let show_debug = std::env::var("SAFESPACE_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if show_debug { "debug" } else { default_level })
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}
