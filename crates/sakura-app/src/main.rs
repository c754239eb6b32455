use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use sakura_config::{Config, ProviderKind};
use sakura_config::llm::LlmConfig;
use tracing_subscriber::EnvFilter;

mod context;
mod controller;
mod events;
mod io;
mod ui;


use self::context::AppContext;
use self::controller::AppController;

/// Japanese conversation tutor in the terminal
#[derive(Parser)]
#[command(name = "sakura", version, about)]
struct Cli {
    /// Chat provider: groq, gemini or proxy
    #[arg(short, long, env = "SAKURA_PROVIDER")]
    provider: Option<ProviderKind>,

    /// Model identifier
    #[arg(short, long, env = "SAKURA_MODEL")]
    model: Option<String>,

    /// Disable speech synthesis and recognition
    #[arg(long)]
    no_speech: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(verbose: u8, json: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout belongs to the chat transcript
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::new();
    if let Some(provider) = cli.provider {
        config.llm = LlmConfig::for_provider(provider);
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if cli.no_speech {
        config.speech.enabled = false;
    }

    let context = Arc::new(AppContext::new(config).await?);
    let controller = AppController::new(context);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task exited with error: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.abort_all();
    Ok(())
}
