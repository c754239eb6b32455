use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sakura_config::{Config, ProviderKind};
use sakura_config::llm::LlmConfig;
use sakura_lang_japanese::JapaneseTutor;
use sakura_provider::{ChatTransport, OpenAiTransport};
use sakura_proxy::ProxyState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// HTTP proxy that holds the upstream chat API credential
#[derive(Parser)]
#[command(name = "sakura-proxy", version, about)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "SAKURA_PROXY_BIND")]
    bind: Option<String>,

    /// Model used when a request names none
    #[arg(short, long, env = "SAKURA_MODEL")]
    model: Option<String>,

    /// OpenAI-compatible upstream base URL
    #[arg(long, env = "SAKURA_PROXY_UPSTREAM")]
    upstream: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(verbose: u8, json: bool) {
    let default_level = match verbose {
        0 => "info,tower_http=debug",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stdout)).init();
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
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new();
    let mut proxy = config.proxy;
    if let Some(bind) = cli.bind {
        proxy.bind_addr = bind;
    }
    if let Some(model) = cli.model {
        proxy.default_model = model;
    }
    if let Some(upstream) = cli.upstream {
        proxy.upstream_url = upstream;
    }

    let upstream: Option<Arc<dyn ChatTransport>> =
        match LlmConfig::for_provider(ProviderKind::Groq).api_key() {
            Ok(Some(key)) => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.timeout_seconds))
                    .build()?;
                let transport: Arc<dyn ChatTransport> = Arc::new(OpenAiTransport::with_client(
                    client,
                    key,
                    proxy.upstream_url.clone(),
                ));
                Some(transport)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        };

    let state = Arc::new(ProxyState {
        upstream,
        default_model: proxy.default_model,
        prompts: JapaneseTutor::prompts(),
    });

    let listener = TcpListener::bind(&proxy.bind_addr).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
        }
        tracing::info!("Shutdown requested");
    };

    sakura_proxy::serve(listener, state, shutdown).await?;
    Ok(())
}
