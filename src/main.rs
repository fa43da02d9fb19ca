//! 翻译代理主程序入口

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use polyglot_proxy::env::{generate_env_docs, logging, EnvVar};
use polyglot_proxy::translation::ProviderConfig;
use polyglot_proxy::web::{WebConfig, WebServer};

/// Reverse proxy that translates outbound HTML pages on the fly
#[derive(Parser, Debug)]
#[command(name = "polyglot-proxy")]
#[command(version)]
#[command(about, long_about = None)]
struct Args {
    /// Bind address (overrides PROXY_BIND_ADDRESS)
    #[arg(short, long)]
    bind: Option<String>,

    /// Port number (overrides PROXY_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Upstream origin to proxy and translate (overrides PROXY_UPSTREAM_URL)
    #[arg(short, long)]
    upstream: Option<String>,

    /// Static files directory used when no upstream is set (overrides PROXY_STATIC_DIR)
    #[arg(long)]
    static_dir: Option<String>,

    /// Logging level: trace, debug, info, warn, error (overrides PROXY_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the supported environment variables and exit
    #[arg(long)]
    env_docs: bool,
}

/// 加载 .env 文件，返回实际加载的文件名
fn load_dotenv() -> Option<&'static str> {
    let env_files = [".env.local", ".env"];

    env_files
        .into_iter()
        .find(|env_file| Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok())
}

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.env_docs {
        print!("{}", generate_env_docs());
        return Ok(());
    }

    let env_file = load_dotenv();

    let log_level = match args.log_level {
        Some(level) => logging::LogLevel::parse(&level)?,
        None => logging::LogLevel::get()?,
    };
    init_tracing(&log_level);

    if let Some(env_file) = env_file {
        tracing::info!("已加载环境变量文件: {}", env_file);
    }

    let mut web_config = WebConfig::from_env()?;
    if let Some(bind) = args.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        web_config.port = port;
    }
    if let Some(upstream) = args.upstream {
        web_config.upstream_url =
            polyglot_proxy::env::web::UpstreamUrl::parse(&upstream)?;
    }
    if let Some(static_dir) = args.static_dir {
        web_config.static_dir = static_dir;
    }
    web_config.validate()?;

    let provider_config = ProviderConfig::from_env()?;

    let server = WebServer::new(web_config, provider_config);
    server.start().await?;

    Ok(())
}
