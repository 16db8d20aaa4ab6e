use analyzer::RankingConfig;
use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Base URL of the post backend (e.g. http://backend). Posts are kept in memory when omitted
    #[arg(long)]
    backend: Option<String>,
    /// Per-request timeout for backend calls, in seconds
    #[arg(long, default_value_t = 10)]
    backend_timeout_secs: u64,
    /// Deadline for fetching the post set during a recompute, in milliseconds (0 = none)
    #[arg(long, default_value_t = 5_000)]
    fetch_timeout_ms: u64,
    /// Extra delay applied to writes after the ranking is refreshed, in milliseconds
    #[arg(long, default_value_t = 0)]
    write_delay_ms: u64,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let ranking = RankingConfig {
        fetch_timeout: (args.fetch_timeout_ms > 0).then(|| Duration::from_millis(args.fetch_timeout_ms)),
        write_delay: Duration::from_millis(args.write_delay_ms),
    };
    let config = ServerConfig {
        backend: args.backend,
        backend_timeout: Duration::from_secs(args.backend_timeout_secs),
        ranking,
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
