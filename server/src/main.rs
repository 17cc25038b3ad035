use anyhow::Result;
use axum::Router;
use clap::Parser;
use lse_server::{build_app, load_index};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// File listing the documents to index
    #[arg(long)]
    docs: PathBuf,
    /// File listing noise words; the built-in English list is used when omitted
    #[arg(long)]
    noise: Option<PathBuf>,
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
    let index = Arc::new(load_index(&args.docs, args.noise.as_deref())?);
    tracing::info!(documents = index.documents().len(), keywords = index.len(), "index ready");
    let app: Router = build_app(index);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
