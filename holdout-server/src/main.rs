use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use holdout_game::{FileStore, MemoryStore, SceneCatalog, SessionStore};
use holdout_server::{AppState, SessionService, serve};

#[derive(Debug, Parser)]
#[command(name = "holdout-server", version)]
#[command(about = "Pandemic survival session backend - create, advance, and retire survivors")]
struct Args {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    bind: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 4000)]
    port: u16,

    /// Directory for persisted session records; in-memory when omitted
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Root seed for deterministic turn streams; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Per-name lock acquisition bound, in milliseconds
    #[arg(long, default_value_t = 5_000)]
    lock_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store: Arc<dyn SessionStore> = match &args.data_dir {
        Some(dir) => {
            log::info!("persisting sessions under {}", dir.display());
            Arc::new(FileStore::open(dir)?)
        }
        None => {
            log::info!("using in-memory session storage");
            Arc::new(MemoryStore::new())
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("turn streams derive from root seed {seed}");

    let service = SessionService::new(store, SceneCatalog::default_catalog().clone(), seed)
        .with_lock_timeout(Duration::from_millis(args.lock_timeout_ms));
    let state = AppState {
        service: Arc::new(service),
    };

    let addr = SocketAddr::new(args.bind, args.port);
    serve(addr, state).await?;
    Ok(())
}
