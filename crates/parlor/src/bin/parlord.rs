//! The lobby daemon.
//!
//! Configuration comes from the environment: `PARLOR_ADDR`,
//! `PARLOR_DATA_DIR`, `PARLOR_WORKER_ENTRYPOINT`, `PARLOR_WORKER_RUNNER`,
//! and `RUST_LOG` for log filtering.

use parlor::{LobbyConfig, LobbyServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = LobbyConfig::from_env();
    tracing::info!(
        addr = %config.bind_addr,
        data_dir = %config.data_dir.display(),
        "starting parlor lobby"
    );

    let server = match LobbyServer::builder().config(config).build().await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "lobby failed to start");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "lobby terminated");
        std::process::exit(1);
    }
}
