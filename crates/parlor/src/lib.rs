//! # Parlor
//!
//! A multiplayer game lobby orchestrator. Clients log in, browse the game
//! catalog, form rooms, and start dedicated game-session workers that run
//! the actual gameplay protocol on a fresh port.
//!
//! The crate ties the layers together: transport → protocol → session /
//! catalog / rooms → worker supervision. Run it through [`LobbyServer`]:
//!
//! ```rust,no_run
//! use parlor::{LobbyConfig, LobbyServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), parlor::LobbyError> {
//!     let server = LobbyServer::builder()
//!         .config(LobbyConfig::default())
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::LobbyConfig;
pub use error::LobbyError;
pub use handler::dispatch;
pub use server::{LobbyServer, LobbyServerBuilder, LobbyState};
