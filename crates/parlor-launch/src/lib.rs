//! Worker supervision for the parlor lobby.
//!
//! Turns a validated `start_room` into a running, isolated game process and
//! guarantees eventual cleanup:
//!
//! 1. unpack the game artifact into its per-version runtime directory
//!    (once — later launches reuse it)
//! 2. reserve an OS-ephemeral port, then release it for the worker to claim
//! 3. spawn the worker with `--port` and `--room-id` as its only parameters
//! 4. watch the process from a dedicated task and report the room id on a
//!    channel when it exits, however it exits
//!
//! The supervisor never retries a failed launch and never distinguishes a
//! crash from a normal finish — its job is resource reclamation, not
//! game-outcome auditing.

mod artifact;
mod error;
mod port;
mod supervisor;

pub use artifact::ensure_unpacked;
pub use error::LaunchError;
pub use port::reserve_port;
pub use supervisor::{LaunchConfig, Supervisor, WorkerExits};
