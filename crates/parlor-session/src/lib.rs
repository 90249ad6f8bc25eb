//! Session registry for the parlor lobby.
//!
//! Tracks which accounts are online. The protocol is connectionless per
//! request — a dropped TCP connection says nothing — so liveness is entirely
//! heartbeat-driven: every authenticated request refreshes `last_seen`, and a
//! background sweep forces accounts offline after two missed heartbeats.
//!
//! # Lifecycle
//!
//! ```text
//! register ──→ [online] ──logout──→ [offline]
//!                 ↑  │
//!        login ───┘  └──(sweep: last_seen too old)──→ [offline]
//! ```

mod error;
mod registry;

pub use error::SessionError;
pub use registry::{SessionConfig, SessionRegistry, unix_now};
