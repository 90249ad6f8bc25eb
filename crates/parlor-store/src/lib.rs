//! Persistence layer for the parlor lobby.
//!
//! Each logical table is one JSON document, loaded fully into memory and
//! rewritten whole on every mutation. Writes are atomic replacements
//! (temp file + rename), so concurrent connection tasks can never leave a
//! half-written document behind — this is a correctness requirement, not a
//! style choice, once many handler tasks run in parallel.
//!
//! # Key types
//!
//! - [`JsonDocument`] — one in-memory table mirrored to one file
//! - [`RegistryDoc`] — accounts + game catalog (one document, one lock)
//! - [`HistoryDoc`] — append-only play-history facts
//! - [`Catalog`] — the catalog & rating service consumed by the orchestrator
//! - [`LobbyPaths`] — the on-disk layout under the data directory

mod catalog;
mod doc;
mod error;
mod model;
mod paths;

pub use catalog::{Catalog, ResolvedArtifact};
pub use doc::{JsonDocument, SharedDoc};
pub use error::{CatalogError, StoreError};
pub use model::{Account, AccountRole, CatalogEntry, HistoryDoc, PlayRecord, RegistryDoc};
pub use paths::LobbyPaths;
