//! Persisted records for the accounts+catalog document and play history.

use std::collections::BTreeMap;
use std::path::PathBuf;

use parlor_protocol::Rating;
use serde::{Deserialize, Serialize};

/// One registered account. Accounts are created on registration and never
/// deleted; logout and expiry only flip the presence fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub credential: String,
    #[serde(default)]
    pub role: AccountRole,
    pub online: bool,
    /// Unix seconds of the last request or heartbeat; 0 when logged out.
    pub last_seen: u64,
}

/// Developers appear here as catalog owners; registration through the lobby
/// always creates players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    #[default]
    Player,
    Developer,
}

fn default_active() -> bool {
    true
}

fn default_max_players() -> usize {
    2
}

/// One uploadable game, keyed in the catalog by `"{owner}_{name}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub description: String,
    /// `false` marks a delisted entry: hidden from listings, kept for its
    /// rating history.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Room capacity for this game.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
    /// Version label → artifact archive path (absolute, or relative to the
    /// data directory). BTreeMap keeps labels sorted, so the last key is the
    /// latest version.
    pub versions: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

impl CatalogEntry {
    /// The lexicographically greatest version label, if any version exists.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions.keys().next_back().map(String::as_str)
    }

    /// Mean score across all ratings; `None` when unrated.
    pub fn avg_score(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: u32 = self.ratings.iter().map(|r| u32::from(r.score)).sum();
        Some(f64::from(sum) / self.ratings.len() as f64)
    }
}

/// The accounts + catalog document (`registry.json`). One document, one
/// lock: presence updates and rating writes serialize against each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDoc {
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
    #[serde(default)]
    pub games: BTreeMap<String, CatalogEntry>,
}

/// One "this player has touched this game" fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub player: String,
    pub game_key: String,
}

/// The play-history document (`history.json`). Append-only; duplicates are
/// harmless, so nothing deduplicates on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryDoc {
    #[serde(default)]
    pub records: Vec<PlayRecord>,
}

impl HistoryDoc {
    /// Returns `true` if `player` has at least one record for `game_key`.
    pub fn has_played(&self, player: &str, game_key: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.player == player && r.game_key == game_key)
    }
}
