//! Catalog & rating service.
//!
//! Thin read/append layer over the registry document. Ratings are gated on
//! play history: a player must have joined (or created) a room for a game at
//! least once before rating it. Lock order is registry → history, matching
//! the rest of the orchestrator.

use std::path::PathBuf;

use parlor_protocol::{GameDetail, GameSummary, Rating};

use crate::{CatalogError, HistoryDoc, LobbyPaths, RegistryDoc, SharedDoc};

/// How many rating comments `game_detail` previews.
const COMMENT_PREVIEW: usize = 5;

/// A `(game_key, version)` pair resolved down to its archive on disk.
///
/// Produced for the room table at create/start time; carrying `max_players`
/// along saves the caller a second catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArtifact {
    pub game_key: String,
    pub version: String,
    pub archive: PathBuf,
    pub max_players: usize,
}

/// The catalog service handle. Cheap to clone; all clones share the same
/// documents.
#[derive(Clone)]
pub struct Catalog {
    registry: SharedDoc<RegistryDoc>,
    history: SharedDoc<HistoryDoc>,
    paths: LobbyPaths,
}

impl Catalog {
    pub fn new(
        registry: SharedDoc<RegistryDoc>,
        history: SharedDoc<HistoryDoc>,
        paths: LobbyPaths,
    ) -> Self {
        Self {
            registry,
            history,
            paths,
        }
    }

    /// Lists every active game with its rating aggregate.
    pub async fn list_games(&self) -> Vec<GameSummary> {
        let registry = self.registry.lock().await;
        registry
            .data
            .games
            .iter()
            .filter(|(_, entry)| entry.active)
            .map(|(key, entry)| GameSummary {
                game_key: key.clone(),
                name: entry.name.clone(),
                owner: entry.owner.clone(),
                description: entry.description.clone(),
                latest_version: entry.latest_version().unwrap_or_default().to_string(),
                avg_score: entry.avg_score(),
                rating_count: entry.ratings.len(),
            })
            .collect()
    }

    /// Full detail for one game, delisted entries included — their rating
    /// history outlives the listing.
    pub async fn game_detail(&self, game_key: &str) -> Result<GameDetail, CatalogError> {
        let registry = self.registry.lock().await;
        let entry = registry
            .data
            .games
            .get(game_key)
            .ok_or_else(|| CatalogError::GameNotFound(game_key.to_string()))?;

        let skip = entry.ratings.len().saturating_sub(COMMENT_PREVIEW);
        Ok(GameDetail {
            game_key: game_key.to_string(),
            name: entry.name.clone(),
            owner: entry.owner.clone(),
            description: entry.description.clone(),
            avg_score: entry.avg_score(),
            rating_count: entry.ratings.len(),
            comments: entry.ratings[skip..].to_vec(),
        })
    }

    /// Appends one immutable rating.
    ///
    /// Requires a play-history record for `(player, game_key)`; absence is
    /// [`CatalogError::NotPlayed`]. Submitted ratings can never be edited or
    /// removed.
    pub async fn submit_rating(
        &self,
        player: &str,
        game_key: &str,
        score: u8,
        comment: String,
    ) -> Result<(), CatalogError> {
        if !(1..=5).contains(&score) {
            return Err(CatalogError::InvalidScore(score));
        }

        let mut registry = self.registry.lock().await;
        let entry = registry
            .data
            .games
            .get_mut(game_key)
            .ok_or_else(|| CatalogError::GameNotFound(game_key.to_string()))?;

        {
            let history = self.history.lock().await;
            if !history.data.has_played(player, game_key) {
                return Err(CatalogError::NotPlayed {
                    player: player.to_string(),
                    game_key: game_key.to_string(),
                });
            }
        }

        entry.ratings.push(Rating {
            player: player.to_string(),
            score,
            comment,
        });
        tracing::info!(%player, game_key, score, "rating submitted");
        registry.persist();
        Ok(())
    }

    /// Resolves a startable artifact for `(game_key, version)`.
    ///
    /// Delisted games do not resolve — new rooms cannot form around them.
    /// The version must exist and its archive must still be on disk.
    pub async fn resolve_artifact(
        &self,
        game_key: &str,
        version: &str,
    ) -> Result<ResolvedArtifact, CatalogError> {
        let registry = self.registry.lock().await;
        let entry = registry
            .data
            .games
            .get(game_key)
            .filter(|e| e.active)
            .ok_or_else(|| CatalogError::GameNotFound(game_key.to_string()))?;

        let artifact = entry.versions.get(version).ok_or_else(|| {
            CatalogError::VersionNotFound {
                game_key: game_key.to_string(),
                version: version.to_string(),
            }
        })?;

        let archive = self.paths.resolve_artifact(artifact);
        if !archive.exists() {
            return Err(CatalogError::ArtifactMissing {
                game_key: game_key.to_string(),
                version: version.to_string(),
                path: archive,
            });
        }

        Ok(ResolvedArtifact {
            game_key: game_key.to_string(),
            version: version.to_string(),
            archive,
            max_players: entry.max_players,
        })
    }
}
