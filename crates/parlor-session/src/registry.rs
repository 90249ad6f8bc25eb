//! The session registry: account creation, presence, and the expiry sweep.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parlor_store::{Account, RegistryDoc, SharedDoc};

use crate::SessionError;

/// Seconds since the Unix epoch. `last_seen` is persisted, so wall-clock
/// time is used rather than a monotonic instant.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Timing knobs for presence tracking.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How often the background sweep runs.
    pub sweep_interval: Duration,
    /// How stale `last_seen` may get before an online account is forced
    /// offline. Two missed heartbeats at the default client cadence.
    pub expiry: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(30),
            expiry: Duration::from_secs(60),
        }
    }
}

/// Tracks which accounts are online. Cheap to clone; all clones share the
/// accounts document.
#[derive(Clone)]
pub struct SessionRegistry {
    registry: SharedDoc<RegistryDoc>,
    config: SessionConfig,
}

impl SessionRegistry {
    pub fn new(registry: SharedDoc<RegistryDoc>, config: SessionConfig) -> Self {
        Self { registry, config }
    }

    /// Creates an account and marks it online in one step — first use needs
    /// no separate login.
    pub async fn register(&self, name: &str, credential: &str) -> Result<(), SessionError> {
        let mut registry = self.registry.lock().await;
        if registry.data.accounts.contains_key(name) {
            return Err(SessionError::AccountExists(name.to_string()));
        }
        registry.data.accounts.insert(
            name.to_string(),
            Account {
                credential: credential.to_string(),
                role: Default::default(),
                online: true,
                last_seen: unix_now(),
            },
        );
        tracing::info!(name, "account registered");
        registry.persist();
        Ok(())
    }

    /// Marks the account online, overwriting any stale online flag left by
    /// an unclean disconnect.
    pub async fn login(&self, name: &str, credential: &str) -> Result<(), SessionError> {
        let mut registry = self.registry.lock().await;
        let account = registry
            .data
            .accounts
            .get_mut(name)
            .filter(|a| a.credential == credential)
            .ok_or(SessionError::InvalidCredential)?;

        account.online = true;
        account.last_seen = unix_now();
        tracing::info!(name, "login");
        registry.persist();
        Ok(())
    }

    /// Marks the account offline. Idempotent: unknown or already-offline
    /// names are a no-op success.
    pub async fn logout(&self, name: &str) {
        let mut registry = self.registry.lock().await;
        if let Some(account) = registry.data.accounts.get_mut(name) {
            account.online = false;
            account.last_seen = 0;
            tracing::info!(name, "logout");
            registry.persist();
        }
    }

    /// Refreshes `last_seen` for an online account. Never resurrects an
    /// expired session — the client has to log in again.
    pub async fn heartbeat(&self, name: &str) -> Result<(), SessionError> {
        self.touch(name).await
    }

    /// Presence gate used by every authenticated request. Any lobby traffic
    /// counts as a heartbeat, so `last_seen` is refreshed as a side effect.
    pub async fn require_online(&self, name: &str) -> Result<(), SessionError> {
        self.touch(name).await
    }

    async fn touch(&self, name: &str) -> Result<(), SessionError> {
        let mut registry = self.registry.lock().await;
        let account = registry
            .data
            .accounts
            .get_mut(name)
            .filter(|a| a.online)
            .ok_or_else(|| SessionError::NotOnline(name.to_string()))?;

        account.last_seen = unix_now();
        registry.persist();
        Ok(())
    }

    /// Names of every account currently online.
    pub async fn list_online(&self) -> Vec<String> {
        let registry = self.registry.lock().await;
        registry
            .data
            .accounts
            .iter()
            .filter(|(_, a)| a.online)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// One expiry pass at the given clock reading. Returns the names forced
    /// offline.
    pub fn expire_stale_at(doc: &mut RegistryDoc, expiry: Duration, now: u64) -> Vec<String> {
        let cutoff = expiry.as_secs();
        let mut expired = Vec::new();
        for (name, account) in doc.accounts.iter_mut() {
            if account.online && now.saturating_sub(account.last_seen) > cutoff {
                account.online = false;
                expired.push(name.clone());
                tracing::info!(name, "session expired, forced offline");
            }
        }
        expired
    }

    /// One expiry pass against the wall clock.
    pub async fn expire_stale(&self) -> Vec<String> {
        let mut registry = self.registry.lock().await;
        let expired =
            Self::expire_stale_at(&mut registry.data, self.config.expiry, unix_now());
        if !expired.is_empty() {
            registry.persist();
        }
        expired
    }

    /// Spawns the background sweep. Runs for the life of the process; this
    /// is the only mechanism that notices silently-dead clients.
    pub fn spawn_expiry_sweep(&self) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        let period = self.config.sweep_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let expired = registry.expire_stale().await;
                if !expired.is_empty() {
                    tracing::debug!(count = expired.len(), "expiry sweep completed");
                }
            }
        })
    }
}
