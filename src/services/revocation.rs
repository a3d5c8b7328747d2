use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Set of bearer tokens invalidated before their natural expiry
#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn is_revoked(&self, token: &str) -> bool;

    /// Reject `token` until `until`
    async fn revoke(&self, token: &str, until: DateTime<Utc>);

    /// Drop entries whose expiry has passed; returns how many were removed
    async fn purge_expired(&self) -> usize;
}

/// Process-local store. Not shared between instances, lost on restart.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    entries: DashMap<String, DateTime<Utc>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn is_revoked(&self, token: &str) -> bool {
        self.entries
            .get(token)
            .is_some_and(|until| *until > Utc::now())
    }

    async fn revoke(&self, token: &str, until: DateTime<Utc>) {
        self.entries.insert(token.to_owned(), until);
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, until| *until > now);
        before.saturating_sub(self.entries.len())
    }
}
