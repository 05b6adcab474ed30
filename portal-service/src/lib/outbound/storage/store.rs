use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::models::SessionRecord;
use crate::domain::auth::ports::SessionStore;
use crate::outbound::storage::slots::StorageSlot;

/// Session store over a volatile/durable slot pair.
///
/// Records are serialized into HS256-signed tokens before hitting a slot, so
/// a record edited on disk (or under a different key) fails verification and
/// reads as absent. Volatile wins on read; invalid or expired contents are
/// purged from the slot they came from.
pub struct TokenSessionStore<V, D>
where
    V: StorageSlot,
    D: StorageSlot,
{
    volatile: V,
    durable: D,
    codec: auth::TokenCodec,
    expiry: Duration,
}

impl<V, D> TokenSessionStore<V, D>
where
    V: StorageSlot,
    D: StorageSlot,
{
    /// Create a store signing with `secret` and stamping persistent sessions
    /// with an `expiry_hours` lifetime.
    pub fn new(volatile: V, durable: D, secret: &[u8], expiry_hours: i64) -> Self {
        Self {
            volatile,
            durable,
            codec: auth::TokenCodec::new(secret),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Open, validate, and if necessary purge one slot's contents.
    async fn read_slot(&self, slot: &dyn StorageSlot, label: &str) -> Option<SessionRecord> {
        let token = slot.load().await?;

        let record = match self.codec.open::<SessionRecord>(&token) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(slot = label, error = %e, "Discarding unverifiable session record");
                slot.discard().await;
                return None;
            }
        };

        if record.is_expired(Utc::now()) {
            tracing::debug!(slot = label, email = %record.user.email, "Purging expired session");
            slot.discard().await;
            return None;
        }

        Some(record)
    }
}

#[async_trait]
impl<V, D> SessionStore for TokenSessionStore<V, D>
where
    V: StorageSlot,
    D: StorageSlot,
{
    async fn save(
        &self,
        record: &SessionRecord,
        persistent: bool,
    ) -> Result<(), SessionStoreError> {
        let mut record = record.clone();
        record.expires_at = persistent.then(|| record.created_at + self.expiry);

        let token = self
            .codec
            .sign(&record)
            .map_err(|e| SessionStoreError::Signing(e.to_string()))?;

        // One active session per store: the sibling slot is cleared so a
        // stale record cannot shadow the fresh one on read.
        if persistent {
            self.durable.store(&token).await?;
            self.volatile.discard().await;
        } else {
            self.volatile.store(&token).await?;
            self.durable.discard().await;
        }

        Ok(())
    }

    async fn read(&self) -> Option<SessionRecord> {
        if let Some(record) = self.read_slot(&self.volatile, "volatile").await {
            return Some(record);
        }
        self.read_slot(&self.durable, "durable").await
    }

    async fn clear(&self) {
        self.volatile.discard().await;
        self.durable.discard().await;
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::auth::models::PublicUser;
    use crate::domain::auth::models::Role;
    use crate::outbound::storage::slots::VolatileSlot;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn record() -> SessionRecord {
        SessionRecord {
            session_id: Uuid::new_v4(),
            user: PublicUser {
                email: "student@uniportal.ru".to_string(),
                nickname: "IvanStudent".to_string(),
                role: Role::Student,
                group: "IT-101".to_string(),
            },
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    fn store() -> TokenSessionStore<VolatileSlot, VolatileSlot> {
        TokenSessionStore::new(VolatileSlot::new(), VolatileSlot::new(), SECRET, 24)
    }

    #[tokio::test]
    async fn persistent_save_reads_back_with_expiry() {
        let store = store();
        let saved = record();

        store.save(&saved, true).await.unwrap();
        let read = store.read().await.expect("no session after save");

        assert_eq!(read.user, saved.user);
        assert_eq!(read.session_id, saved.session_id);
        let expires = read.expires_at.expect("persistent session has no expiry");
        assert_eq!(expires, saved.created_at + Duration::hours(24));
    }

    #[tokio::test]
    async fn volatile_save_reads_back_without_expiry() {
        let store = store();

        store.save(&record(), false).await.unwrap();
        let read = store.read().await.unwrap();
        assert!(read.expires_at.is_none());
    }

    #[tokio::test]
    async fn expired_record_is_purged_not_hidden() {
        let store = TokenSessionStore::new(VolatileSlot::new(), VolatileSlot::new(), SECRET, -1);

        store.save(&record(), true).await.unwrap();

        assert!(store.read().await.is_none());
        // The purge is real: a second read still finds nothing.
        assert!(store.read().await.is_none());
    }

    #[tokio::test]
    async fn clear_is_unconditional_and_idempotent() {
        let store = store();

        store.save(&record(), true).await.unwrap();
        store.clear().await;
        assert!(store.read().await.is_none());

        store.clear().await;
        assert!(store.read().await.is_none());
    }

    #[tokio::test]
    async fn save_replaces_the_sibling_slot() {
        let store = store();
        let first = record();
        let second = record();

        store.save(&first, false).await.unwrap();
        store.save(&second, true).await.unwrap();

        // Only the durable record remains; the older volatile one is gone.
        let read = store.read().await.unwrap();
        assert_eq!(read.session_id, second.session_id);

        store.clear().await;
        assert!(store.read().await.is_none());
    }

    #[tokio::test]
    async fn volatile_slot_wins_when_both_are_occupied() {
        let volatile = VolatileSlot::new();
        let durable = VolatileSlot::new();
        let codec = auth::TokenCodec::new(SECRET);

        let volatile_record = record();
        let durable_record = record();
        volatile
            .store(&codec.sign(&volatile_record).unwrap())
            .await
            .unwrap();
        durable
            .store(&codec.sign(&durable_record).unwrap())
            .await
            .unwrap();

        let store = TokenSessionStore::new(volatile, durable, SECRET, 24);
        let read = store.read().await.unwrap();
        assert_eq!(read.session_id, volatile_record.session_id);
    }

    #[tokio::test]
    async fn tampered_record_reads_as_absent_and_is_purged() {
        let volatile = VolatileSlot::new();
        volatile.store("garbage-token").await.unwrap();

        let store = TokenSessionStore::new(volatile, VolatileSlot::new(), SECRET, 24);
        assert!(store.read().await.is_none());

        // Record signed under a different key is just as dead.
        let foreign = auth::TokenCodec::new(b"another_secret_key_of_32_bytes!!!")
            .sign(&record())
            .unwrap();
        let volatile = VolatileSlot::new();
        volatile.store(&foreign).await.unwrap();
        let store = TokenSessionStore::new(volatile, VolatileSlot::new(), SECRET, 24);
        assert!(store.read().await.is_none());
    }

    #[tokio::test]
    async fn expired_volatile_falls_back_to_durable() {
        let store = TokenSessionStore::new(VolatileSlot::new(), VolatileSlot::new(), SECRET, 24);

        let mut stale = record();
        stale.expires_at = Some(Utc::now() - Duration::hours(1));
        let codec = auth::TokenCodec::new(SECRET);
        store
            .volatile
            .store(&codec.sign(&stale).unwrap())
            .await
            .unwrap();

        let durable_record = record();
        store
            .durable
            .store(&codec.sign(&durable_record).unwrap())
            .await
            .unwrap();

        let read = store.read().await.unwrap();
        assert_eq!(read.session_id, durable_record.session_id);
    }
}
