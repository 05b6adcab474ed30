use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::events::AuditEntry;
use crate::domain::auth::events::AuditEvent;
use crate::domain::auth::ports::AuditLog;

/// Audit adapter: structured tracing output plus a bounded in-memory tail.
///
/// The retained tail backs the admin audit endpoint; older entries fall off
/// the front once the capacity is reached.
pub struct TracingAuditLog {
    capacity: usize,
    entries: RwLock<VecDeque<AuditEntry>>,
}

impl TracingAuditLog {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// The most recent entries, newest last, at most `limit` of them.
    pub async fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }
}

impl Default for TracingAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLog for TracingAuditLog {
    async fn record(&self, event: AuditEvent) {
        tracing::info!(event = event.event_type(), details = ?event, "Audit event");

        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(AuditEntry::new(event));
    }
}
