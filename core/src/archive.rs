use std::sync::Arc;

use tracing::error;

use crate::model::{FeedLogEntry, OddsChangeMessage};
use crate::ports::{DocumentStore, MessageSerializer};

/// Best-effort, non-blocking sink for (possibly boosted) messages (§4.6).
/// When disabled it is a no-op and never touches the serializer.
pub struct FeedArchiver {
    enabled: bool,
    serializer: Arc<dyn MessageSerializer>,
    store: Arc<dyn DocumentStore>,
}

impl FeedArchiver {
    pub fn new(enabled: bool, serializer: Arc<dyn MessageSerializer>, store: Arc<dyn DocumentStore>) -> Self {
        FeedArchiver { enabled, serializer, store }
    }

    /// Serialize and persist `message`. Spawned as a fire-and-forget task so
    /// callers never wait on document-store latency; every failure is
    /// logged and swallowed, never returned.
    pub fn archive(&self, profile_id: Option<String>, message: OddsChangeMessage) {
        if !self.enabled {
            return;
        }

        let serializer = self.serializer.clone();
        let store = self.store.clone();
        tokio::spawn(async move {
            let payload = match serializer.serialize(&message) {
                Ok(payload) => payload,
                Err(e) => {
                    error!(error = %e, event_id = %message.event_id, "feed archive serialization failed");
                    return;
                }
            };

            let entry = FeedLogEntry { event_id: message.event_id.clone(), timestamp: message.timestamp, payload, profile_id };
            if let Err(e) = store.save(entry).await {
                error!(error = %e, event_id = %message.event_id, "feed archive write failed");
            }
        });
    }
}
