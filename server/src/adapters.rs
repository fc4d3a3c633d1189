//! Minimal stand-ins for the collaborators the engine treats as external
//! (§1: relational store, document store, XML serialization). These let the
//! binary start up and exercise routing end to end without a database; a
//! real deployment replaces them with adapters over its own stores. Mirrors
//! the role `odds_engine::urn::SimpleUrnParser` plays for URN parsing.

use async_trait::async_trait;
use tracing::debug;

use odds_engine::error::CoreError;
use odds_engine::model::{BoostConfig, FeedLogEntry, OddsChangeMessage, Tenant};
use odds_engine::ports::{BoostStore, DocumentStore, MarketMappingCache, MessageSerializer, TenantStore};

/// Tenant table stand-in: no tenants. Replace with an adapter over the
/// actual relational store before routing any real traffic.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyTenantStore;

#[async_trait]
impl TenantStore for EmptyTenantStore {
    async fn find_all_tenants(&self) -> Result<Vec<Tenant>, CoreError> { Ok(Vec::new()) }
}

/// Boost-config table stand-in: no boosts configured anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyBoostStore;

#[async_trait]
impl BoostStore for EmptyBoostStore {
    async fn find_by_profile_and_fixture(&self, _profile_id: &str, _fixture_urn: &str) -> Result<Vec<BoostConfig>, CoreError> {
        Ok(Vec::new())
    }

    async fn find_by_fixtures(&self, _fixture_urns: &[String]) -> Result<Vec<BoostConfig>, CoreError> { Ok(Vec::new()) }
}

/// Market mapping cache stand-in: nothing is flagged primary, so boosts
/// never trigger until a real mapping cache is populated out-of-band.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrimaryMarkets;

impl MarketMappingCache for NoPrimaryMarkets {
    fn is_primary_market(&self, _market_id: i64, _sport_urn: &str) -> bool { false }
}

/// JSON rendering used in place of the out-of-scope XML serializer; only
/// exercised when `feed.log.enabled` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMessageSerializer;

impl MessageSerializer for JsonMessageSerializer {
    fn serialize(&self, message: &OddsChangeMessage) -> Result<String, CoreError> {
        serde_json::to_string(message).map_err(|e| CoreError::SerializationFailure(anyhow::Error::new(e)))
    }
}

/// Document store stand-in: logs the entry instead of persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDocumentStore;

#[async_trait]
impl DocumentStore for LoggingDocumentStore {
    async fn save(&self, entry: FeedLogEntry) -> Result<(), CoreError> {
        debug!(event_id = %entry.event_id, profile_id = ?entry.profile_id, "feed archive entry (no document store configured)");
        Ok(())
    }
}
