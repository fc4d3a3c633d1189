//! Contracts for the external collaborators named in §6. The core only ever
//! depends on these traits; concrete adapters (a Postgres pool, a NATS
//! client, an XML encoder, ...) are wired in by the binary that embeds this
//! crate and are out of scope here.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::CoreError;
use crate::model::{BoostConfig, FeedLogEntry, OddsChangeMessage, Tenant};

/// The relational tenant table.
#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn find_all_tenants(&self) -> Result<Vec<Tenant>, CoreError>;
}

/// The relational boost-config table, queried two ways (§6).
#[async_trait]
pub trait BoostStore: Send + Sync {
    async fn find_by_profile_and_fixture(&self, profile_id: &str, fixture_urn: &str) -> Result<Vec<BoostConfig>, CoreError>;

    async fn find_by_fixtures(&self, fixture_urns: &[String]) -> Result<Vec<BoostConfig>, CoreError>;
}

/// Out-of-band populated cache answering "is this market primary for this sport".
pub trait MarketMappingCache: Send + Sync {
    fn is_primary_market(&self, market_id: i64, sport_urn: &str) -> bool;
}

/// The physical message broker. Implementations must tolerate concurrent calls.
#[async_trait]
pub trait BrokerAdapter: Send + Sync {
    async fn publish(
        &self,
        message: &OddsChangeMessage,
        sport_id: i64,
        node_id: &str,
        tenant_id: &str,
        headers: &HashMap<String, serde_json::Value>,
    ) -> Result<(), CoreError>;
}

/// The document store backing the optional feed archive.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn save(&self, entry: FeedLogEntry) -> Result<(), CoreError>;
}

/// Canonical XML rendering of a message, handed to the [`DocumentStore`].
pub trait MessageSerializer: Send + Sync {
    fn serialize(&self, message: &OddsChangeMessage) -> Result<String, CoreError>;
}

/// Parsed fields out of a fixture/sport URN, e.g. `sr:sport:1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedUrn {
    pub id: i64,
}

pub trait UrnParser: Send + Sync {
    fn parse(&self, urn: &str) -> Result<ParsedUrn, CoreError>;
}
