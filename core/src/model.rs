use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market category carried on every [`OddsChangeMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Product {
    Prematch,
    Live,
}

/// One selection within a [`Market`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: i64,
    pub odds: Decimal,
}

/// A bettable proposition within a fixture.
///
/// `specifiers` carries the market's qualifying parameters (e.g. `total=2.5`)
/// as an ordered map so that [`Market::market_key`] is deterministic
/// regardless of the order the fields arrived in over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: i64,
    pub specifiers: BTreeMap<String, String>,
    pub outcomes: Vec<Outcome>,
    /// Non-odds fields the applicator must leave untouched.
    #[serde(default)]
    pub status: MarketStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    #[default]
    Active,
    Suspended,
    Settled,
}

impl Market {
    /// Deterministic string form of `specifiers`, e.g. `total=2.5|quarternr=1`.
    pub fn specifiers_key(&self) -> String {
        self.specifiers
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// `"{id}|{specifiers}"`, the join key against [`crate::model::BoostConfig`].
    pub fn market_key(&self) -> String { format!("{}|{}", self.id, self.specifiers_key()) }
}

/// Header fields plus an ordered market list for one fixture update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsChangeMessage {
    /// Fixture URN, e.g. `sr:match:12345`.
    pub event_id: String,
    pub product: Product,
    /// Monotonic milliseconds, not wall-clock time.
    pub timestamp: i64,
    pub markets: Vec<Market>,
}

/// Exactly one of single-tenant, profile, or broadcast routing.
///
/// The reserved broadcast node id `"-"` is enforced by the constructors below
/// rather than left to callers, per the invariant in §3: single-tenant routes
/// always carry an explicit node id, the other two always carry `"-"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteParameters {
    SingleTenant { tenant_id: String, node_id: String },
    Profile { profile_id: String },
    Broadcast,
}

/// Node id reserved to mean "every node for this tenant / no sub-routing".
pub const BROADCAST_NODE: &str = "-";

impl RouteParameters {
    pub fn broadcast() -> Self { RouteParameters::Broadcast }

    pub fn profile(profile_id: impl Into<String>) -> Self { RouteParameters::Profile { profile_id: profile_id.into() } }

    pub fn tenant(tenant_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        RouteParameters::SingleTenant { tenant_id: tenant_id.into(), node_id: node_id.into() }
    }
}

impl fmt::Display for RouteParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteParameters::SingleTenant { tenant_id, node_id } => write!(f, "tenant({tenant_id}, {node_id})"),
            RouteParameters::Profile { profile_id } => write!(f, "profile({profile_id})"),
            RouteParameters::Broadcast => write!(f, "broadcast"),
        }
    }
}

/// A consumer of the feed. Only tenants with a profile are routable; absent
/// profiles are filtered out of [`crate::tenant_index::TenantProfileIndex`] snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub id: String,
    pub profile_id: Option<String>,
}

/// A boost row as read from the boost-config store.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostConfig {
    pub profile_id: String,
    pub market_id: i64,
    pub market_specifier: String,
    pub strategy: String,
    pub percent: Decimal,
}

impl BoostConfig {
    pub fn market_key(&self) -> String { format!("{}|{}", self.market_id, self.market_specifier) }
}

/// Archived record written to the document store by [`crate::archive::FeedArchiver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedLogEntry {
    pub event_id: String,
    pub timestamp: i64,
    pub payload: String,
    pub profile_id: Option<String>,
}
