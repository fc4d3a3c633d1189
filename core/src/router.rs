use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, warn};

use crate::archive::FeedArchiver;
use crate::boost::catalog::{boost_map_by_market_key, group_boosts_by_profile};
use crate::boost::{BoostApplicator, BoostCatalog};
use crate::error::{CoreError, PublishError};
use crate::model::{BROADCAST_NODE, OddsChangeMessage, RouteParameters};
use crate::ports::{BrokerAdapter, MarketMappingCache, UrnParser};
use crate::tenant_index::TenantProfileIndex;

/// The top-level `publish` entry point (§4.1). Holds handles to every
/// collaborator the routing decision needs; nothing here is global state.
pub struct Router {
    tenant_index: Arc<TenantProfileIndex>,
    boost_catalog: BoostCatalog,
    market_mapping: Arc<dyn MarketMappingCache>,
    applicator: BoostApplicator,
    broker: Arc<dyn BrokerAdapter>,
    archiver: FeedArchiver,
    urn_parser: Arc<dyn UrnParser>,
}

impl Router {
    pub fn new(
        tenant_index: Arc<TenantProfileIndex>,
        boost_catalog: BoostCatalog,
        market_mapping: Arc<dyn MarketMappingCache>,
        applicator: BoostApplicator,
        broker: Arc<dyn BrokerAdapter>,
        archiver: FeedArchiver,
        urn_parser: Arc<dyn UrnParser>,
    ) -> Self {
        Router { tenant_index, boost_catalog, market_mapping, applicator, broker, archiver, urn_parser }
    }

    /// `isBoostApplicable` (§4.4): true iff the message is PREMATCH and at
    /// least one of its markets is flagged primary for `sport_urn`.
    fn is_boost_applicable(&self, message: &OddsChangeMessage, sport_urn: &str) -> bool {
        use crate::model::Product;
        message.product == Product::Prematch
            && message.markets.iter().any(|m| self.market_mapping.is_primary_market(m.id, sport_urn))
    }

    /// `resolveBoosted` (§4.2).
    async fn resolve_boosted(
        &self,
        message: &OddsChangeMessage,
        sport_urn: &str,
        profile_id: &str,
    ) -> Result<OddsChangeMessage, CoreError> {
        if !self.is_boost_applicable(message, sport_urn) {
            return Ok(message.clone());
        }
        let boosts = self.boost_catalog.for_profile_and_fixture(profile_id, &message.event_id).await?;
        if boosts.is_empty() {
            return Ok(message.clone());
        }
        let boost_map = boost_map_by_market_key(boosts);
        self.applicator.apply(message, &boost_map)
    }

    /// `publish(message, sportUrn, route, headers)` (§4.1).
    pub async fn publish(
        &self,
        message: OddsChangeMessage,
        sport_urn: &str,
        route: RouteParameters,
        headers: HashMap<String, serde_json::Value>,
    ) -> Result<(), PublishError> {
        let sport_id = self
            .urn_parser
            .parse(sport_urn)
            .map_err(|e| PublishError::MalformedSportUrn { urn: sport_urn.to_string(), source: anyhow::Error::new(e) })?
            .id;

        match route {
            RouteParameters::SingleTenant { tenant_id, node_id } => {
                self.publish_single_tenant(message, sport_urn, sport_id, &tenant_id, &node_id, &headers).await
            }
            RouteParameters::Profile { profile_id } => {
                self.publish_profile(message, sport_urn, sport_id, &profile_id, &headers).await
            }
            RouteParameters::Broadcast => self.publish_broadcast(message, sport_urn, sport_id, &headers).await,
        }
    }

    /// Convenience overload with no headers (§6).
    pub async fn publish_without_headers(
        &self,
        message: OddsChangeMessage,
        sport_urn: &str,
        route: RouteParameters,
    ) -> Result<(), PublishError> {
        self.publish(message, sport_urn, route, HashMap::new()).await
    }

    async fn publish_single_tenant(
        &self,
        message: OddsChangeMessage,
        sport_urn: &str,
        sport_id: i64,
        tenant_id: &str,
        node_id: &str,
        headers: &HashMap<String, serde_json::Value>,
    ) -> Result<(), PublishError> {
        let snapshot = self.tenant_index.current();
        let Some(profile_id) = snapshot.get(tenant_id) else {
            warn!(tenant_id, "publish dropped: tenant not present in current index");
            return Ok(());
        };
        let profile_id = profile_id.to_string();

        let boosted = self.resolve_boosted(&message, sport_urn, &profile_id).await.map_err(|e| match e {
            CoreError::UnknownStrategy(name) => PublishError::UnknownStrategy(name),
            other => PublishError::BoostResolutionFailed { source: anyhow::Error::new(other) },
        })?;

        if let Err(e) = self.broker.publish(&boosted, sport_id, node_id, tenant_id, headers).await {
            error!(error = %e, tenant_id, "broker publish failed");
        }
        // Feed archive is deliberately not written on this path (§9).
        Ok(())
    }

    async fn publish_profile(
        &self,
        message: OddsChangeMessage,
        sport_urn: &str,
        sport_id: i64,
        profile_id: &str,
        headers: &HashMap<String, serde_json::Value>,
    ) -> Result<(), PublishError> {
        let boosted = self.resolve_boosted(&message, sport_urn, profile_id).await.map_err(|e| match e {
            CoreError::UnknownStrategy(name) => PublishError::UnknownStrategy(name),
            other => PublishError::BoostResolutionFailed { source: anyhow::Error::new(other) },
        })?;

        let snapshot = self.tenant_index.current();
        for tenant_id in snapshot.tenants_by_profile(profile_id) {
            if let Err(e) = self.broker.publish(&boosted, sport_id, BROADCAST_NODE, &tenant_id, headers).await {
                error!(error = %e, tenant_id = %tenant_id, "broker publish failed");
            }
        }

        self.archiver.archive(Some(profile_id.to_string()), boosted);
        Ok(())
    }

    async fn publish_broadcast(
        &self,
        message: OddsChangeMessage,
        sport_urn: &str,
        sport_id: i64,
        headers: &HashMap<String, serde_json::Value>,
    ) -> Result<(), PublishError> {
        let snapshot = self.tenant_index.current();

        if !self.is_boost_applicable(&message, sport_urn) {
            self.publish_to_all(&message, sport_id, snapshot.tenants(), headers).await;
            self.archiver.archive(None, message);
            return Ok(());
        }

        let all_boosts = match self.boost_catalog.for_fixture_all_profiles(&message.event_id).await {
            Ok(boosts) => boosts,
            Err(e) => {
                error!(error = %e, event_id = %message.event_id, "boost lookup failed, publishing unboosted");
                self.publish_to_all(&message, sport_id, snapshot.tenants(), headers).await;
                self.archiver.archive(None, message);
                return Ok(());
            }
        };

        if all_boosts.is_empty() {
            self.publish_to_all(&message, sport_id, snapshot.tenants(), headers).await;
            self.archiver.archive(None, message);
            return Ok(());
        }

        let profile_boosts = group_boosts_by_profile(all_boosts);
        let tenants_by_profile = snapshot.group_by_profile();

        for (profile_id, tenants) in tenants_by_profile {
            let boosted = match profile_boosts.get(&profile_id) {
                Some(boost_map) => match self.applicator.apply(&message, boost_map) {
                    Ok(boosted) => boosted,
                    Err(CoreError::UnknownStrategy(name)) => {
                        error!(profile_id = %profile_id, strategy = %name, "unknown boost strategy, skipping profile group");
                        continue;
                    }
                    Err(other) => {
                        error!(profile_id = %profile_id, error = %other, "boost application failed, skipping profile group");
                        continue;
                    }
                },
                None => message.clone(),
            };

            for tenant_id in &tenants {
                if let Err(e) = self.broker.publish(&boosted, sport_id, BROADCAST_NODE, tenant_id, headers).await {
                    error!(error = %e, tenant_id = %tenant_id, "broker publish failed");
                }
            }

            self.archiver.archive(Some(profile_id), boosted);
        }

        Ok(())
    }

    async fn publish_to_all<'a>(
        &self,
        message: &OddsChangeMessage,
        sport_id: i64,
        tenants: impl Iterator<Item = &'a str>,
        headers: &HashMap<String, serde_json::Value>,
    ) {
        for tenant_id in tenants {
            if let Err(e) = self.broker.publish(message, sport_id, BROADCAST_NODE, tenant_id, headers).await {
                error!(error = %e, tenant_id, "broker publish failed");
            }
        }
    }
}
