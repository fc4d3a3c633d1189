use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CoreError;
use crate::model::BoostConfig;
use crate::ports::BoostStore;

/// Read-through adapter over the boost-config store (§2.2). Holds no state
/// of its own; every call round-trips to [`BoostStore`].
pub struct BoostCatalog {
    store: Arc<dyn BoostStore>,
}

impl BoostCatalog {
    pub fn new(store: Arc<dyn BoostStore>) -> Self { BoostCatalog { store } }

    pub async fn for_profile_and_fixture(&self, profile_id: &str, fixture_urn: &str) -> Result<Vec<BoostConfig>, CoreError> {
        self.store.find_by_profile_and_fixture(profile_id, fixture_urn).await
    }

    pub async fn for_fixture_all_profiles(&self, fixture_urn: &str) -> Result<Vec<BoostConfig>, CoreError> {
        self.store.find_by_fixtures(std::slice::from_ref(&fixture_urn.to_string())).await
    }
}

/// Builds `marketKey -> BoostConfig`, keeping the first-seen config per key
/// (§4.2, §8 property 8).
pub fn boost_map_by_market_key(boosts: Vec<BoostConfig>) -> HashMap<String, BoostConfig> {
    let mut map = HashMap::new();
    for boost in boosts {
        map.entry(boost.market_key()).or_insert(boost);
    }
    map
}

/// Groups boosts by `profileId`, each group keyed by `marketKey` with
/// first-seen-wins applied within the group (§4.1 step 3).
pub fn group_boosts_by_profile(boosts: Vec<BoostConfig>) -> HashMap<String, HashMap<String, BoostConfig>> {
    let mut by_profile: HashMap<String, Vec<BoostConfig>> = HashMap::new();
    for boost in boosts {
        by_profile.entry(boost.profile_id.clone()).or_default().push(boost);
    }
    by_profile.into_iter().map(|(profile, boosts)| (profile, boost_map_by_market_key(boosts))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn boost(profile: &str, market_id: i64, spec: &str) -> BoostConfig {
        BoostConfig {
            profile_id: profile.to_string(),
            market_id,
            market_specifier: spec.to_string(),
            strategy: "ADDITIVE_PERCENT".to_string(),
            percent: dec!(10),
        }
    }

    #[test]
    fn first_seen_wins_on_duplicate_market_key() {
        let mut first = boost("p1", 10, "total=2.5");
        first.percent = dec!(5);
        let mut dup = boost("p1", 10, "total=2.5");
        dup.percent = dec!(99);
        let map = boost_map_by_market_key(vec![first, dup]);
        assert_eq!(map.get("10|total=2.5").unwrap().percent, dec!(5));
    }

    #[test]
    fn group_by_profile_partitions_and_dedups_independently() {
        let boosts = vec![boost("p1", 10, "total=2.5"), boost("p2", 10, "total=2.5"), boost("p1", 20, "total=3.5")];
        let grouped = group_boosts_by_profile(boosts);
        assert_eq!(grouped.get("p1").unwrap().len(), 2);
        assert_eq!(grouped.get("p2").unwrap().len(), 1);
    }
}
