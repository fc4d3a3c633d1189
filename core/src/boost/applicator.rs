use std::collections::HashMap;
use std::sync::Arc;

use crate::boost::strategy::BoostStrategyRegistry;
use crate::error::CoreError;
use crate::model::{BoostConfig, OddsChangeMessage};

/// Joins a message against a `marketKey -> BoostConfig` map and produces a
/// deep-cloned message with matched markets transformed (§4.3). The original
/// message is never mutated (§8 property 1).
pub struct BoostApplicator {
    registry: Arc<BoostStrategyRegistry>,
}

impl BoostApplicator {
    pub fn new(registry: Arc<BoostStrategyRegistry>) -> Self { BoostApplicator { registry } }

    pub fn apply(&self, message: &OddsChangeMessage, boost_map: &HashMap<String, BoostConfig>) -> Result<OddsChangeMessage, CoreError> {
        let mut clone = message.clone();
        for market in &mut clone.markets {
            let Some(boost) = boost_map.get(&market.market_key()) else { continue };
            self.registry.apply(&boost.strategy, market, boost.percent)?;
        }
        Ok(clone)
    }
}
