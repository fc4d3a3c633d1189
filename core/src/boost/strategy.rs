use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::model::{Market, Outcome};

/// A market lifted out of the wire representation so strategies only ever
/// see the fields they're allowed to touch.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltMarket {
    pub outcomes: Vec<Outcome>,
}

impl BuiltMarket {
    fn from_market(market: &Market) -> Self { BuiltMarket { outcomes: market.outcomes.clone() } }

    fn fold_into(self, market: &mut Market) { market.outcomes = self.outcomes; }
}

/// `(builtMarket, percent) -> ()`, mutating `builtMarket.outcomes[i].odds` in place.
pub type StrategyFn = fn(&mut BuiltMarket, Decimal);

pub const ADDITIVE_PERCENT: &str = "ADDITIVE_PERCENT";
pub const MULTIPLICATIVE_PERCENT: &str = "MULTIPLICATIVE_PERCENT";

fn additive_percent(market: &mut BuiltMarket, percent: Decimal) {
    let factor = percent / Decimal::from(100);
    for outcome in &mut market.outcomes {
        outcome.odds += outcome.odds * factor;
    }
}

fn multiplicative_percent(market: &mut BuiltMarket, percent: Decimal) {
    let factor = Decimal::ONE + percent / Decimal::from(100);
    for outcome in &mut market.outcomes {
        outcome.odds *= factor;
    }
}

/// Maps a boost's `strategy` name to the numeric transformation it names.
/// The registry is the single source of truth (§4.3): an unregistered name
/// is never silently skipped, it fails the apply with [`CoreError::UnknownStrategy`].
pub struct BoostStrategyRegistry {
    strategies: HashMap<String, StrategyFn>,
}

impl BoostStrategyRegistry {
    pub fn with_builtins() -> Self {
        let mut strategies: HashMap<String, StrategyFn> = HashMap::new();
        strategies.insert(ADDITIVE_PERCENT.to_string(), additive_percent as StrategyFn);
        strategies.insert(MULTIPLICATIVE_PERCENT.to_string(), multiplicative_percent as StrategyFn);
        BoostStrategyRegistry { strategies }
    }

    pub fn register(&mut self, name: impl Into<String>, strategy: StrategyFn) {
        self.strategies.insert(name.into(), strategy);
    }

    /// Apply the named strategy to `market` in place.
    pub fn apply(&self, name: &str, market: &mut Market, percent: Decimal) -> Result<(), CoreError> {
        let strategy = self.strategies.get(name).ok_or_else(|| CoreError::UnknownStrategy(name.to_string()))?;
        let mut built = BuiltMarket::from_market(market);
        strategy(&mut built, percent);
        built.fold_into(market);
        Ok(())
    }
}

impl Default for BoostStrategyRegistry {
    fn default() -> Self { Self::with_builtins() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::model::MarketStatus;
    use std::collections::BTreeMap;

    fn market(odds: &[&str]) -> Market {
        Market {
            id: 10,
            specifiers: BTreeMap::new(),
            outcomes: odds.iter().map(|o| Outcome { id: 1, odds: o.parse().unwrap() }).collect(),
            status: MarketStatus::Active,
        }
    }

    #[test]
    fn additive_percent_adds_percent_of_odds() {
        let registry = BoostStrategyRegistry::with_builtins();
        let mut m = market(&["2.00"]);
        registry.apply(ADDITIVE_PERCENT, &mut m, dec!(10)).unwrap();
        assert_eq!(m.outcomes[0].odds, dec!(2.20));
    }

    #[test]
    fn multiplicative_percent_scales_odds() {
        let registry = BoostStrategyRegistry::with_builtins();
        let mut m = market(&["2.00"]);
        registry.apply(MULTIPLICATIVE_PERCENT, &mut m, dec!(10)).unwrap();
        assert_eq!(m.outcomes[0].odds, dec!(2.200));
    }

    #[test]
    fn unknown_strategy_name_is_rejected() {
        let registry = BoostStrategyRegistry::with_builtins();
        let mut m = market(&["2.00"]);
        let err = registry.apply("NOT_A_STRATEGY", &mut m, dec!(10)).unwrap_err();
        assert!(matches!(err, CoreError::UnknownStrategy(name) if name == "NOT_A_STRATEGY"));
    }

    #[test]
    fn apply_preserves_non_odds_fields() {
        let registry = BoostStrategyRegistry::with_builtins();
        let mut m = market(&["2.00"]);
        m.status = MarketStatus::Suspended;
        registry.apply(ADDITIVE_PERCENT, &mut m, dec!(10)).unwrap();
        assert_eq!(m.status, MarketStatus::Suspended);
        assert_eq!(m.id, 10);
    }
}
