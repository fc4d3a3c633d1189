use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Deserialize a human-readable duration ("10m", "30s") into a [`Duration`].
///
/// Used for config fields specified as a plain string in YAML/TOML, e.g.
/// `tenants.refresh.interval: 10m`.
pub fn humantime_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let val: String = Deserialize::deserialize(deserializer)?;
    humantime::parse_duration(&val).map_err(serde::de::Error::custom)
}
