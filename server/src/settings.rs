use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use util::ser::humantime_duration;

fn default_refresh_interval() -> Duration { Duration::from_secs(600) }

#[derive(Debug, Deserialize, Default)]
pub struct FeedLogSettings {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct TenantRefreshSettings {
    #[serde(deserialize_with = "humantime_duration", default = "default_refresh_interval")]
    pub interval: Duration,
}

impl Default for TenantRefreshSettings {
    fn default() -> Self { TenantRefreshSettings { interval: default_refresh_interval() } }
}

#[derive(Debug, Deserialize, Default)]
pub struct TenantsSettings {
    #[serde(default)]
    pub refresh: TenantRefreshSettings,
}

#[derive(Debug, Deserialize)]
pub struct NatsSettings {
    pub host: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FeedSettings {
    #[serde(default)]
    pub log: FeedLogSettings,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub tenants: TenantsSettings,
    pub nats: NatsSettings,
}

impl Settings {
    /// Layered load, same shape as the teacher's own `Settings::new`: a base
    /// `config/<env>.yaml`, an optional uncommitted `config/local.yaml`
    /// override, then environment variables prefixed `ODDSFLOW_`.
    pub fn new(env: &str) -> Result<Self, ConfigError> {
        let config_file = format!("config/{env}.yaml");
        let builder = Config::builder()
            .add_source(File::with_name(&config_file))
            .add_source(File::with_name("config/local.yaml").required(false))
            .add_source(Environment::with_prefix("ODDSFLOW").separator("__"));
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn feed_log_defaults_to_disabled() {
        assert!(!FeedLogSettings::default().enabled);
    }

    #[test]
    fn tenant_refresh_defaults_to_ten_minutes() {
        assert_eq!(TenantRefreshSettings::default().interval, Duration::from_secs(600));
    }
}
