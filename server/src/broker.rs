use std::collections::HashMap;

use async_nats::Client;
use async_trait::async_trait;

use odds_engine::error::CoreError;
use odds_engine::model::OddsChangeMessage;
use odds_engine::ports::BrokerAdapter;

/// Publishes odds-change messages over NATS, one subject per tenant/node
/// pair. Mirrors the teacher's own `NatsProducer` (subject-per-channel,
/// JSON payload) adapted from an `actix` `Handler` to an `async fn` since
/// the engine core has no actor runtime underneath it.
pub struct NatsBroker {
    client: Client,
}

impl NatsBroker {
    pub async fn connect(settings: &crate::settings::NatsSettings) -> anyhow::Result<Self> {
        let mut options = async_nats::ConnectOptions::new();
        if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
            options = options.user_and_password(user.clone(), pass.clone());
        }
        let client = options.connect(&settings.host).await?;
        Ok(NatsBroker { client })
    }

    fn subject(sport_id: i64, tenant_id: &str, node_id: &str) -> String {
        format!("odds.{sport_id}.{tenant_id}.{node_id}")
    }
}

#[async_trait]
impl BrokerAdapter for NatsBroker {
    async fn publish(
        &self,
        message: &OddsChangeMessage,
        sport_id: i64,
        node_id: &str,
        tenant_id: &str,
        _headers: &HashMap<String, serde_json::Value>,
    ) -> Result<(), CoreError> {
        let payload = serde_json::to_vec(message).map_err(|e| CoreError::BrokerFailure { tenant: tenant_id.to_string(), source: anyhow::Error::new(e) })?;
        self.client
            .publish(Self::subject(sport_id, tenant_id, node_id), payload.into())
            .await
            .map_err(|e| CoreError::BrokerFailure { tenant: tenant_id.to_string(), source: anyhow::Error::new(e) })
    }
}
