use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::CoreError;
use crate::ports::TenantStore;

/// An immutable tenant→profile view as of the last successful refresh.
///
/// Readers hold on to one [`Snapshot`] for the duration of a single
/// `publish` call so that a concurrent refresh never produces an
/// inconsistent routing decision (§5).
#[derive(Debug, Default)]
pub struct Snapshot {
    by_tenant: HashMap<String, String>,
}

impl Snapshot {
    fn from_tenants(tenants: impl IntoIterator<Item = (String, Option<String>)>) -> Self {
        let by_tenant = tenants.into_iter().filter_map(|(id, profile)| profile.map(|p| (id, p))).collect();
        Snapshot { by_tenant }
    }

    pub fn get(&self, tenant_id: &str) -> Option<&str> { self.by_tenant.get(tenant_id).map(String::as_str) }

    pub fn tenants(&self) -> impl Iterator<Item = &str> { self.by_tenant.keys().map(String::as_str) }

    pub fn tenants_by_profile(&self, profile_id: &str) -> HashSet<String> {
        self.by_tenant
            .iter()
            .filter(|(_, p)| p.as_str() == profile_id)
            .map(|(t, _)| t.clone())
            .collect()
    }

    pub fn group_by_profile(&self) -> HashMap<String, HashSet<String>> {
        let mut grouped: HashMap<String, HashSet<String>> = HashMap::new();
        for (tenant, profile) in &self.by_tenant {
            grouped.entry(profile.clone()).or_default().insert(tenant.clone());
        }
        grouped
    }

    pub fn len(&self) -> usize { self.by_tenant.len() }

    pub fn is_empty(&self) -> bool { self.by_tenant.is_empty() }
}

/// In-memory tenant→profile index, refreshed on a schedule from
/// [`TenantStore`]. The snapshot is replaced by a single atomic pointer
/// swap; it is never mutated in place.
pub struct TenantProfileIndex {
    store: Arc<dyn TenantStore>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl TenantProfileIndex {
    pub fn new(store: Arc<dyn TenantStore>) -> Self {
        TenantProfileIndex { store, snapshot: RwLock::new(Arc::new(Snapshot::default())) }
    }

    /// Snapshot in effect right now. Callers should capture this once at the
    /// start of a `publish` call and reuse it, not call this repeatedly.
    pub fn current(&self) -> Arc<Snapshot> {
        self.snapshot.read().expect("tenant index lock poisoned").clone()
    }

    /// Fetch the tenant table and replace the snapshot atomically. On
    /// failure the previous snapshot remains in effect (§4.5): this never
    /// clears a live snapshot.
    pub async fn refresh_once(&self) -> Result<(), CoreError> {
        let tenants = self.store.find_all_tenants().await?;
        let next = Snapshot::from_tenants(tenants.into_iter().map(|t| (t.id, t.profile_id)));
        info!(tenants = next.len(), "tenant profile index refreshed");
        *self.snapshot.write().expect("tenant index lock poisoned") = Arc::new(next);
        Ok(())
    }

    /// Run the periodic refresh loop until `cancel` fires. Failed refreshes
    /// are logged at ERROR and the previous snapshot is retained; refresh
    /// duration never blocks a concurrent `publish` call since readers only
    /// ever hold the snapshot lock long enough to clone an `Arc`.
    pub async fn run_refresher(self: Arc<Self>, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh_once().await {
                        error!(error = %e, "tenant profile index refresh failed, keeping previous snapshot");
                    }
                }
                _ = cancel.cancelled() => {
                    info!("tenant profile index refresher stopped");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::model::Tenant;

    struct FixedTenantStore(Vec<Tenant>);

    #[async_trait]
    impl TenantStore for FixedTenantStore {
        async fn find_all_tenants(&self) -> Result<Vec<Tenant>, CoreError> { Ok(self.0.clone()) }
    }

    fn tenant(id: &str, profile: Option<&str>) -> Tenant {
        Tenant { id: id.to_string(), profile_id: profile.map(str::to_string) }
    }

    #[tokio::test]
    async fn refresh_drops_tenants_without_a_profile() {
        let store = Arc::new(FixedTenantStore(vec![
            tenant("t1", Some("p1")),
            tenant("t2", None),
            tenant("t3", Some("p2")),
        ]));
        let index = TenantProfileIndex::new(store);
        index.refresh_once().await.unwrap();
        let snap = index.current();
        assert_eq!(snap.get("t1"), Some("p1"));
        assert_eq!(snap.get("t2"), None);
        assert_eq!(snap.tenants().collect::<HashSet<_>>(), HashSet::from(["t1", "t3"]));
    }

    struct FailingTenantStore;

    #[async_trait]
    impl TenantStore for FailingTenantStore {
        async fn find_all_tenants(&self) -> Result<Vec<Tenant>, CoreError> {
            Err(CoreError::StoreUnavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let store = Arc::new(FixedTenantStore(vec![tenant("t1", Some("p1"))]));
        let index = TenantProfileIndex::new(store);
        index.refresh_once().await.unwrap();

        // Swap in a failing store behind the same index to simulate an outage.
        let index = TenantProfileIndex { store: Arc::new(FailingTenantStore), snapshot: index.snapshot };
        assert!(index.refresh_once().await.is_err());
        assert_eq!(index.current().get("t1"), Some("p1"));
    }

    #[test]
    fn group_by_profile_matches_tenants_by_profile() {
        let snap = Snapshot::from_tenants(vec![
            ("t1".into(), Some("p1".into())),
            ("t2".into(), Some("p1".into())),
            ("t3".into(), Some("p2".into())),
        ]);
        let grouped = snap.group_by_profile();
        assert_eq!(grouped.get("p1"), Some(&snap.tenants_by_profile("p1")));
        assert_eq!(grouped.get("p2"), Some(&snap.tenants_by_profile("p2")));
    }
}
