use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use odds_engine::archive::FeedArchiver;
use odds_engine::boost::{BoostApplicator, BoostCatalog, BoostStrategyRegistry};
use odds_engine::router::Router;
use odds_engine::tenant_index::TenantProfileIndex;
use odds_engine::urn::SimpleUrnParser;

use oddsflow_server::adapters::{EmptyBoostStore, EmptyTenantStore, JsonMessageSerializer, LoggingDocumentStore, NoPrimaryMarkets};
use oddsflow_server::broker::NatsBroker;
use oddsflow_server::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "oddsflow-server")]
struct Opts {
    /// Selects config/<env>.yaml; overridable via ODDSFLOW_ENV.
    #[arg(short, long, env = "ODDSFLOW_ENV", default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    util::tracing_init::init_tracing();

    let opts = Opts::parse();
    let settings = Settings::new(&opts.env)?;

    let tenant_index = Arc::new(TenantProfileIndex::new(Arc::new(EmptyTenantStore)));
    if let Err(e) = tenant_index.refresh_once().await {
        error!(error = %e, "initial tenant index refresh failed, starting with an empty snapshot");
    }

    let catalog = BoostCatalog::new(Arc::new(EmptyBoostStore));
    let applicator = BoostApplicator::new(Arc::new(BoostStrategyRegistry::with_builtins()));
    let archiver = FeedArchiver::new(settings.feed.log.enabled, Arc::new(JsonMessageSerializer), Arc::new(LoggingDocumentStore));
    let broker = Arc::new(NatsBroker::connect(&settings.nats).await?);

    // Message ingestion (the feed this engine routes) is wired in by the
    // deployment; `_router` is the entry point it calls `publish` on.
    let _router = Router::new(tenant_index.clone(), catalog, Arc::new(NoPrimaryMarkets), applicator, broker, archiver, Arc::new(SimpleUrnParser));

    let cancel = CancellationToken::new();
    let refresher = tokio::spawn(tenant_index.clone().run_refresher(settings.tenants.refresh.interval, cancel.clone()));

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    cancel.cancel();
    refresher.await?;

    Ok(())
}
