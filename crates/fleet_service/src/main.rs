//! Delivery-fleet telemetry service.
//!
//! Wires the shared driver registry to three independent units of work: the
//! simulation loop, the persistence loop, and the HTTP metrics endpoint.
//! Store failures never take the endpoint down; at worst the service runs
//! without persisted history.

mod config;
mod http;
mod loops;
mod store;

use std::sync::Arc;

use fleet_core::driver::default_roster;
use fleet_core::geocode::GeocodeClient;
use fleet_core::registry::DriverRegistry;
use fleet_core::update::RandomWalk;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServiceConfig;
use crate::loops::{PersistenceLoop, SimulationLoop};
use crate::store::PgMetricsSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = ServiceConfig::from_env();
    let registry = Arc::new(DriverRegistry::new(default_roster()));
    let geocoder = GeocodeClient::new(&cfg.geocode_endpoint);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // A bad connection string leaves the service serving /metrics only.
    let persist_handle = match PgMetricsSink::connect_lazy(&cfg.store_url()) {
        Ok(sink) => {
            store::ensure_schema(&sink).await;
            let persistence =
                PersistenceLoop::new(registry.clone(), sink, cfg.persistence_interval);
            Some(tokio::spawn(persistence.run(shutdown_rx.clone())))
        }
        Err(err) => {
            error!(error = %err, "metrics store unavailable; running without persistence");
            None
        }
    };

    let simulation = SimulationLoop::new(
        registry.clone(),
        geocoder,
        Box::new(RandomWalk::from_entropy()),
        cfg.simulation_interval,
    );
    let sim_handle = tokio::spawn(simulation.run(shutdown_rx));

    let app = http::build_router(registry);
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    info!(listen = %cfg.listen_addr, "fleet telemetry service starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop both loops and let in-flight store/resolver calls finish.
    let _ = shutdown_tx.send(true);
    let _ = sim_handle.await;
    if let Some(handle) = persist_handle {
        let _ = handle.await;
    }

    info!("service stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C handler");
    info!("shutdown signal received");
}
