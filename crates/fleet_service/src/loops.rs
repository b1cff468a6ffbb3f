//! Background loops: simulation and persistence.
//!
//! Both loops run on independent fixed cadences against the shared registry
//! and exit cleanly when the shutdown channel flips. They never coordinate
//! with each other; the persistence loop snapshots whatever registry state
//! is current when its interval fires.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fleet_core::driver::Position;
use fleet_core::geocode::GeocodeClient;
use fleet_core::registry::DriverRegistry;
use fleet_core::update::DriverStateUpdate;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::store::{insert_snapshot, MetricsSink, SnapshotRow};

/// Perturbs every driver each tick and re-resolves its place name.
pub struct SimulationLoop {
    registry: Arc<DriverRegistry>,
    geocoder: GeocodeClient,
    strategy: Box<dyn DriverStateUpdate>,
    interval: Duration,
}

impl SimulationLoop {
    pub fn new(
        registry: Arc<DriverRegistry>,
        geocoder: GeocodeClient,
        strategy: Box<dyn DriverStateUpdate>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            geocoder,
            strategy,
            interval,
        }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            strategy = ?self.strategy,
            "simulation loop started"
        );
        let mut tick = 0u64;
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    tick += 1;
                    self.step(tick).await;
                }
                _ = shutdown.changed() => {
                    info!("simulation loop shutting down");
                    break;
                }
            }
        }
    }

    /// Advance every driver by one tick. The geocoder call happens outside
    /// the registry lock; the write-back applies all of a driver's fields
    /// under one guard.
    async fn step(&self, tick: u64) {
        let snapshot = self.registry.snapshot();
        for (idx, driver) in snapshot.iter().enumerate() {
            let delta = self.strategy.tick_delta(idx, tick);
            let position = Position {
                lat: driver.position.lat + delta.dlat,
                lon: driver.position.lon + delta.dlon,
            };
            let place_name = self
                .geocoder
                .resolve_or_unknown(position.lat, position.lon)
                .await;
            self.registry.apply_tick(
                &driver.id,
                position,
                place_name,
                delta.distance_km,
                delta.deliveries,
            );
        }
        debug!(tick, drivers = snapshot.len(), "simulation tick complete");
    }
}

/// Snapshots the registry and writes one row per driver to the store.
pub struct PersistenceLoop<S> {
    registry: Arc<DriverRegistry>,
    sink: S,
    interval: Duration,
}

impl<S: MetricsSink> PersistenceLoop<S> {
    pub fn new(registry: Arc<DriverRegistry>, sink: S, interval: Duration) -> Self {
        Self {
            registry,
            sink,
            interval,
        }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "persistence loop started"
        );
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.step().await;
                }
                _ = shutdown.changed() => {
                    info!("persistence loop shutting down");
                    break;
                }
            }
        }
    }

    async fn step(&self) {
        let captured_at = Utc::now();
        let rows: Vec<SnapshotRow> = self
            .registry
            .snapshot()
            .iter()
            .map(|record| SnapshotRow::from_record(record, captured_at))
            .collect();
        let persisted = insert_snapshot(&self.sink, &rows).await;
        debug!(persisted, total = rows.len(), "snapshot batch written");
    }
}
