//! Metrics store adapter: schema management and snapshot persistence.
//!
//! The store is best-effort only. Schema creation retries a bounded number
//! of times and then gives up without failing startup; batch inserts attempt
//! every row independently, so a single bad row (or a store hiccup mid-batch)
//! costs exactly that row. Nothing here is transactional.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fleet_core::driver::DriverRecord;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};

const SCHEMA_RETRY_ATTEMPTS: u32 = 5;
const SCHEMA_RETRY_DELAY: Duration = Duration::from_secs(2);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS driver_metrics (
    id TEXT,
    name TEXT,
    latitude DOUBLE PRECISION,
    longitude DOUBLE PRECISION,
    location_name TEXT,
    distance DOUBLE PRECISION,
    deliveries LONG,
    timestamp TIMESTAMP
)";

const INSERT_ROW_SQL: &str = "INSERT INTO driver_metrics \
    (id, name, latitude, longitude, location_name, distance, deliveries, timestamp) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection unavailable: {0}")]
    Connect(sqlx::Error),
    #[error("store query failed: {0}")]
    Query(sqlx::Error),
}

/// One persisted, append-only snapshot of a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub distance_km: f64,
    pub deliveries: i64,
    pub captured_at: DateTime<Utc>,
}

impl SnapshotRow {
    /// Capture a registry record at the given write time.
    pub fn from_record(record: &DriverRecord, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            latitude: record.position.lat,
            longitude: record.position.lon,
            location_name: record.place_name.clone(),
            distance_km: record.distance_km,
            deliveries: record.deliveries as i64,
            captured_at,
        }
    }
}

/// Adapter seam over the time-series store, so persistence semantics can be
/// exercised against an in-memory fake.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn create_table(&self) -> Result<(), StoreError>;
    async fn insert_row(&self, row: &SnapshotRow) -> Result<(), StoreError>;
}

/// Production sink over the store's Postgres wire endpoint.
///
/// The pool connects lazily: a store that is down at startup only surfaces
/// errors per operation, which keeps the service in its degraded
/// non-persisting mode instead of aborting.
pub struct PgMetricsSink {
    pool: PgPool,
}

impl PgMetricsSink {
    pub fn connect_lazy(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(url)
            .map_err(StoreError::Connect)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl MetricsSink for PgMetricsSink {
    async fn create_table(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(())
    }

    async fn insert_row(&self, row: &SnapshotRow) -> Result<(), StoreError> {
        sqlx::query(INSERT_ROW_SQL)
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.latitude)
            .bind(row.longitude)
            .bind(&row.location_name)
            .bind(row.distance_km)
            .bind(row.deliveries)
            .bind(row.captured_at)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(())
    }
}

/// Idempotently create the metrics table, retrying on failure with a fixed
/// delay. After the final attempt the failure is logged and startup
/// continues; the service then runs without usable persistence.
/// Returns whether the table is known to exist.
pub async fn ensure_schema(sink: &dyn MetricsSink) -> bool {
    info!("attempting to create metrics table");
    for attempt in 1..=SCHEMA_RETRY_ATTEMPTS {
        match sink.create_table().await {
            Ok(()) => {
                info!("metrics table ready");
                return true;
            }
            Err(err) => {
                warn!(attempt, error = %err, "create table failed");
            }
        }
        if attempt < SCHEMA_RETRY_ATTEMPTS {
            tokio::time::sleep(SCHEMA_RETRY_DELAY).await;
        }
    }
    error!(
        attempts = SCHEMA_RETRY_ATTEMPTS,
        "failed to create metrics table; persistence will be degraded"
    );
    false
}

/// Write one row per driver. Each insert is attempted independently: a
/// failed row is logged and skipped, the rest of the batch proceeds.
/// Returns the number of rows persisted.
pub async fn insert_snapshot(sink: &dyn MetricsSink, rows: &[SnapshotRow]) -> usize {
    let mut persisted = 0;
    for row in rows {
        match sink.insert_row(row).await {
            Ok(()) => persisted += 1,
            Err(err) => {
                warn!(driver = %row.id, error = %err, "snapshot insert failed");
            }
        }
    }
    persisted
}
