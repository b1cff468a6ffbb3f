//! Plaintext metrics endpoint.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use fleet_core::driver::DriverRecord;
use fleet_core::registry::DriverRegistry;

pub fn build_router(registry: Arc<DriverRegistry>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(registry)
}

/// Always 200 text/plain with the current best-effort in-memory state,
/// regardless of store or resolver health.
async fn metrics_handler(State(registry): State<Arc<DriverRegistry>>) -> String {
    render_metrics(&registry.snapshot())
}

/// One line per driver, in registry iteration order.
pub fn render_metrics(drivers: &[DriverRecord]) -> String {
    let mut body = String::new();
    for driver in drivers {
        let _ = writeln!(
            body,
            "Driver: {}, Location: {}, Distance: {:.2} km, Deliveries: {}",
            driver.name, driver.place_name, driver.distance_km, driver.deliveries
        );
    }
    body
}
