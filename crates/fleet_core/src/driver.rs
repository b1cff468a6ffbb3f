//! Driver model and the fixed startup roster.

use crate::geocode::UNRESOLVED_PLACE;

/// A position in floating-point degrees. Unclamped: a long-running
/// simulation can drift anywhere on Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// One simulated delivery driver.
///
/// `id` and `name` are fixed at startup. `distance_km` and `deliveries` are
/// cumulative and never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverRecord {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub place_name: String,
    pub distance_km: f64,
    pub deliveries: u64,
}

impl DriverRecord {
    /// Create a driver at a starting position with zeroed counters.
    pub fn new(id: &str, name: &str, position: Position) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position,
            place_name: UNRESOLVED_PLACE.to_string(),
            distance_km: 0.0,
            deliveries: 0,
        }
    }
}

/// The default eight-driver roster, spread across major cities.
pub fn default_roster() -> Vec<DriverRecord> {
    [
        ("driver1", "John", 40.730610, -73.935242),
        ("driver2", "Jane", 34.052235, -118.243683),
        ("driver3", "Alex", 37.774929, -122.419418),
        ("driver4", "Emma", 41.878113, -87.629799),
        ("driver5", "Michael", 51.507351, -0.127758),
        ("driver6", "Sophia", 48.856614, 2.352222),
        ("driver7", "David", 35.689487, 139.691706),
        ("driver8", "Olivia", -33.868820, 151.209296),
    ]
    .into_iter()
    .map(|(id, name, lat, lon)| DriverRecord::new(id, name, Position { lat, lon }))
    .collect()
}
