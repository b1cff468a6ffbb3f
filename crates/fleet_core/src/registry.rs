//! Driver registry: the in-memory ground truth for current fleet state.
//!
//! The roster is fixed at construction; no driver is ever added or removed.
//! One writer (the simulation loop) and any number of readers (persistence,
//! HTTP) share the registry. Each tick's multi-field update for a driver is
//! applied under a single write guard, so readers never observe a position
//! that has advanced ahead of its counters. Snapshots across *different*
//! drivers remain eventually consistent.

use std::sync::RwLock;

use crate::driver::{DriverRecord, Position};

#[derive(Debug)]
pub struct DriverRegistry {
    drivers: RwLock<Vec<DriverRecord>>,
}

impl DriverRegistry {
    /// Build a registry from a fixed roster.
    pub fn new(roster: Vec<DriverRecord>) -> Self {
        Self {
            drivers: RwLock::new(roster),
        }
    }

    /// Clone the current table, in roster order.
    pub fn snapshot(&self) -> Vec<DriverRecord> {
        self.drivers.read().expect("registry lock poisoned").clone()
    }

    /// The fixed set of driver identifiers, in roster order.
    pub fn ids(&self) -> Vec<String> {
        self.drivers
            .read()
            .expect("registry lock poisoned")
            .iter()
            .map(|d| d.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.drivers.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply one tick's update for a single driver: position, resolved place
    /// name, and non-negative increments to the cumulative counters, all
    /// under one write guard. Returns false if the id is unknown.
    pub fn apply_tick(
        &self,
        id: &str,
        position: Position,
        place_name: String,
        distance_delta_km: f64,
        deliveries_delta: u64,
    ) -> bool {
        let mut drivers = self.drivers.write().expect("registry lock poisoned");
        let Some(driver) = drivers.iter_mut().find(|d| d.id == id) else {
            return false;
        };

        driver.position = position;
        driver.place_name = place_name;
        // Cumulative counters never decrease.
        driver.distance_km += distance_delta_km.max(0.0);
        driver.deliveries += deliveries_delta;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::default_roster;
    use crate::update::{DriverStateUpdate, RandomWalk};

    fn tick(registry: &DriverRegistry, walk: &RandomWalk, tick_no: u64) {
        for (idx, driver) in registry.snapshot().iter().enumerate() {
            let delta = walk.tick_delta(idx, tick_no);
            let position = Position {
                lat: driver.position.lat + delta.dlat,
                lon: driver.position.lon + delta.dlon,
            };
            registry.apply_tick(
                &driver.id,
                position,
                driver.place_name.clone(),
                delta.distance_km,
                delta.deliveries,
            );
        }
    }

    #[test]
    fn counters_are_monotone_across_ticks() {
        let registry = DriverRegistry::new(default_roster());
        let walk = RandomWalk::new(11);

        let mut previous = registry.snapshot();
        for tick_no in 1..=20 {
            tick(&registry, &walk, tick_no);
            let current = registry.snapshot();
            for (before, after) in previous.iter().zip(current.iter()) {
                assert!(after.distance_km >= before.distance_km);
                assert!(after.deliveries >= before.deliveries);
            }
            previous = current;
        }
    }

    #[test]
    fn id_set_is_invariant_across_ticks() {
        let registry = DriverRegistry::new(default_roster());
        let walk = RandomWalk::new(11);

        let ids_before = registry.ids();
        for tick_no in 1..=10 {
            tick(&registry, &walk, tick_no);
        }
        assert_eq!(registry.ids(), ids_before);
    }

    #[test]
    fn apply_tick_rejects_unknown_id() {
        let registry = DriverRegistry::new(default_roster());
        let applied = registry.apply_tick(
            "driver99",
            Position { lat: 0.0, lon: 0.0 },
            "Nowhere".to_string(),
            1.0,
            1,
        );
        assert!(!applied);
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn apply_tick_updates_all_fields_together() {
        let registry = DriverRegistry::new(default_roster());
        let applied = registry.apply_tick(
            "driver1",
            Position {
                lat: 40.731,
                lon: -73.935,
            },
            "Brooklyn, New York, United States".to_string(),
            0.25,
            1,
        );
        assert!(applied);

        let snapshot = registry.snapshot();
        let driver = snapshot.iter().find(|d| d.id == "driver1").unwrap();
        assert_eq!(driver.position.lat, 40.731);
        assert_eq!(driver.place_name, "Brooklyn, New York, United States");
        assert_eq!(driver.distance_km, 0.25);
        assert_eq!(driver.deliveries, 1);
    }
}
