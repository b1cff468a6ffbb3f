//! Pluggable per-tick driver state updates.
//!
//! The simulation loop only sees [DriverStateUpdate], so the shipped random
//! walk can later be swapped for a real telemetry feed without touching
//! persistence or serving logic.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Full span of the uniform position perturbation, in degrees.
/// Each tick moves a coordinate by up to ±half of this.
const POSITION_JITTER_DEGREES: f64 = 0.001;

/// Upper bound (exclusive) of the uniform distance increment per tick, in km.
const MAX_DISTANCE_STEP_KM: f64 = 0.5;

/// One tick's worth of change for a single driver.
/// `distance_km` is non-negative; cumulative counters only grow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDelta {
    pub dlat: f64,
    pub dlon: f64,
    pub distance_km: f64,
    pub deliveries: u64,
}

/// Trait for producing per-tick driver updates.
pub trait DriverStateUpdate: Send + Sync + std::fmt::Debug {
    /// Sample the delta for one driver on one tick.
    /// `driver_idx` is the driver's roster index; `tick` is the cycle number
    /// (for strategies that vary over time).
    fn tick_delta(&self, driver_idx: usize, tick: u64) -> TickDelta;
}

/// Random walk: uniform position jitter plus uniform non-negative increments
/// to the cumulative counters.
#[derive(Debug, Clone, Copy)]
pub struct RandomWalk {
    /// Seed for RNG (for reproducibility).
    pub seed: u64,
}

impl RandomWalk {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from OS entropy, for production runs where reproducibility
    /// does not matter.
    pub fn from_entropy() -> Self {
        Self {
            seed: rand::random(),
        }
    }
}

impl DriverStateUpdate for RandomWalk {
    fn tick_delta(&self, driver_idx: usize, tick: u64) -> TickDelta {
        // Derive a per-driver, per-tick stream so a fixed seed replays the
        // same simulation.
        let mut rng = StdRng::seed_from_u64(
            self.seed
                .wrapping_add(tick.wrapping_mul(0x1_0000))
                .wrapping_add(driver_idx as u64),
        );

        TickDelta {
            dlat: (rng.gen::<f64>() - 0.5) * POSITION_JITTER_DEGREES,
            dlon: (rng.gen::<f64>() - 0.5) * POSITION_JITTER_DEGREES,
            distance_km: rng.gen::<f64>() * MAX_DISTANCE_STEP_KM,
            deliveries: rng.gen_range(0..=1),
        }
    }
}
