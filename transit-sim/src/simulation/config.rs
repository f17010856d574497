//! Simulation configuration.

use crate::domain::StationType;

/// Configuration parameters for the simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Waiting travelers a station holds before rejecting more.
    pub station_capacity: usize,

    /// Passengers a train carries.
    pub train_capacity: usize,

    /// Distance a train covers per tick (canvas units).
    pub train_speed: f32,

    /// Ticks a train waits at a station after rerouting.
    pub station_pause_ticks: u32,

    /// Destination of the traveler each new line's train starts with.
    pub seed_destination: StationType,
}

impl SimConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        station_capacity: usize,
        train_capacity: usize,
        train_speed: f32,
        station_pause_ticks: u32,
        seed_destination: StationType,
    ) -> Self {
        Self {
            station_capacity,
            train_capacity,
            train_speed,
            station_pause_ticks,
            seed_destination,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            station_capacity: 10,
            train_capacity: 6,
            train_speed: 2.0,       // canvas units per tick
            station_pause_ticks: 50,
            seed_destination: StationType::Triangle,
        }
    }
}
