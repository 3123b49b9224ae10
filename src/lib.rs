//! Lattice Gas - FHP-I cellular automaton on a hexagonal lattice
//!
//! Core modules:
//! - `sim`: Deterministic engine (cell encoding, collisions, propagation, scene)
//! - `settings`: JSON run settings for the headless runner
//! - `error`: Crate error type

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{LatticeError, Result};
pub use settings::Settings;
pub use sim::{Cell, Direction, Grid, LatticeGas, SceneConfig};

/// Default scene constants
pub mod consts {
    /// Lattice dimensions
    pub const DEFAULT_WIDTH: usize = 1000;
    pub const DEFAULT_HEIGHT: usize = 600;

    /// Interior wall segment: one column, rows start..end
    pub const OBSTACLE_COLUMN: usize = 300;
    pub const OBSTACLE_ROW_START: usize = 300;
    pub const OBSTACLE_ROW_END: usize = 400;

    /// Inflow column just inside the left wall
    pub const INFLOW_COLUMN: usize = 1;
    /// Injection probability per direction (E, NE, NW, W, SW, SE)
    pub const INFLOW_WEIGHTS: [f64; 6] = [0.8, 0.5, 0.2, 0.1, 0.2, 0.5];

    /// Runner defaults
    pub const DEFAULT_SEED: u64 = 0x5eed_1a77;
    pub const DEFAULT_STEPS: u64 = 1000;
    pub const DEFAULT_REPORT_EVERY: u64 = 100;
}
