//! Scene layout and the inflow particle source
//!
//! The scene is a solid border ring plus an optional vertical wall segment.
//! Flow is sustained by an inflow column near the left edge that is
//! overwritten with freshly sampled particles after every step, paired with
//! the absorbing right edge in propagation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::grid::{Grid, GridState};
use super::lattice::Direction;
use crate::consts::*;
use crate::error::{LatticeError, Result};

/// Vertical wall segment: `column`, rows `row_start..row_end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub column: usize,
    pub row_start: usize,
    pub row_end: usize,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            column: OBSTACLE_COLUMN,
            row_start: OBSTACLE_ROW_START,
            row_end: OBSTACLE_ROW_END,
        }
    }
}

/// Inflow column and per-direction injection probabilities (E .. SE)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflowConfig {
    pub column: usize,
    pub weights: Vec<f64>,
}

impl Default for InflowConfig {
    fn default() -> Self {
        Self {
            column: INFLOW_COLUMN,
            weights: INFLOW_WEIGHTS.to_vec(),
        }
    }
}

/// Lattice dimensions and static layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: usize,
    pub height: usize,
    /// Interior wall segment (none = border only)
    pub obstacle: Option<Obstacle>,
    /// Inflow source (none = closed box)
    pub inflow: Option<InflowConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            obstacle: Some(Obstacle::default()),
            inflow: Some(InflowConfig::default()),
        }
    }
}

impl SceneConfig {
    /// Border walls only: no obstacle, no inflow
    pub fn bordered(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            obstacle: None,
            inflow: None,
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacle = Some(obstacle);
        self
    }

    pub fn with_inflow(mut self, inflow: InflowConfig) -> Self {
        self.inflow = Some(inflow);
        self
    }

    fn is_interior_column(&self, x: usize) -> bool {
        x >= 1 && x < self.width - 1
    }

    /// Reject layouts the engine cannot run
    pub fn validate(&self) -> Result<()> {
        if self.width <= 2 || self.height <= 2 {
            return Err(LatticeError::Configuration(format!(
                "lattice {}x{} has no interior; both dimensions must exceed 2",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(LatticeError::Configuration(format!(
                "lattice {}x{} does not fit in memory",
                self.width, self.height
            )));
        }

        if let Some(obstacle) = &self.obstacle {
            if !self.is_interior_column(obstacle.column) {
                return Err(LatticeError::Configuration(format!(
                    "obstacle column {} is outside the interior 1..{}",
                    obstacle.column,
                    self.width - 1
                )));
            }
            if obstacle.row_start < 1
                || obstacle.row_end > self.height - 1
                || obstacle.row_start >= obstacle.row_end
            {
                return Err(LatticeError::Configuration(format!(
                    "obstacle rows {}..{} must be a non-empty range inside 1..{}",
                    obstacle.row_start,
                    obstacle.row_end,
                    self.height - 1
                )));
            }
        }

        if let Some(inflow) = &self.inflow {
            if !self.is_interior_column(inflow.column) {
                return Err(LatticeError::Configuration(format!(
                    "inflow column {} is outside the interior 1..{}",
                    inflow.column,
                    self.width - 1
                )));
            }
            validate_weights(&inflow.weights)?;
        }

        Ok(())
    }
}

/// Mark the border ring and the obstacle solid in both buffers
pub fn lay_walls(grids: &mut GridState, config: &SceneConfig) -> Result<()> {
    let (width, height) = (grids.width(), grids.height());

    for x in 0..width {
        grids.set_solid(x, 0)?;
        grids.set_solid(x, height - 1)?;
    }
    for y in 1..height - 1 {
        grids.set_solid(0, y)?;
        grids.set_solid(width - 1, y)?;
    }

    if let Some(obstacle) = &config.obstacle {
        for y in obstacle.row_start..obstacle.row_end {
            grids.set_solid(obstacle.column, y)?;
        }
    }

    Ok(())
}

fn validate_weights(weights: &[f64]) -> Result<[f64; 6]> {
    let weights: [f64; 6] = weights.try_into().map_err(|_| {
        LatticeError::Configuration(format!(
            "expected 6 direction weights, got {}",
            weights.len()
        ))
    })?;
    if let Some(bad) = weights.iter().find(|w| !(0.0..=1.0).contains(*w)) {
        return Err(LatticeError::Configuration(format!(
            "direction weight {bad} is not a probability in [0, 1]"
        )));
    }
    Ok(weights)
}

/// Sample a cell where each direction bit is set independently with its weight
pub fn weighted_cell<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<Cell> {
    let weights = validate_weights(weights)?;
    Ok(sample(&weights, rng))
}

fn sample<R: Rng + ?Sized>(weights: &[f64; 6], rng: &mut R) -> Cell {
    Direction::ALL
        .into_iter()
        .zip(weights)
        .fold(Cell::EMPTY, |cell, (dir, &p)| {
            cell.with_direction(dir, rng.random_bool(p))
        })
}

/// Open inflow boundary
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSource {
    column: usize,
    weights: [f64; 6],
}

impl ParticleSource {
    pub fn new(column: usize, weights: &[f64]) -> Result<Self> {
        Ok(Self {
            column,
            weights: validate_weights(weights)?,
        })
    }

    pub fn from_config(config: &InflowConfig) -> Result<Self> {
        Self::new(config.column, &config.weights)
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn weights(&self) -> &[f64; 6] {
        &self.weights
    }

    /// Overwrite the inflow column of every interior row with fresh particles.
    ///
    /// Prior occupancy is discarded. Solid cells in the column are skipped.
    /// Returns the number of particles injected.
    pub fn inject<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> u64 {
        let mut injected = 0;
        for y in 1..grid.height().saturating_sub(1) {
            if grid.cell(self.column, y).is_solid() {
                continue;
            }
            let cell = sample(&self.weights, rng);
            injected += cell.particle_count() as u64;
            grid.put(self.column, y, cell);
        }
        injected
    }
}
