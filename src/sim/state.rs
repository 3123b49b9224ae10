//! Simulation state and lifecycle
//!
//! `LatticeGas` is the only type a driver needs: construct it, call
//! `initialize` once, then `step` as often as desired and read the current
//! buffer through `grid`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::cell::Cell;
use super::grid::{Grid, GridState};
use super::lattice::Direction;
use super::scene::{ParticleSource, SceneConfig, lay_walls};
use super::tick::{StepStats, advance};
use crate::error::{LatticeError, Result};

/// A seeded FHP-I lattice gas
#[derive(Debug, Clone)]
pub struct LatticeGas {
    config: SceneConfig,
    /// Run seed for reproducibility (None when built from a caller's RNG)
    seed: Option<u64>,
    grids: GridState,
    source: Option<ParticleSource>,
    rng: Pcg32,
    step_count: u64,
    initialized: bool,
    last_stats: StepStats,
}

impl LatticeGas {
    /// Create an uninitialized lattice seeded with `seed`
    pub fn new(config: SceneConfig, seed: u64) -> Result<Self> {
        let mut gas = Self::with_rng(config, Pcg32::seed_from_u64(seed))?;
        gas.seed = Some(seed);
        Ok(gas)
    }

    /// Create an uninitialized lattice drawing randomness from `rng`
    pub fn with_rng(config: SceneConfig, rng: Pcg32) -> Result<Self> {
        config.validate()?;
        let source = config
            .inflow
            .as_ref()
            .map(ParticleSource::from_config)
            .transpose()?;

        Ok(Self {
            grids: GridState::new(config.width, config.height),
            config,
            seed: None,
            source,
            rng,
            step_count: 0,
            initialized: false,
            last_stats: StepStats::default(),
        })
    }

    /// Lay walls and the obstacle, then run the first injection pass
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Err(LatticeError::State("lattice is already initialized"));
        }

        lay_walls(&mut self.grids, &self.config)?;
        let injected = self
            .source
            .as_ref()
            .map_or(0, |source| source.inject(self.grids.current_mut(), &mut self.rng));
        self.initialized = true;

        log::info!(
            "Lattice initialized: {}x{}, seed {:?}, {} wall cells, {} particles injected",
            self.config.width,
            self.config.height,
            self.seed,
            self.grids.current().solid_count(),
            injected
        );
        Ok(())
    }

    /// Advance by exactly one collision + propagation + injection cycle
    pub fn step(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(LatticeError::State("step called before initialize"));
        }

        let stats = advance(&mut self.grids, self.source.as_ref(), &mut self.rng);
        self.step_count += 1;
        self.last_stats = stats;

        log::debug!(
            "Step {}: collisions={} moved={} reflected={} absorbed={} injected={}",
            self.step_count,
            stats.collisions,
            stats.propagation.moved,
            stats.propagation.reflected,
            stats.propagation.absorbed,
            stats.injected
        );
        Ok(())
    }

    /// Run `steps` steps back to back
    pub fn run(&mut self, steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Read-only view of the current buffer
    pub fn grid(&self) -> &Grid {
        self.grids.current()
    }

    /// Completed `step` calls since construction
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Counters from the most recent step
    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    pub fn particle_count(&self) -> u64 {
        self.grid().particle_count()
    }

    pub fn momentum(&self) -> Vec2 {
        self.grid().momentum()
    }

    /// Add one particle to the current buffer
    pub fn place_particle(&mut self, x: usize, y: usize, dir: Direction) -> Result<()> {
        let grid = self.grids.current_mut();
        let cell = grid.get(x, y)?;
        if cell.is_solid() {
            return Err(LatticeError::SolidCell { x, y });
        }
        grid.set(x, y, cell.with_direction(dir, true))
    }

    /// Replace the occupancy of a non-solid cell in the current buffer
    pub fn set_particles(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let grid = self.grids.current_mut();
        if grid.get(x, y)?.is_solid() {
            return Err(LatticeError::SolidCell { x, y });
        }
        grid.set(x, y, Cell::from_bits(cell.particles()))
    }
}
