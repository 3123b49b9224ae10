//! One automaton step
//!
//! Phases run with a strict barrier between them:
//! collide (in place) → propagate (into next) → swap → inject.

use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::collide_grid;
use super::grid::GridState;
use super::propagation::{PropagationStats, propagate};
use super::scene::ParticleSource;

/// Counters for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Cells whose occupancy changed in the collision phase
    pub collisions: usize,
    pub propagation: PropagationStats,
    /// Particles written by the inflow source
    pub injected: u64,
}

/// Advance the lattice by one collision + propagation + injection cycle
pub fn advance(grids: &mut GridState, source: Option<&ParticleSource>, rng: &mut Pcg32) -> StepStats {
    let step_seed: u64 = rng.random();
    let collisions = collide_grid(grids.current_mut(), step_seed);

    let propagation = propagate(grids);
    grids.swap();

    let injected = source.map_or(0, |source| source.inject(grids.current_mut(), rng));

    StepStats {
        collisions,
        propagation,
        injected,
    }
}
