//! Deterministic lattice gas engine
//!
//! Everything that evolves the automaton lives here. This module must stay
//! pure and deterministic:
//! - Seeded RNG only, passed explicitly to collision and injection
//! - Fixed row-major iteration order
//! - No rendering or platform dependencies

pub mod cell;
pub mod collision;
pub mod grid;
pub mod lattice;
pub mod propagation;
pub mod scene;
pub mod state;
pub mod tick;

pub use cell::{Cell, PARTICLE_BITS, RESERVED_BIT, SOLID_BIT};
pub use collision::{collide, collide_grid};
pub use grid::{Grid, GridState};
pub use lattice::{Direction, RowParity};
pub use propagation::{Hop, PropagationStats, hop, propagate};
pub use scene::{InflowConfig, Obstacle, ParticleSource, SceneConfig, lay_walls, weighted_cell};
pub use state::LatticeGas;
pub use tick::{StepStats, advance};
