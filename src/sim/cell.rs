//! Cell bit layout
//!
//! A cell is one byte:
//! - bits 0..=5: one particle per lattice direction (East .. SouthEast)
//! - bit 6: solid wall/obstacle
//! - bit 7: reserved, never counted as a particle

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lattice::Direction;

/// Mask of the six direction bits
pub const PARTICLE_BITS: u8 = 0b0011_1111;
/// Solid flag
pub const SOLID_BIT: u8 = 1 << 6;
/// Reserved flag (carried through untouched)
pub const RESERVED_BIT: u8 = 1 << 7;

/// Occupancy of a single lattice site
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const SOLID: Cell = Cell(SOLID_BIT);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Cell(bits)
    }

    /// Cell carrying exactly the given directions
    pub fn with_directions(directions: &[Direction]) -> Self {
        directions
            .iter()
            .fold(Cell::EMPTY, |cell, &dir| cell.with_direction(dir, true))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Direction bits only
    #[inline]
    pub const fn particles(self) -> u8 {
        self.0 & PARTICLE_BITS
    }

    #[inline]
    pub const fn has_direction(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub const fn with_direction(self, dir: Direction, present: bool) -> Self {
        if present {
            Cell(self.0 | dir.bit())
        } else {
            Cell(self.0 & !dir.bit())
        }
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 & SOLID_BIT != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.particles() == 0
    }

    /// Number of particles present (0..=6)
    #[inline]
    pub const fn particle_count(self) -> u32 {
        self.particles().count_ones()
    }

    /// Same cell with all particles removed; solid and reserved bits survive
    #[inline]
    pub const fn without_particles(self) -> Self {
        Cell(self.0 & !PARTICLE_BITS)
    }

    /// Iterate over the directions present, in bit order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&dir| self.has_direction(dir))
    }

    /// Net momentum carried by this cell (unit mass per particle)
    pub fn momentum(self) -> Vec2 {
        self.directions().map(Direction::unit_vector).sum()
    }
}
