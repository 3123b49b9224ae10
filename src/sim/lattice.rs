//! Hexagonal lattice directions and row-parity addressing
//!
//! The hex lattice is embedded in a rectangular array by shifting odd rows
//! half a cell to the right. Rows grow downward, so "north" is `y - 1`.
//! East/West offsets are the same on every row; the four diagonal
//! directions use a different table for even and odd rows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the six lattice velocities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

/// Row parity selects the neighbour offset table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowParity {
    Even,
    Odd,
}

impl RowParity {
    #[inline]
    pub fn of(y: usize) -> Self {
        if y % 2 == 0 { RowParity::Even } else { RowParity::Odd }
    }
}

/// (dx, dy) per direction, indexed by `Direction::index`
const EVEN_ROW_OFFSETS: [(isize, isize); 6] = [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)];
const ODD_ROW_OFFSETS: [(isize, isize); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)];

impl Direction {
    /// All directions in bit order
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Bit position inside a cell (0..=5)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::East => 0,
            Direction::NorthEast => 1,
            Direction::NorthWest => 2,
            Direction::West => 3,
            Direction::SouthWest => 4,
            Direction::SouthEast => 5,
        }
    }

    /// Single-bit mask for this direction
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Direction a particle takes when it bounces off a wall.
    ///
    /// Pairs are East/West, NorthEast/SouthEast and NorthWest/SouthWest.
    #[inline]
    pub const fn reflected(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthEast,
            Direction::NorthWest => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthWest,
        }
    }

    /// Neighbour offset (dx, dy) for a cell on a row of the given parity
    #[inline]
    pub fn offset(self, parity: RowParity) -> (isize, isize) {
        match parity {
            RowParity::Even => EVEN_ROW_OFFSETS[self.index()],
            RowParity::Odd => ODD_ROW_OFFSETS[self.index()],
        }
    }

    /// Unit velocity in math convention (y up), 60° apart starting at East
    pub fn unit_vector(self) -> Vec2 {
        let angle = self.index() as f32 * std::f32::consts::FRAC_PI_3;
        Vec2::new(angle.cos(), angle.sin())
    }
}
