//! Streaming particles to their neighbours
//!
//! Boundary handling is deliberately asymmetric: anything leaving through
//! the right edge (including into the right wall column) is absorbed, while
//! the left, top and bottom edges and every solid cell bounce particles back
//! into the cell they came from.

use super::grid::{Grid, GridState};
use super::lattice::{Direction, RowParity};

/// Where a particle ends up after one hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Lands on the neighbour
    Move { x: usize, y: usize },
    /// Bounces back into the origin cell with the reflected direction
    Reflect,
    /// Leaves through the open right edge
    Absorb,
}

/// Particle counts for one propagation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    pub moved: u64,
    pub reflected: u64,
    pub absorbed: u64,
}

/// Resolve the hop of a particle at (x, y) travelling in `dir`
pub fn hop(grid: &Grid, x: usize, y: usize, dir: Direction) -> Hop {
    let (dx, dy) = dir.offset(RowParity::of(y));
    let nx = x as isize + dx;
    let ny = y as isize + dy;

    if nx >= grid.width() as isize - 1 {
        return Hop::Absorb;
    }
    if !grid.contains(nx, ny) || grid.cell(nx as usize, ny as usize).is_solid() {
        return Hop::Reflect;
    }
    Hop::Move {
        x: nx as usize,
        y: ny as usize,
    }
}

/// Stream every particle of the current buffer into the next buffer.
///
/// The current buffer is left with walls only. Buffers are not swapped here.
pub fn propagate(grids: &mut GridState) -> PropagationStats {
    let (current, next) = grids.buffers_mut();
    let mut stats = PropagationStats::default();

    for y in 0..current.height() {
        for x in 0..current.width() {
            let cell = current.cell(x, y);
            if cell.is_solid() || cell.is_empty() {
                continue;
            }
            for dir in cell.directions() {
                match hop(current, x, y, dir) {
                    Hop::Move { x: nx, y: ny } => {
                        next.deposit(nx, ny, dir);
                        stats.moved += 1;
                    }
                    Hop::Reflect => {
                        next.deposit(x, y, dir.reflected());
                        stats.reflected += 1;
                    }
                    Hop::Absorb => stats.absorbed += 1,
                }
            }
            current.put(x, y, cell.without_particles());
        }
    }

    log::trace!(
        "propagate: moved={} reflected={} absorbed={}",
        stats.moved,
        stats.reflected,
        stats.absorbed
    );
    stats
}
