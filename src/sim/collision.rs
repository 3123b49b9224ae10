//! FHP-I collision rules
//!
//! Collisions are local: a cell's post-collision state depends only on its
//! own occupancy and, for the symmetric head-on cases, one random bit.
//! Rules match on the exact bitmask, so a cell must carry the listed
//! particles and nothing else.

use rand::Rng;
use rand_pcg::Pcg32;

use super::cell::Cell;
use super::grid::Grid;
use super::lattice::Direction;

const E: u8 = Direction::East.bit();
const NE: u8 = Direction::NorthEast.bit();
const NW: u8 = Direction::NorthWest.bit();
const W: u8 = Direction::West.bit();
const SW: u8 = Direction::SouthWest.bit();
const SE: u8 = Direction::SouthEast.bit();

/// Head-on pairs
pub const PAIR_EAST_WEST: u8 = E | W;
pub const PAIR_NORTHEAST_SOUTHWEST: u8 = NE | SW;
pub const PAIR_NORTHWEST_SOUTHEAST: u8 = NW | SE;

/// Symmetric three-particle configurations
pub const TRIANGLE_EVEN: u8 = E | NW | SW;
pub const TRIANGLE_ODD: u8 = NE | W | SE;

/// Apply the collision table to one cell.
///
/// Head-on pairs rotate by ±60° with equal probability; the two triangles
/// swap deterministically. Every other configuration passes through.
/// Solid cells must be skipped by the caller.
pub fn collide<R: Rng + ?Sized>(cell: Cell, rng: &mut R) -> Cell {
    debug_assert!(!cell.is_solid(), "collision applied to a solid cell");

    let bits = match cell.bits() {
        PAIR_EAST_WEST => {
            if rng.random::<bool>() {
                PAIR_NORTHEAST_SOUTHWEST
            } else {
                PAIR_NORTHWEST_SOUTHEAST
            }
        }
        PAIR_NORTHEAST_SOUTHWEST => {
            if rng.random::<bool>() {
                PAIR_NORTHWEST_SOUTHEAST
            } else {
                PAIR_EAST_WEST
            }
        }
        PAIR_NORTHWEST_SOUTHEAST => {
            if rng.random::<bool>() {
                PAIR_EAST_WEST
            } else {
                PAIR_NORTHEAST_SOUTHWEST
            }
        }
        TRIANGLE_EVEN => TRIANGLE_ODD,
        TRIANGLE_ODD => TRIANGLE_EVEN,
        _ => return cell,
    };
    Cell::from_bits(bits)
}

/// Random stream used for row `y` during the step seeded with `step_seed`
#[inline]
fn row_rng(step_seed: u64, y: usize) -> Pcg32 {
    Pcg32::new(step_seed, y as u64)
}

fn collide_row(row: &mut [Cell], rng: &mut Pcg32) -> usize {
    let mut changed = 0;
    for cell in row.iter_mut().filter(|c| !c.is_solid()) {
        let after = collide(*cell, rng);
        if after != *cell {
            *cell = after;
            changed += 1;
        }
    }
    changed
}

/// Collide every non-solid cell of `grid` in place.
///
/// Each row draws from its own stream split off `step_seed`, so the result
/// is identical whether rows run serially or in parallel.
/// Returns the number of cells that changed. A zero-width grid has no rows
/// and changes nothing.
pub fn collide_grid(grid: &mut Grid, step_seed: u64) -> usize {
    let width = grid.width();
    if width == 0 {
        return 0;
    }
    let cells = grid.cells_mut();

    #[cfg(feature = "parallel")]
    let changed: usize = {
        use rayon::prelude::*;

        cells
            .par_chunks_mut(width)
            .enumerate()
            .map(|(y, row)| collide_row(row, &mut row_rng(step_seed, y)))
            .sum()
    };

    #[cfg(not(feature = "parallel"))]
    let changed: usize = cells
        .chunks_mut(width)
        .enumerate()
        .map(|(y, row)| collide_row(row, &mut row_rng(step_seed, y)))
        .sum();

    changed
}
