//! Lattice storage and the current/next double buffer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::lattice::Direction;
use crate::error::{LatticeError, Result};

/// A `height × width` array of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Unchecked serialized form of a `Grid`
#[derive(Deserialize)]
struct GridSnapshot {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = LatticeError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self> {
        Grid::from_cells(snapshot.width, snapshot.height, snapshot.cells)
    }
}

impl Grid {
    /// Empty grid. `width * height` must not overflow; `SceneConfig::validate`
    /// guarantees this for every lattice the engine builds.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    /// Grid from row-major cells; the length must be exactly `width * height`
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        match width.checked_mul(height) {
            Some(len) if len == cells.len() => Ok(Self {
                width,
                height,
                cells,
            }),
            _ => Err(LatticeError::Configuration(format!(
                "{} cells do not fill a {width}x{height} grid",
                cells.len()
            ))),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(self.index(x, y))
        } else {
            Err(LatticeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Checked read
    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        let i = self.check_bounds(x, y)?;
        Ok(self.cells[i])
    }

    /// Checked write
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let i = self.check_bounds(x, y)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Read for coordinates already known to be in range
    #[inline]
    pub(crate) fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let i = self.index(x, y);
        self.cells[i] = cell;
    }

    /// OR a particle into a cell. Never overwrites bits already present.
    #[inline]
    pub(crate) fn deposit(&mut self, x: usize, y: usize, dir: Direction) {
        let i = self.index(x, y);
        self.cells[i] = self.cells[i].with_direction(dir, true);
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Raw cell bytes, row-major, for upload to a renderer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Remove every particle, keeping walls
    pub fn clear_particles(&mut self) {
        for cell in &mut self.cells {
            *cell = cell.without_particles();
        }
    }

    /// Total particles on the lattice
    pub fn particle_count(&self) -> u64 {
        self.cells.iter().map(|c| c.particle_count() as u64).sum()
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_solid()).count()
    }

    /// Total momentum on the lattice
    pub fn momentum(&self) -> Vec2 {
        self.cells.iter().map(|c| c.momentum()).sum()
    }
}

/// Two same-shaped grids whose roles swap after every propagation
#[derive(Debug, Clone)]
pub struct GridState {
    current: Grid,
    next: Grid,
}

impl GridState {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            current: Grid::new(width, height),
            next: Grid::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.current.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.current.height
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn next(&self) -> &Grid {
        &self.next
    }

    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    /// Borrow (current, next) at once
    pub fn buffers_mut(&mut self) -> (&mut Grid, &mut Grid) {
        (&mut self.current, &mut self.next)
    }

    /// Mark a cell solid in both buffers
    pub fn set_solid(&mut self, x: usize, y: usize) -> Result<()> {
        self.current.set(x, y, Cell::SOLID)?;
        self.next.set(x, y, Cell::SOLID)
    }

    /// Exchange the roles of the two buffers
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(4, 3);
        assert!(grid.get(3, 2).is_ok());
        assert!(matches!(
            grid.get(4, 0),
            Err(LatticeError::OutOfBounds { x: 4, y: 0, width: 4, height: 3 })
        ));
        assert!(grid.get(0, 3).is_err());
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut grid = Grid::new(3, 3);
        grid.deposit(1, 1, Direction::East);
        grid.deposit(1, 1, Direction::West);
        grid.deposit(1, 1, Direction::East);
        let cell = grid.cell(1, 1);
        assert_eq!(cell, Cell::with_directions(&[Direction::East, Direction::West]));
        assert_eq!(grid.particle_count(), 2);
    }

    #[test]
    fn test_as_bytes_is_row_major() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 1, Cell::SOLID).unwrap();
        grid.set(1, 0, Cell::with_directions(&[Direction::NorthWest])).unwrap();
        assert_eq!(grid.as_bytes(), &[0, 0b100, 0, 0, 0, Cell::SOLID.bits()]);
        assert_eq!(grid.row(1)[2], Cell::SOLID);
    }

    #[test]
    fn test_swap_exchanges_buffers() {
        let mut state = GridState::new(3, 3);
        state.current_mut().set(1, 1, Cell::with_directions(&[Direction::East])).unwrap();
        state.swap();
        assert!(state.current().get(1, 1).unwrap().is_empty());
        assert!(state.next().get(1, 1).unwrap().has_direction(Direction::East));
    }

    #[test]
    fn test_set_solid_marks_both_buffers() {
        let mut state = GridState::new(3, 3);
        state.set_solid(0, 2).unwrap();
        assert!(state.current().get(0, 2).unwrap().is_solid());
        assert!(state.next().get(0, 2).unwrap().is_solid());
        assert!(state.set_solid(3, 0).is_err());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut grid = Grid::new(4, 3);
        grid.set(0, 0, Cell::SOLID).unwrap();
        grid.set(2, 1, Cell::with_directions(&[Direction::East, Direction::SouthWest])).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert_eq!(back.get(2, 1).unwrap().particle_count(), 2);
    }

    #[test]
    fn test_malformed_snapshot_is_rejected() {
        let short = r#"{"width":10,"height":10,"cells":[0,0,0]}"#;
        assert!(serde_json::from_str::<Grid>(short).is_err());

        let overflow = format!(r#"{{"width":{},"height":2,"cells":[]}}"#, usize::MAX);
        assert!(serde_json::from_str::<Grid>(&overflow).is_err());

        assert!(matches!(
            Grid::from_cells(2, 2, vec![Cell::EMPTY; 3]),
            Err(LatticeError::Configuration(_))
        ));
        assert!(Grid::from_cells(2, 2, vec![Cell::EMPTY; 4]).is_ok());
    }

    #[test]
    fn test_clear_particles_keeps_walls() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Cell::SOLID).unwrap();
        grid.set(1, 1, Cell::from_bits(0b11_1111)).unwrap();
        grid.clear_particles();
        assert_eq!(grid.particle_count(), 0);
        assert_eq!(grid.solid_count(), 1);
    }
}
