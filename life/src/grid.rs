use crate::error::Error;
use crate::grid::Cell::{Alive, Dead};
use crate::pattern::Pattern;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            Dead => Alive,
            Alive => Dead,
        }
    }
}

/// A square grid of cells with hard edges.
///
/// Cells are addressed as `(x, y)` with `x` selecting the row and `y` the column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeGrid {
    cells: Vec<Vec<Cell>>,
}

impl LifeGrid {
    /// Creates a `size` x `size` grid with every cell dead.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::EmptyGrid);
        }
        Ok(LifeGrid {
            cells: vec![vec![Dead; size]; size],
        })
    }

    /// Creates a grid and seeds it with `pattern`.
    pub fn with_pattern(size: usize, pattern: &Pattern) -> Result<Self, Error> {
        let mut grid = LifeGrid::new(size)?;
        pattern.apply(&mut grid)?;
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, x: isize, y: isize) -> Result<Cell, Error> {
        let (row, col) = self.index(x, y)?;
        Ok(self.cells[row][col])
    }

    pub fn set(&mut self, x: isize, y: isize, cell: Cell) -> Result<(), Error> {
        let (row, col) = self.index(x, y)?;
        self.cells[row][col] = cell;
        Ok(())
    }

    /// Flips the cell at `(x, y)` and returns its new state.
    pub fn toggle(&mut self, x: isize, y: isize) -> Result<Cell, Error> {
        let (row, col) = self.index(x, y)?;
        let cell = self.cells[row][col].toggled();
        self.cells[row][col] = cell;
        Ok(cell)
    }

    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(Dead);
        }
    }

    /// Makes each cell alive with probability `density`, clamped to `[0, 1]`.
    /// A NaN density counts as 0.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = if rng.random_bool(density) { Alive } else { Dead };
            }
        }
    }

    pub fn randomize(&mut self, density: f64) {
        self.randomize_with(&mut rand::rng(), density);
    }

    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_alive()).count())
            .sum()
    }

    /// Count the number of alive neighbors for a cell.
    ///
    /// `(x, y)` must lie inside the grid.
    pub fn neighbor_count(&self, x: usize, y: usize) -> usize {
        let size = self.size() as isize;
        let mut count = 0;

        for dx in [-1, 0, 1] {
            for dy in [-1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || nx >= size || ny < 0 || ny >= size {
                    continue;
                }

                if self.cells[nx as usize][ny as usize] == Alive {
                    count += 1;
                }
            }
        }

        count
    }

    /// The state of `(x, y)` in the next generation.
    pub fn next_state(&self, x: usize, y: usize) -> Cell {
        match (self.cells[x][y], self.neighbor_count(x, y)) {
            (Alive, 2..=3) => Alive, // Survives
            (Dead, 3) => Alive,      // Becomes alive
            _ => Dead,               // Dies or remains dead
        }
    }

    /// Computes the next generation into a fresh grid; `self` is left untouched.
    pub fn advance(&self) -> LifeGrid {
        let size = self.size();
        let mut next = vec![vec![Dead; size]; size];

        for (x, y, _) in self.iter() {
            next[x][y] = self.next_state(x, y);
        }

        LifeGrid { cells: next }
    }

    /// Every `(x, y, cell)` of the grid, all of row 0 first, then row 1, and so on.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(x, row)| row.iter().enumerate().map(move |(y, &cell)| (x, y, cell)))
    }

    fn index(&self, x: isize, y: isize) -> Result<(usize, usize), Error> {
        let size = self.size();
        let in_range = |v: isize| v >= 0 && (v as usize) < size;
        if in_range(x) && in_range(y) {
            Ok((x as usize, y as usize))
        } else {
            Err(Error::OutOfBounds { x, y, size })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(size: usize, alive: &[(isize, isize)]) -> LifeGrid {
        let mut grid = LifeGrid::new(size).unwrap();
        for &(x, y) in alive {
            grid.set(x, y, Alive).unwrap();
        }
        grid
    }

    #[test]
    fn test_new_grid_is_dead() {
        let grid = LifeGrid::new(50).unwrap();
        assert_eq!(grid.size(), 50);
        assert!(grid.iter().all(|(_, _, cell)| cell == Dead));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(LifeGrid::new(0), Err(Error::EmptyGrid));
    }

    #[test]
    fn test_set_get() {
        let mut grid = LifeGrid::new(10).unwrap();
        grid.set(3, 4, Alive).unwrap();
        assert_eq!(grid.get(3, 4), Ok(Alive));
        assert_eq!(grid.get(4, 3), Ok(Dead));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = LifeGrid::new(10).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 10), (-1, 10)] {
            assert_eq!(grid.get(x, y), Err(Error::OutOfBounds { x, y, size: 10 }));
            assert_eq!(grid.set(x, y, Alive), Err(Error::OutOfBounds { x, y, size: 10 }));
            assert!(grid.toggle(x, y).is_err());
        }
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_toggle() {
        let mut grid = LifeGrid::new(5).unwrap();
        assert_eq!(grid.toggle(1, 2), Ok(Alive));
        assert_eq!(grid.get(1, 2), Ok(Alive));
        assert_eq!(grid.toggle(1, 2), Ok(Dead));
        assert_eq!(grid.get(1, 2), Ok(Dead));
    }

    #[test]
    fn test_neighbor_count_full_grid() {
        let mut grid = LifeGrid::new(4).unwrap();
        grid.randomize_with(&mut StdRng::seed_from_u64(1), 1.0);

        assert_eq!(grid.neighbor_count(0, 0), 3);
        assert_eq!(grid.neighbor_count(3, 3), 3);
        assert_eq!(grid.neighbor_count(0, 1), 5);
        assert_eq!(grid.neighbor_count(1, 1), 8);
        for (x, y, _) in grid.iter() {
            assert!(grid.neighbor_count(x, y) <= 8);
        }
    }

    #[test]
    fn test_neighbor_count_ignores_self_and_edges() {
        let grid = grid_with(3, &[(1, 1), (2, 2)]);
        assert_eq!(grid.neighbor_count(1, 1), 1);
        assert_eq!(grid.neighbor_count(0, 0), 1);
        // on a torus (2, 2) would also touch (0, 2)
        assert_eq!(grid.neighbor_count(0, 2), 1);
    }

    #[test]
    fn test_next_state_rules() {
        // Alive centre with 0..=8 neighbours on a 3x3 grid.
        let ring: [(isize, isize); 8] = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        for n in 0..=8 {
            let mut alive: Vec<(isize, isize)> = vec![(1, 1)];
            alive.extend_from_slice(&ring[..n]);
            let grid = grid_with(3, &alive);
            let expected = if n == 2 || n == 3 { Alive } else { Dead };
            assert_eq!(grid.next_state(1, 1), expected, "alive with {n} neighbors");

            let grid = grid_with(3, &ring[..n]);
            let expected = if n == 3 { Alive } else { Dead };
            assert_eq!(grid.next_state(1, 1), expected, "dead with {n} neighbors");
        }
    }

    #[test]
    fn test_isolated_cell_dies() {
        let grid = grid_with(5, &[(2, 2)]);
        assert_eq!(grid.advance().get(2, 2), Ok(Dead));
    }

    #[test]
    fn test_advance_is_pure() {
        let mut grid = LifeGrid::new(8).unwrap();
        grid.randomize_with(&mut StdRng::seed_from_u64(7), 0.4);
        let before = grid.clone();

        let first = grid.advance();
        let second = grid.advance();

        assert_eq!(grid, before);
        assert_eq!(first, second);
        assert_eq!(first.size(), grid.size());
    }

    #[test]
    fn test_iter_covers_grid_once() {
        let grid = LifeGrid::new(6).unwrap();
        let positions: Vec<_> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(positions.len(), 36);

        let mut unique = positions.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 36);

        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[1], (0, 1));
        assert_eq!(positions[6], (1, 0));
        assert_eq!(grid.iter().count(), 36);
    }

    #[test]
    fn test_randomize_density() {
        let mut grid = LifeGrid::new(20).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        grid.randomize_with(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);

        grid.randomize_with(&mut rng, 1.0);
        assert_eq!(grid.population(), 400);

        grid.randomize_with(&mut rng, 0.5);
        let pop = grid.population();
        assert!(pop > 100 && pop < 300);

        grid.clear();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_randomize_clamps_density() {
        let mut grid = LifeGrid::new(10).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        grid.randomize_with(&mut rng, 2.0);
        assert_eq!(grid.population(), 100);

        grid.randomize_with(&mut rng, -1.0);
        assert_eq!(grid.population(), 0);

        grid.randomize_with(&mut rng, f64::INFINITY);
        assert_eq!(grid.population(), 100);
    }

    #[test]
    fn test_randomize_nan_density() {
        let mut grid = LifeGrid::new(10).unwrap();
        grid.randomize_with(&mut StdRng::seed_from_u64(5), 1.0);

        grid.randomize_with(&mut StdRng::seed_from_u64(5), f64::NAN);
        assert_eq!(grid.population(), 0);

        grid.randomize(f64::NAN);
        assert_eq!(grid.population(), 0);
    }
}
