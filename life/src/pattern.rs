use crate::error::Error;
use crate::grid::{Cell, LifeGrid};

/// A named set of live cells used to seed a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(isize, isize)],
}

impl Pattern {
    /// Marks every cell of the pattern alive. Other cells are left as they are.
    ///
    /// Fails without touching the grid if any cell of the pattern does not fit.
    pub fn apply(&self, grid: &mut LifeGrid) -> Result<(), Error> {
        for &(x, y) in self.cells {
            grid.get(x, y)?;
        }
        for &(x, y) in self.cells {
            grid.set(x, y, Cell::Alive)?;
        }
        Ok(())
    }
}

/// The pattern a fresh game starts from and restarts to: a glider heading towards (+x, +y).
pub const DEFAULT_SEED: Pattern = Pattern {
    name: "Default",
    cells: &[(2, 1), (2, 2), (2, 3), (0, 2), (1, 3)],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(1, 1), (1, 2), (2, 1), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(2, 1), (2, 2), (2, 3)],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const PATTERNS: &[Pattern] = &[DEFAULT_SEED, BLOCK, BLINKER, GLIDER];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_pattern() {
        let mut grid = LifeGrid::new(10).unwrap();
        DEFAULT_SEED.apply(&mut grid).unwrap();
        assert_eq!(grid.population(), 5);
        for &(x, y) in DEFAULT_SEED.cells {
            assert_eq!(grid.get(x, y), Ok(Cell::Alive));
        }
    }

    #[test]
    fn test_apply_keeps_other_cells() {
        let mut grid = LifeGrid::new(10).unwrap();
        grid.set(8, 8, Cell::Alive).unwrap();
        BLOCK.apply(&mut grid).unwrap();
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn test_pattern_too_large() {
        let mut grid = LifeGrid::new(3).unwrap();
        assert_eq!(
            BLINKER.apply(&mut grid),
            Err(Error::OutOfBounds { x: 2, y: 3, size: 3 })
        );
        assert_eq!(grid.population(), 0);
        assert!(LifeGrid::with_pattern(3, &DEFAULT_SEED).is_err());
    }

    #[test]
    fn test_pattern_names_unique() {
        let mut names: Vec<_> = PATTERNS.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PATTERNS.len());
    }
}
