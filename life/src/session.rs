//! The state a front end drives: the current generation plus play controls.

use crate::error::Error;
use crate::grid::{Cell, LifeGrid};
use crate::pattern::Pattern;
use log::{debug, trace};

pub struct Session {
    grid: LifeGrid,
    seeded: LifeGrid,
    seed: &'static Pattern,
    running: bool,
    generation: u64,
}

impl Session {
    /// A stopped session whose grid holds `seed`.
    pub fn new(size: usize, seed: &'static Pattern) -> Result<Self, Error> {
        let seeded = LifeGrid::with_pattern(size, seed)?;
        Ok(Session {
            grid: seeded.clone(),
            seeded,
            seed,
            running: false,
            generation: 0,
        })
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn seed(&self) -> &'static Pattern {
        self.seed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&mut self) {
        if !self.running {
            debug!("started at generation {}", self.generation);
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!("stopped at generation {}", self.generation);
        }
        self.running = false;
    }

    pub fn toggle_running(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Replaces the grid with its next generation, running or not.
    pub fn step(&mut self) {
        self.grid = self.grid.advance();
        self.generation += 1;
        trace!(
            "generation {}: {} alive",
            self.generation,
            self.grid.population()
        );
    }

    /// Steps only while running. Returns whether the grid changed hands.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.step();
        true
    }

    /// Puts the seed pattern back on an otherwise empty grid. Play state is kept.
    pub fn restart(&mut self) {
        self.grid = self.seeded.clone();
        self.generation = 0;
        debug!("restarted from {:?}", self.seed.name);
    }

    /// Switches to a new seed pattern and restarts from it.
    ///
    /// A pattern that does not fit the grid is rejected and the session is left as it was.
    pub fn set_seed(&mut self, seed: &'static Pattern) -> Result<(), Error> {
        self.seeded = LifeGrid::with_pattern(self.grid.size(), seed)?;
        self.seed = seed;
        self.restart();
        Ok(())
    }

    pub fn toggle_cell(&mut self, x: isize, y: isize) -> Result<Cell, Error> {
        self.grid.toggle(x, y)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn randomize(&mut self, density: f64) {
        self.grid.randomize(density);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{BLINKER, BLOCK, DEFAULT_SEED, GLIDER, PATTERNS};

    #[test]
    fn test_new_session() {
        let session = Session::new(50, &DEFAULT_SEED).unwrap();
        assert!(!session.is_running());
        assert_eq!(session.generation(), 0);
        assert_eq!(session.grid().size(), 50);
        assert_eq!(session.grid().population(), 5);
        assert_eq!(session.seed().name, "Default");
    }

    #[test]
    fn test_seed_must_fit() {
        assert_eq!(
            Session::new(3, &DEFAULT_SEED).err(),
            Some(Error::OutOfBounds { x: 2, y: 3, size: 3 })
        );
    }

    #[test]
    fn test_tick_only_while_running() {
        let mut session = Session::new(10, &BLINKER).unwrap();
        let seeded = session.grid().clone();

        assert!(!session.tick());
        assert_eq!(session.grid(), &seeded);
        assert_eq!(session.generation(), 0);

        session.start();
        assert!(session.tick());
        assert_eq!(session.grid(), &seeded.advance());
        assert_eq!(session.generation(), 1);

        session.toggle_running();
        assert!(!session.is_running());
        assert!(!session.tick());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_step_while_stopped() {
        let mut session = Session::new(10, &BLINKER).unwrap();
        let seeded = session.grid().clone();
        session.step();
        session.step();
        assert!(!session.is_running());
        assert_eq!(session.generation(), 2);
        assert_eq!(session.grid(), &seeded);
    }

    #[test]
    fn test_restart() {
        let mut session = Session::new(10, &DEFAULT_SEED).unwrap();
        let seeded = session.grid().clone();
        session.start();
        session.step();
        session.toggle_cell(9, 9).unwrap();

        session.restart();
        assert_eq!(session.grid(), &seeded);
        assert_eq!(session.generation(), 0);
        assert!(session.is_running());
    }

    #[test]
    fn test_toggle_cell() {
        let mut session = Session::new(10, &DEFAULT_SEED).unwrap();
        assert_eq!(session.toggle_cell(5, 5), Ok(Cell::Alive));
        assert_eq!(session.grid().population(), 6);

        let before = session.grid().clone();
        assert!(session.toggle_cell(10, 5).is_err());
        assert_eq!(session.grid(), &before);
    }

    #[test]
    fn test_clear_and_randomize() {
        let mut session = Session::new(10, &DEFAULT_SEED).unwrap();
        session.clear();
        assert_eq!(session.grid().population(), 0);
        session.randomize(1.0);
        assert_eq!(session.grid().population(), 100);
    }

    #[test]
    fn test_restart_after_clear() {
        let mut session = Session::new(10, &BLINKER).unwrap();
        session.clear();
        session.restart();
        assert_eq!(session.grid(), &LifeGrid::with_pattern(10, &BLINKER).unwrap());
    }

    #[test]
    fn test_set_seed() {
        let mut session = Session::new(10, &DEFAULT_SEED).unwrap();
        session.step();
        session.set_seed(&BLOCK).unwrap();
        assert_eq!(session.seed().name, "Block");
        assert_eq!(session.generation(), 0);
        assert_eq!(session.grid(), &LifeGrid::with_pattern(10, &BLOCK).unwrap());

        session.toggle_cell(9, 9).unwrap();
        session.restart();
        assert_eq!(session.grid().population(), 4);
    }

    #[test]
    fn test_set_seed_too_large() {
        let mut session = Session::new(3, &GLIDER).unwrap();
        session.toggle_cell(0, 0).unwrap();
        let before = session.grid().clone();

        assert_eq!(
            session.set_seed(&BLINKER),
            Err(Error::OutOfBounds { x: 2, y: 3, size: 3 })
        );
        assert_eq!(session.seed().name, "Glider");
        assert_eq!(session.grid(), &before);

        session.restart();
        assert_eq!(session.grid(), &LifeGrid::with_pattern(3, &GLIDER).unwrap());
    }

    #[test]
    fn test_every_pattern_seeds_a_small_grid() {
        for pattern in PATTERNS {
            let mut session = Session::new(5, &DEFAULT_SEED).unwrap();
            session.set_seed(pattern).unwrap();
            assert_eq!(session.grid().population(), pattern.cells.len());
        }
    }
}
