//! A live cell dies if it has fewer than two live neighbors.
//! A live cell with two or three live neighbors lives on to the next generation.
//! A live cell with more than three live neighbors dies.
//! A dead cell will be brought back to live if it has exactly three live neighbors.
//!
//! The grid has hard edges: positions outside of it are never counted as neighbors.

pub mod error;
pub mod grid;
pub mod pattern;
pub mod session;

pub use error::Error;
pub use grid::{Cell, LifeGrid};
pub use pattern::Pattern;
pub use session::Session;
