//! Errors raised by grid access.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Coordinates outside of `[0, size)` on either axis.
    #[error("cell ({x}, {y}) is outside of the {size}x{size} grid")]
    OutOfBounds { x: isize, y: isize, size: usize },
    /// A grid needs at least one cell.
    #[error("grid size should be positive")]
    EmptyGrid,
}
