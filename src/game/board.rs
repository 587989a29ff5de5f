//! Board Geometry
//!
//! The fixed rectangular coordinate space entities move within.
//! Pure containment math, no state beyond the dimensions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for a board constructed with non-positive dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("board dimensions must be positive, got {width}x{height}")]
pub struct InvalidBoard {
    /// Requested width
    pub width: u32,
    /// Requested height
    pub height: u32,
}

/// The arena board: immutable bounds for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    width: f64,
    height: f64,
}

impl Board {
    /// Create a board. Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self, InvalidBoard> {
        if width == 0 || height == 0 {
            return Err(InvalidBoard { width, height });
        }
        Ok(Self {
            width: width as f64,
            height: height as f64,
        })
    }

    /// Board width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Board height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// True iff `(x, y)` lies within the board.
    ///
    /// Bounds are half-open: `0 <= x < width` and `0 <= y < height`.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width && y >= 0.0 && y < self.height
    }
}
