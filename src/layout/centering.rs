//! Centering: placing the logical grid inside the physical window.
//!
//! When the physical window is larger than the logical grid, the grid is
//! blitted at an offset that centers it. The offset only moves when the
//! window geometry moves, and the change flag drives the frame loop's
//! clear-before-blit policy: a full-surface clear is issued only on a
//! geometry change, never every frame.

use super::rect::Extent;
use crate::error::{Error, Result};

/// A snapshot of the window/buffer/offset relationship.
///
/// Invariant: `window` fits within `buffer` per axis (the host enforces
/// this too; see [`validate_geometry`]). The offsets place the logical
/// grid inside the physical window and never resize anything themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    /// The physical (visible) window extent.
    pub window: Extent,
    /// The physical buffer extent, at least as large as the window.
    pub buffer: Extent,
    /// Column offset of the logical grid inside the window.
    pub x_offset: u16,
    /// Row offset of the logical grid inside the window.
    pub y_offset: u16,
}

/// Validate that a window extent does not exceed a buffer extent.
///
/// # Errors
/// Returns [`Error::InvalidGeometry`] when the window is wider or taller
/// than the buffer.
pub fn validate_geometry(window: Extent, buffer: Extent) -> Result<()> {
    if window.fits_within(&buffer) {
        Ok(())
    } else {
        Err(Error::InvalidGeometry { window, buffer })
    }
}

/// Offset state for centering the logical grid in the physical window.
///
/// `recompute` is called once per frame with the current physical window
/// and logical grid extents; the returned change flag tells the caller
/// whether stale margins may remain on the surface from the previous
/// placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Centering {
    x_offset: u16,
    y_offset: u16,
}

impl Centering {
    /// Create a controller with zero offsets.
    #[inline]
    pub const fn new() -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
        }
    }

    /// The last computed offsets as `(x, y)`.
    #[inline]
    pub const fn offsets(&self) -> (u16, u16) {
        (self.x_offset, self.y_offset)
    }

    /// Recompute the centering offsets for the given physical window and
    /// logical grid extents.
    ///
    /// Each offset is `(physical - logical) / 2` with floor division,
    /// saturating at zero when the window is smaller than the grid.
    /// Returns whether either offset moved since the last computation,
    /// along with the new `(x, y)` offsets.
    pub fn recompute(&mut self, window: Extent, logical: Extent) -> (bool, (u16, u16)) {
        let x = window.width.saturating_sub(logical.width) / 2;
        let y = window.height.saturating_sub(logical.height) / 2;
        let changed = x != self.x_offset || y != self.y_offset;
        self.x_offset = x;
        self.y_offset = y;
        (changed, (x, y))
    }

    /// Build a [`WindowGeometry`] snapshot from the current offsets.
    #[inline]
    pub const fn geometry(&self, window: Extent, buffer: Extent) -> WindowGeometry {
        WindowGeometry {
            window,
            buffer,
            x_offset: self.x_offset,
            y_offset: self.y_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centering_formula() {
        let mut centering = Centering::new();
        let (_, offsets) = centering.recompute(Extent::new(100, 41), Extent::new(80, 25));
        assert_eq!(offsets, (10, 8));
    }

    #[test]
    fn test_centering_floor_division() {
        let mut centering = Centering::new();
        // Odd differences floor: (101-80)/2 = 10, (40-25)/2 = 7.
        let (_, offsets) = centering.recompute(Extent::new(101, 40), Extent::new(80, 25));
        assert_eq!(offsets, (10, 7));
    }

    #[test]
    fn test_centering_clamps_at_zero() {
        let mut centering = Centering::new();
        // Window smaller than the grid on both axes.
        let (_, offsets) = centering.recompute(Extent::new(40, 10), Extent::new(80, 25));
        assert_eq!(offsets, (0, 0));
    }

    #[test]
    fn test_changed_flag() {
        let mut centering = Centering::new();
        let window = Extent::new(100, 40);
        let logical = Extent::new(80, 25);

        // First recompute lands on (10, 7): a move from the initial (0, 0).
        let (changed, _) = centering.recompute(window, logical);
        assert!(changed);

        // Same inputs: no move.
        let (changed, _) = centering.recompute(window, logical);
        assert!(!changed);

        // Wider window: x moves.
        let (changed, offsets) = centering.recompute(Extent::new(120, 40), logical);
        assert!(changed);
        assert_eq!(offsets, (20, 7));
    }

    #[test]
    fn test_exact_fit_means_zero_offsets() {
        let mut centering = Centering::new();
        let size = Extent::new(80, 25);
        let (changed, offsets) = centering.recompute(size, size);
        assert!(!changed);
        assert_eq!(offsets, (0, 0));
    }

    #[test]
    fn test_validate_geometry() {
        assert!(validate_geometry(Extent::new(80, 25), Extent::new(80, 25)).is_ok());
        assert!(validate_geometry(Extent::new(80, 25), Extent::new(100, 40)).is_ok());

        let err = validate_geometry(Extent::new(100, 100), Extent::new(80, 80));
        assert!(matches!(err, Err(Error::InvalidGeometry { .. })));

        // A single oversized axis is rejected.
        let err = validate_geometry(Extent::new(100, 25), Extent::new(80, 80));
        assert!(matches!(err, Err(Error::InvalidGeometry { .. })));
    }

    #[test]
    fn test_geometry_snapshot() {
        let mut centering = Centering::new();
        centering.recompute(Extent::new(100, 40), Extent::new(80, 25));
        let geometry = centering.geometry(Extent::new(100, 40), Extent::new(120, 50));
        assert_eq!(geometry.x_offset, 10);
        assert_eq!(geometry.y_offset, 7);
        assert!(geometry.window.fits_within(&geometry.buffer));
    }
}
