//! Surface module: the host device boundary.
//!
//! The render surface is an injected capability: everything that touches
//! the real terminal goes through the [`RenderSurface`] trait, so the rest
//! of the crate (and its tests) never holds a device handle directly.
//!
//! This module contains:
//! - [`RenderSurface`]: the host capability (extents, bulk blit, font)
//! - [`AnsiSurface`]: the production backend over crossterm + ANSI output
//! - [`FontFace`] / [`FontChange`]: the cosmetic font protocol

mod ansi;
mod output;

#[cfg(test)]
pub(crate) mod fake;

pub use ansi::AnsiSurface;
pub use output::AnsiWriter;

use crate::buffer::PackedCell;
use crate::error::Result;
use crate::layout::{Extent, Rect};

/// A monospaced font by name and point size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    /// Face name as the host knows it.
    pub name: String,
    /// Point size.
    pub size: u16,
}

impl FontFace {
    /// Create a font face description.
    pub fn new(name: impl Into<String>, size: u16) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// The outcome of a font change attempt.
///
/// Font selection is best-effort: the host may silently substitute a
/// different face, so callers compare `requested` against `after` to see
/// whether the change actually took effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontChange {
    /// The font in effect before the attempt.
    pub before: FontFace,
    /// The font that was asked for.
    pub requested: FontFace,
    /// The font in effect after the attempt.
    pub after: FontFace,
}

/// The host device capability.
///
/// One implementor owns the one device handle for the process; all device
/// calls in the crate go through it. Every operation may fail with a
/// host-specific error, which is surfaced to the caller, never swallowed
/// at this boundary.
pub trait RenderSurface {
    /// The current physical (visible) window extent.
    fn window_extent(&mut self) -> Result<Extent>;

    /// The current physical buffer extent. At least as large as the
    /// window on hosts that distinguish the two.
    fn buffer_extent(&mut self) -> Result<Extent>;

    /// Ask the host to resize the visible window.
    fn set_window_extent(&mut self, extent: Extent) -> Result<()>;

    /// Ask the host to resize the buffer.
    fn set_buffer_extent(&mut self, extent: Extent) -> Result<()>;

    /// Bulk-write a rectangular grid of cells.
    ///
    /// `cells` is row-major with `source.area()` entries; `dest` addresses
    /// the target region on the host surface and has the same dimensions
    /// as `source`. This is the sole mutation point for screen content.
    fn blit(&mut self, cells: &[PackedCell], source: Extent, dest: Rect) -> Result<()>;

    /// Ask the host to switch to the given font.
    ///
    /// Returns the font state around the attempt so the caller can verify
    /// the change took effect.
    fn set_font(&mut self, requested: &FontFace) -> Result<FontChange>;
}
