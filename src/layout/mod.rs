//! Layout module: geometry primitives and the centering controller.
//!
//! This module contains:
//! - [`Rect`]: A positioned rectangle (blit destination regions)
//! - [`Extent`]: A bare width x height (window/buffer sizes)
//! - [`Centering`]: Offset computation placing the logical grid inside a
//!   possibly larger physical window
//! - [`WindowGeometry`]: A snapshot of the window/buffer/offset relationship

mod centering;
mod rect;

pub use centering::{validate_geometry, Centering, WindowGeometry};
pub use rect::{Extent, Rect};
