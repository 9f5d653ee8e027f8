//! # Blitgrid
//!
//! A double-buffered cell-grid renderer for terminal surfaces.
//!
//! Blitgrid maintains an in-memory grid of styled characters and flushes it
//! to the host terminal in bulk, one blit per frame, instead of issuing one
//! write per character.
//!
//! ## Core Concepts
//!
//! - **Packed cells**: character + foreground + background in one `u32`
//! - **Owned screen buffer**: row-major grid with cursor, partial copy on resize
//! - **Injected surface**: the host device sits behind [`RenderSurface`],
//!   so tests render against a fake instead of a terminal
//! - **Paced frame loop**: a dedicated thread re-centers and blits at a
//!   configured framerate, cancellable and joinable
//!
//! ## Example
//!
//! ```rust,ignore
//! use blitgrid::{Console, ConsoleConfig};
//!
//! let console = Console::acquire(ConsoleConfig::default())?;
//! console.write_at("HELLO", 10, 6, blitgrid::Color::White, blitgrid::Color::Black);
//! // the frame loop blits in the background; shut down when done
//! console.shutdown();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod error;
pub mod layout;
pub mod surface;

// Re-exports for convenience
pub use actor::{Console, ConsoleConfig, FrameEvent, FrameLoop, FrameStats};
pub use buffer::{Color, PackedCell, ScreenBuffer};
pub use error::{Error, Result};
pub use layout::{Centering, Extent, Rect, WindowGeometry};
pub use surface::{AnsiSurface, FontChange, FontFace, RenderSurface};
