//! Console: the owning coordinator for one rendered screen.
//!
//! A `Console` ties together the three moving parts: the exclusively-owned
//! render surface, the shared logical screen buffer, and the frame loop
//! thread. It is an owned value with an explicit lifecycle - create one
//! per screen, tear it down with [`Console::shutdown`] (or let `Drop` do
//! it), and tests can run any number of them side by side over fake
//! surfaces.

use super::frame::{FrameLoop, FrameStats};
use super::messages::FrameEvent;
use crate::buffer::{Color, ScreenBuffer};
use crate::error::{Error, Result};
use crate::layout::{validate_geometry, Extent};
use crate::surface::{AnsiSurface, FontChange, FontFace, RenderSurface};
use crossbeam_channel::Receiver;
use std::io;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::info;

/// Configuration for a [`Console`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Target frames per second for the frame loop.
    pub framerate: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { framerate: 60 }
    }
}

/// An owned, concurrently-writable screen with a background frame loop.
///
/// All write methods take `&self` and are safe to call from any thread
/// while the loop renders: the screen buffer sits behind a lock whose
/// write side swaps storage and dimensions as one unit, and whose read
/// side covers each blit end to end.
pub struct Console<S: RenderSurface + Send + 'static> {
    /// The host surface, shared with the frame loop.
    surface: Arc<Mutex<S>>,
    /// The logical grid, shared with the frame loop.
    screen: Arc<RwLock<ScreenBuffer>>,
    /// The render thread; taken on shutdown.
    frame_loop: Option<FrameLoop>,
    /// Frame event receiver (clone of the loop's channel).
    events: Receiver<FrameEvent>,
}

impl Console<AnsiSurface> {
    /// Acquire the process terminal and start rendering to it.
    ///
    /// # Errors
    /// Returns [`Error::DeviceUnavailable`] when no terminal can be
    /// acquired. This is fatal: no partial console is left behind.
    pub fn acquire(config: ConsoleConfig) -> Result<Self> {
        Self::with_surface(AnsiSurface::acquire()?, config)
    }
}

impl<S: RenderSurface + Send + 'static> Console<S> {
    /// Start rendering to an already-acquired surface.
    ///
    /// The logical grid is created at the host's current buffer
    /// dimensions.
    ///
    /// # Errors
    /// Propagates the surface's error when the host extent query fails,
    /// and reports [`Error::DeviceUnavailable`] for a zero-sized host.
    pub fn with_surface(mut surface: S, config: ConsoleConfig) -> Result<Self> {
        let buffer = surface.buffer_extent()?;
        if buffer.is_empty() {
            return Err(Error::DeviceUnavailable(io::Error::new(
                io::ErrorKind::InvalidData,
                "host reports a zero-sized buffer",
            )));
        }

        let screen = Arc::new(RwLock::new(ScreenBuffer::new(buffer.width, buffer.height)));
        let surface = Arc::new(Mutex::new(surface));
        let frame_loop = FrameLoop::spawn(surface.clone(), screen.clone(), config.framerate);
        let events = frame_loop.events().clone();

        info!(?buffer, framerate = config.framerate, "console initialized");
        Ok(Self {
            surface,
            screen,
            frame_loop: Some(frame_loop),
            events,
        })
    }

    /// Current logical grid size as `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        let screen = self.read_screen();
        (screen.width(), screen.height())
    }

    /// Current cursor position as `(col, row)`.
    pub fn cursor(&self) -> (u16, u16) {
        self.read_screen().cursor()
    }

    /// Move the cursor, clamped into the grid.
    pub fn set_cursor(&self, col: u16, row: u16) {
        self.write_screen().set_cursor(col, row);
    }

    /// Write `text` starting at `(col, row)` with the given colors.
    ///
    /// See [`ScreenBuffer::write_at`] for the linear-walk semantics.
    pub fn write_at(&self, text: &str, col: u16, row: u16, foreground: Color, background: Color) {
        self.write_screen().write_at(text, col, row, foreground, background);
    }

    /// Write `text` at the cursor with default colors.
    pub fn write(&self, text: &str) {
        self.write_screen().write(text);
    }

    /// Write `text` at the cursor, then move to the start of the next row.
    pub fn write_line(&self, text: &str) {
        self.write_screen().write_line(text);
    }

    /// Clear the grid and reset the cursor.
    pub fn clear(&self) {
        self.write_screen().clear();
    }

    /// Run a closure with exclusive access to the screen buffer.
    ///
    /// For compound edits that must not interleave with a frame: the loop
    /// cannot start a blit while the closure runs.
    pub fn with_screen<R>(&self, f: impl FnOnce(&mut ScreenBuffer) -> R) -> R {
        f(&mut self.write_screen())
    }

    /// Change the host window and buffer extents, then resize the logical
    /// grid to the buffer dimensions.
    ///
    /// The host calls are ordered so the window never momentarily exceeds
    /// the buffer: the buffer is first grown to cover both the old and new
    /// sizes, the window moves, then the buffer shrinks to its target.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGeometry`] (before touching the host) when
    /// `window` exceeds `buffer` on either axis, and propagates host
    /// rejections of the individual size calls.
    pub fn apply_geometry(&self, window: Extent, buffer: Extent) -> Result<()> {
        validate_geometry(window, buffer)?;

        // Lock order: surface, then screen - same as the frame loop.
        let mut surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);

        let current = surface.buffer_extent()?;
        let roomy = Extent::new(
            current.width.max(buffer.width),
            current.height.max(buffer.height),
        );
        if roomy != current {
            surface.set_buffer_extent(roomy)?;
        }
        surface.set_window_extent(window)?;
        if roomy != buffer {
            surface.set_buffer_extent(buffer)?;
        }

        self.write_screen().resize(buffer.width, buffer.height);
        info!(?window, ?buffer, "geometry applied");
        Ok(())
    }

    /// Ask the host to switch fonts.
    ///
    /// Best-effort and cosmetic: compare `requested` with `after` on the
    /// returned [`FontChange`] to see whether the host honored it.
    ///
    /// # Errors
    /// Returns [`Error::FontUnsupported`] when the host rejects the face.
    pub fn set_font(&self, requested: &FontFace) -> Result<FontChange> {
        let mut surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        surface.set_font(requested)
    }

    /// Frame events published by the render loop.
    pub const fn events(&self) -> &Receiver<FrameEvent> {
        &self.events
    }

    /// Snapshot the loop's cumulative render statistics.
    pub fn stats(&self) -> FrameStats {
        self.frame_loop
            .as_ref()
            .map(FrameLoop::stats)
            .unwrap_or_default()
    }

    /// Stop the frame loop and wait for it to finish.
    ///
    /// The surface is released when the `Console` is dropped, after the
    /// loop has stopped touching it.
    pub fn shutdown(mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.join();
        }
        info!("console shut down");
    }

    fn read_screen(&self) -> std::sync::RwLockReadGuard<'_, ScreenBuffer> {
        self.screen.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_screen(&self) -> std::sync::RwLockWriteGuard<'_, ScreenBuffer> {
        self.screen.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: RenderSurface + Send + 'static> Drop for Console<S> {
    fn drop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.join();
        }
    }
}
