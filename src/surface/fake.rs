//! A recording render surface for tests.
//!
//! `FakeSurface` models the full host contract (separate window/buffer
//! extents, fonts) and records every device call so tests can assert on
//! blit regions, call ordering, and error policy. Clone it before handing
//! it to a `Console`; the clones share state.

use super::{FontChange, FontFace, RenderSurface};
use crate::buffer::PackedCell;
use crate::error::{Error, Result};
use crate::layout::{Extent, Rect};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// One recorded device call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCall {
    /// `set_window_extent` with the requested extent.
    SetWindow(Extent),
    /// `set_buffer_extent` with the requested extent.
    SetBuffer(Extent),
    /// `blit` with its source size and destination region.
    Blit { source: Extent, dest: Rect },
    /// `set_font` with the requested face.
    SetFont(FontFace),
}

/// A captured blit, cells included.
#[derive(Debug, Clone)]
pub(crate) struct BlitRecord {
    pub source: Extent,
    pub dest: Rect,
    pub cells: Vec<PackedCell>,
}

#[derive(Debug)]
struct FakeState {
    window: Extent,
    buffer: Extent,
    font: FontFace,
    calls: Vec<HostCall>,
    blits: Vec<BlitRecord>,
    fail_blits: bool,
    reject_font: bool,
}

/// Shared-state fake surface.
#[derive(Clone)]
pub(crate) struct FakeSurface {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSurface {
    pub fn new(window: Extent, buffer: Extent) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                window,
                buffer,
                font: FontFace::new("Fake Mono", 12),
                calls: Vec::new(),
                blits: Vec::new(),
                fail_blits: false,
                reject_font: false,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    pub fn blits(&self) -> Vec<BlitRecord> {
        self.lock().blits.clone()
    }

    pub fn blit_count(&self) -> usize {
        self.lock().blits.len()
    }

    /// Simulate the user resizing the terminal window.
    pub fn set_host_window(&self, window: Extent) {
        self.lock().window = window;
    }

    pub fn set_fail_blits(&self, fail: bool) {
        self.lock().fail_blits = fail;
    }

    pub fn set_reject_font(&self, reject: bool) {
        self.lock().reject_font = reject;
    }
}

impl RenderSurface for FakeSurface {
    fn window_extent(&mut self) -> Result<Extent> {
        Ok(self.lock().window)
    }

    fn buffer_extent(&mut self) -> Result<Extent> {
        Ok(self.lock().buffer)
    }

    fn set_window_extent(&mut self, extent: Extent) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(HostCall::SetWindow(extent));
        // The host enforces window <= buffer.
        if !extent.fits_within(&state.buffer) {
            return Err(Error::RenderFailed(io::Error::new(
                io::ErrorKind::InvalidInput,
                "window would exceed buffer",
            )));
        }
        state.window = extent;
        Ok(())
    }

    fn set_buffer_extent(&mut self, extent: Extent) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(HostCall::SetBuffer(extent));
        if !state.window.fits_within(&extent) {
            return Err(Error::RenderFailed(io::Error::new(
                io::ErrorKind::InvalidInput,
                "buffer would not cover window",
            )));
        }
        state.buffer = extent;
        Ok(())
    }

    fn blit(&mut self, cells: &[PackedCell], source: Extent, dest: Rect) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(HostCall::Blit { source, dest });
        if state.fail_blits {
            return Err(Error::RenderFailed(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "host rejected the blit",
            )));
        }
        state.blits.push(BlitRecord {
            source,
            dest,
            cells: cells.to_vec(),
        });
        Ok(())
    }

    fn set_font(&mut self, requested: &FontFace) -> Result<FontChange> {
        let mut state = self.lock();
        state.calls.push(HostCall::SetFont(requested.clone()));
        if state.reject_font {
            return Err(Error::FontUnsupported(requested.name.clone()));
        }
        let before = state.font.clone();
        state.font = requested.clone();
        Ok(FontChange {
            before,
            requested: requested.clone(),
            after: state.font.clone(),
        })
    }
}
