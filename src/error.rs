//! Error types for surface acquisition, geometry changes, and rendering.

use crate::layout::Extent;
use std::io;
use thiserror::Error;

/// Renderer error type.
///
/// Startup failures (`DeviceUnavailable`) abort initialization and are
/// returned to the caller. Steady-state failures (`RenderFailed`) are
/// reported and survivable: the frame loop drops the frame and keeps going.
#[derive(Error, Debug)]
pub enum Error {
    /// The render surface could not be acquired (no terminal attached,
    /// handle refused by the host). Fatal at startup.
    #[error("render surface unavailable: {0}")]
    DeviceUnavailable(#[source] io::Error),

    /// Requested window dimensions exceed the requested buffer dimensions.
    /// The caller must retry with corrected values.
    #[error("window {window:?} must not exceed buffer {buffer:?}")]
    InvalidGeometry {
        /// The rejected window extent.
        window: Extent,
        /// The buffer extent the window was checked against.
        buffer: Extent,
    },

    /// The host rejected a blit or size change. Carries the host's error.
    #[error("host rejected the write: {0}")]
    RenderFailed(#[source] io::Error),

    /// The host rejected a font change. Cosmetic, safe to ignore.
    #[error("font change rejected: {0}")]
    FontUnsupported(String),
}

impl Error {
    /// The host's last OS error code, when one was captured.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            Self::DeviceUnavailable(err) | Self::RenderFailed(err) => err.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, Error>;
