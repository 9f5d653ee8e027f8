//! Message types published by the frame loop.

/// Events from the frame loop thread.
///
/// Sent on a small bounded channel with drop-on-full semantics: a slow or
/// absent consumer never blocks rendering.
#[derive(Debug, Clone)]
pub enum FrameEvent {
    /// A frame was blitted to the surface.
    Rendered {
        /// Frame number (monotonically increasing).
        frame: u64,
        /// Time spent building and flushing the frame, in microseconds.
        render_us: u64,
        /// Number of cells blitted.
        cells: usize,
    },

    /// The centering offsets moved (window geometry changed).
    Recentered {
        /// New column offset of the logical grid.
        x_offset: u16,
        /// New row offset of the logical grid.
        y_offset: u16,
    },

    /// The host rejected a blit; the frame was dropped and the loop
    /// continues.
    BlitFailed {
        /// Human-readable description of the host error.
        detail: String,
    },
}
