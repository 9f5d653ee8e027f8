//! `AnsiSurface`: the production render surface over an ANSI terminal.
//!
//! The surface owns stdout for the lifetime of the session. Acquisition
//! enters the alternate screen and hides the cursor; both are restored in
//! `Drop`, on every exit path.

use super::output::AnsiWriter;
use super::{FontChange, FontFace, RenderSurface};
use crate::buffer::{Color, PackedCell};
use crate::error::{Error, Result};
use crate::layout::{Extent, Rect};
use crossterm::tty::IsTty;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetSize},
};
use std::io::{self, Stdout};

/// Render surface backed by an ANSI terminal on stdout.
///
/// Blits are accumulated into a reused byte buffer and flushed in a single
/// syscall. ANSI terminals expose one size, so the window and buffer
/// extents both map to it; and there is no portable font-change protocol,
/// so `set_font` always reports the request as unsupported.
///
/// Acquire at most once per process: the terminal state saved at
/// acquisition is restored on drop, and nested acquisitions would restore
/// it twice.
pub struct AnsiSurface {
    /// Terminal stdout handle, exclusively owned.
    stdout: Stdout,
    /// Pre-allocated output buffer, reused across blits.
    writer: AnsiWriter,
}

impl AnsiSurface {
    /// Open the terminal device.
    ///
    /// # Errors
    /// Returns [`Error::DeviceUnavailable`] when stdout is not attached to
    /// a terminal or the terminal refuses the size query or mode switch.
    pub fn acquire() -> Result<Self> {
        let mut stdout = io::stdout();
        if !stdout.is_tty() {
            return Err(Error::DeviceUnavailable(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdout is not attached to a terminal",
            )));
        }
        terminal::size().map_err(Error::DeviceUnavailable)?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide).map_err(Error::DeviceUnavailable)?;

        tracing::info!("render surface acquired");
        Ok(Self {
            stdout,
            writer: AnsiWriter::new(),
        })
    }
}

impl RenderSurface for AnsiSurface {
    fn window_extent(&mut self) -> Result<Extent> {
        terminal::size()
            .map(|(width, height)| Extent::new(width, height))
            .map_err(Error::DeviceUnavailable)
    }

    fn buffer_extent(&mut self) -> Result<Extent> {
        // One size fits all: ANSI terminals have no scrollback extent
        // distinct from the visible window.
        self.window_extent()
    }

    fn set_window_extent(&mut self, extent: Extent) -> Result<()> {
        execute!(self.stdout, SetSize(extent.width, extent.height)).map_err(Error::RenderFailed)
    }

    fn set_buffer_extent(&mut self, extent: Extent) -> Result<()> {
        self.set_window_extent(extent)
    }

    fn blit(&mut self, cells: &[PackedCell], source: Extent, dest: Rect) -> Result<()> {
        debug_assert_eq!(cells.len(), source.area() as usize);
        debug_assert_eq!(dest.extent(), source);
        if source.is_empty() {
            return Ok(());
        }

        self.writer.clear();
        let width = source.width as usize;
        for (row, line) in cells.chunks(width).enumerate() {
            self.writer.cursor_move(dest.x, dest.y + row as u16);
            // Color runs: re-emit SGR only when the pair changes.
            let mut current: Option<(Color, Color)> = None;
            for cell in line {
                let colors = (cell.foreground(), cell.background());
                if current != Some(colors) {
                    self.writer.set_colors(colors.0, colors.1);
                    current = Some(colors);
                }
                self.writer.push_char(cell.character());
            }
        }
        self.writer.reset_attrs();
        self.writer
            .flush_to(&mut self.stdout)
            .map_err(Error::RenderFailed)
    }

    fn set_font(&mut self, requested: &FontFace) -> Result<FontChange> {
        Err(Error::FontUnsupported(format!(
            "ANSI terminals expose no font protocol (requested {} {}pt)",
            requested.name, requested.size
        )))
    }
}

impl Drop for AnsiSurface {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        tracing::info!("render surface released");
    }
}
