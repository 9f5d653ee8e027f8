//! `AnsiWriter`: Single-syscall output buffer for ANSI sequences.

use crate::buffer::Color;
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A whole blit is accumulated here, then flushed in a single `write()`
/// syscall to prevent terminal flickering.
pub struct AnsiWriter {
    data: Vec<u8>,
}

/// SGR foreground code for a palette color.
///
/// The dark half of the palette maps to the base colors (30-37), the
/// bright half to the aixterm range (90-97).
pub(crate) const fn fg_code(color: Color) -> u8 {
    match color {
        Color::Black => 30,
        Color::DarkRed => 31,
        Color::DarkGreen => 32,
        Color::DarkYellow => 33,
        Color::DarkBlue => 34,
        Color::DarkMagenta => 35,
        Color::DarkCyan => 36,
        Color::Gray => 37,
        Color::DarkGray => 90,
        Color::Red => 91,
        Color::Green => 92,
        Color::Yellow => 93,
        Color::Blue => 94,
        Color::Magenta => 95,
        Color::Cyan => 96,
        Color::White => 97,
    }
}

/// SGR background code for a palette color.
pub(crate) const fn bg_code(color: Color) -> u8 {
    fg_code(color) + 10
}

impl AnsiWriter {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Set foreground and background palette colors in one SGR sequence.
    #[inline]
    pub fn set_colors(&mut self, fg: Color, bg: Color) {
        let _ = write!(self.data, "\x1b[{};{}m", fg_code(fg), bg_code(bg));
    }

    /// Append a character.
    #[inline]
    pub fn push_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.data
            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for AnsiWriter {
    fn default() -> Self {
        Self::new()
    }
}
