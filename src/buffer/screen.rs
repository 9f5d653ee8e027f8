//! `ScreenBuffer`: A grid of packed cells representing the logical screen.
//!
//! Cells are stored in contiguous row-major order (`index = row * width +
//! col`), so the whole grid can be blitted to the host surface in one call.

use super::cell::{Color, PackedCell};

/// The logical screen content: a cell grid plus a cursor.
///
/// The grid always holds exactly `width * height` cells, including across
/// [`ScreenBuffer::resize`]. The cursor is clamped inside the grid at all
/// times.
///
/// Writes address cells by linear index: a write that starts at `(col,
/// row)` fills successive cells in row-major order and stops at the end of
/// the grid. There is no wrapping back to the top and no scrolling.
#[derive(Clone)]
pub struct ScreenBuffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<PackedCell>,
    /// Grid width in columns.
    width: u16,
    /// Grid height in rows.
    height: u16,
    /// Cursor column, `< width`.
    cursor_col: u16,
    /// Cursor row, `< height`.
    cursor_row: u16,
}

impl ScreenBuffer {
    /// Create a new cleared buffer with the given dimensions.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Screen dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![PackedCell::EMPTY; size],
            width,
            height,
            cursor_col: 0,
            cursor_row: 0,
        }
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the underlying cell slice, row-major.
    #[inline]
    pub fn cells(&self) -> &[PackedCell] {
        &self.cells
    }

    /// Get the cursor position as `(col, row)`.
    #[inline]
    pub const fn cursor(&self) -> (u16, u16) {
        (self.cursor_col, self.cursor_row)
    }

    /// Move the cursor, clamping into the grid.
    #[inline]
    pub fn set_cursor(&mut self, col: u16, row: u16) {
        self.cursor_col = col.min(self.width - 1);
        self.cursor_row = row.min(self.height - 1);
    }

    /// Convert `(col, row)` coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, col: u16, row: u16) -> Option<usize> {
        if col < self.width && row < self.height {
            Some((row as usize) * (self.width as usize) + (col as usize))
        } else {
            None
        }
    }

    /// Convert a linear index to `(col, row)` coordinates.
    #[inline]
    pub fn coords_of(&self, index: usize) -> Option<(u16, u16)> {
        if index < self.cells.len() {
            let col = (index % (self.width as usize)) as u16;
            let row = (index / (self.width as usize)) as u16;
            Some((col, row))
        } else {
            None
        }
    }

    /// Get the cell at `(col, row)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, col: u16, row: u16) -> Option<PackedCell> {
        self.index_of(col, row).map(|i| self.cells[i])
    }

    /// Set the cell at `(col, row)`.
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, col: u16, row: u16, cell: PackedCell) -> bool {
        if let Some(idx) = self.index_of(col, row) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Write `text` into successive cells starting at `(col, row)`.
    ///
    /// One cell per `char`, row-major, no wrapping of the start coordinate:
    /// the walk is purely linear and stops at the end of the grid, silently
    /// truncating the rest of `text`. A start beyond the grid writes
    /// nothing.
    ///
    /// The cursor always ends at the index following the last written cell,
    /// clamped to the last valid index, re-expressed as `(index % width,
    /// index / width)`.
    pub fn write_at(&mut self, text: &str, col: u16, row: u16, foreground: Color, background: Color) {
        let width = self.width as usize;
        let len = self.cells.len();
        let mut index = (row as usize) * width + (col as usize);
        for ch in text.chars() {
            if index >= len {
                break;
            }
            self.cells[index] = PackedCell::pack(ch, foreground, background);
            index += 1;
        }
        let resting = index.min(len - 1);
        self.cursor_col = (resting % width) as u16;
        self.cursor_row = (resting / width) as u16;
    }

    /// Write `text` at the cursor with default colors.
    pub fn write(&mut self, text: &str) {
        let (col, row) = self.cursor();
        self.write_at(text, col, row, Color::DEFAULT_FG, Color::DEFAULT_BG);
    }

    /// Write `text` at the cursor, then move to the start of the next row.
    ///
    /// The row advance clamps to the last row; writing lines past the
    /// bottom keeps overwriting the bottom row rather than scrolling.
    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.cursor_col = 0;
        self.cursor_row = (self.cursor_row + 1).min(self.height - 1);
    }

    /// Clear the grid and reset the cursor to the origin.
    pub fn clear(&mut self) {
        self.cells.fill(PackedCell::EMPTY);
        self.cursor_col = 0;
        self.cursor_row = 0;
    }

    /// Resize the grid in place, preserving the overlapping rectangle.
    ///
    /// New storage is allocated and the `(min(w, w'), min(h, h'))` overlap
    /// is copied row by row; everything outside it starts cleared. The
    /// cursor is clamped into the new grid.
    ///
    /// # Panics
    /// Panics if either new dimension is 0.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        assert!(
            new_width > 0 && new_height > 0,
            "Screen dimensions must be non-zero"
        );
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = (new_width as usize) * (new_height as usize);
        let mut new_cells = vec![PackedCell::EMPTY; new_size];

        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for row in 0..copy_height {
            let old_start = row * (self.width as usize);
            let new_start = row * (new_width as usize);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
        self.cursor_col = self.cursor_col.min(new_width - 1);
        self.cursor_row = self.cursor_row.min(new_height - 1);
    }
}

impl std::fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cursor", &self.cursor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let screen = ScreenBuffer::new(80, 25);
        assert_eq!(screen.width(), 80);
        assert_eq!(screen.height(), 25);
        assert_eq!(screen.len(), 80 * 25);
        assert_eq!(screen.cursor(), (0, 0));
        assert_eq!(screen.get(79, 24), Some(PackedCell::EMPTY));
    }

    #[test]
    #[should_panic]
    fn test_zero_width() {
        ScreenBuffer::new(0, 25);
    }

    #[test]
    fn test_index_coords() {
        let screen = ScreenBuffer::new(80, 25);
        assert_eq!(screen.index_of(5, 10), Some(10 * 80 + 5));
        assert_eq!(screen.coords_of(10 * 80 + 5), Some((5, 10)));
        assert_eq!(screen.index_of(80, 0), None);
        assert_eq!(screen.coords_of(80 * 25), None);
    }

    #[test]
    fn test_write_at_hello() {
        let mut screen = ScreenBuffer::new(80, 25);
        screen.write_at("HELLO", 10, 6, Color::DEFAULT_FG, Color::DEFAULT_BG);

        for (i, expected) in "HELLO".chars().enumerate() {
            let (ch, fg, bg) = screen.cells()[6 * 80 + 10 + i].unpack();
            assert_eq!(ch, expected);
            assert_eq!(fg, Color::DEFAULT_FG);
            assert_eq!(bg, Color::DEFAULT_BG);
        }
        assert_eq!(screen.cursor(), (15, 6));
    }

    #[test]
    fn test_write_at_truncates_at_end() {
        let mut screen = ScreenBuffer::new(10, 2);
        // 5 cells remain from (5, 1); the rest of the text is dropped.
        screen.write_at("ABCDEFGH", 5, 1, Color::White, Color::Black);

        assert_eq!(screen.get(5, 1).unwrap().character(), 'A');
        assert_eq!(screen.get(9, 1).unwrap().character(), 'E');
        // Cursor rests on the last valid index.
        assert_eq!(screen.cursor(), (9, 1));
    }

    #[test]
    fn test_write_at_spills_across_rows() {
        let mut screen = ScreenBuffer::new(10, 3);
        screen.write_at("ABCD", 8, 0, Color::White, Color::Black);

        assert_eq!(screen.get(8, 0).unwrap().character(), 'A');
        assert_eq!(screen.get(9, 0).unwrap().character(), 'B');
        assert_eq!(screen.get(0, 1).unwrap().character(), 'C');
        assert_eq!(screen.get(1, 1).unwrap().character(), 'D');
        assert_eq!(screen.cursor(), (2, 1));
    }

    #[test]
    fn test_write_at_out_of_range_start() {
        let mut screen = ScreenBuffer::new(10, 2);
        screen.write_at("XYZ", 0, 5, Color::White, Color::Black);

        // Nothing written, cursor clamped to the last cell.
        assert!(screen.cells().iter().all(|c| *c == PackedCell::EMPTY));
        assert_eq!(screen.cursor(), (9, 1));
    }

    #[test]
    fn test_write_advances_from_cursor() {
        let mut screen = ScreenBuffer::new(20, 5);
        screen.write("AB");
        screen.write("CD");

        assert_eq!(screen.get(0, 0).unwrap().character(), 'A');
        assert_eq!(screen.get(3, 0).unwrap().character(), 'D');
        assert_eq!(screen.cursor(), (4, 0));
    }

    #[test]
    fn test_write_line_advances_row() {
        let mut screen = ScreenBuffer::new(20, 5);
        screen.write_line("first");
        screen.write_line("second");

        assert_eq!(screen.get(0, 0).unwrap().character(), 'f');
        assert_eq!(screen.get(0, 1).unwrap().character(), 's');
        assert_eq!(screen.cursor(), (0, 2));
    }

    #[test]
    fn test_write_line_clamps_to_bottom_row() {
        // Tall-and-narrow grid: the clamp must track height, not width.
        let mut screen = ScreenBuffer::new(4, 10);
        for _ in 0..20 {
            screen.write_line("x");
        }
        assert_eq!(screen.cursor(), (0, 9));
    }

    #[test]
    fn test_clear_resets_cells_and_cursor() {
        let mut screen = ScreenBuffer::new(10, 4);
        screen.write_at("data", 2, 2, Color::Red, Color::Blue);
        screen.clear();

        assert!(screen.cells().iter().all(|c| *c == PackedCell::EMPTY));
        assert_eq!(screen.cursor(), (0, 0));
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut screen = ScreenBuffer::new(80, 25);
        screen.write_at("keep", 10, 6, Color::Yellow, Color::Black);
        screen.write_at("drop", 50, 6, Color::Yellow, Color::Black);

        screen.resize(40, 25);
        assert_eq!(screen.width(), 40);
        assert_eq!(screen.len(), 40 * 25);

        // Column 10 survives identically; column 50 is gone.
        assert_eq!(screen.get(10, 6).unwrap().character(), 'k');
        assert_eq!(screen.get(13, 6).unwrap().character(), 'p');
        assert_eq!(screen.get(10, 6).unwrap().foreground(), Color::Yellow);
        assert_eq!(screen.index_of(50, 6), None);
    }

    #[test]
    fn test_resize_grow_clears_new_cells() {
        let mut screen = ScreenBuffer::new(10, 5);
        screen.write_at("edge", 6, 4, Color::White, Color::Black);

        screen.resize(20, 8);
        assert_eq!(screen.get(6, 4).unwrap().character(), 'e');
        assert_eq!(screen.get(15, 2), Some(PackedCell::EMPTY));
        assert_eq!(screen.get(3, 7), Some(PackedCell::EMPTY));
    }

    #[test]
    fn test_resize_clamps_cursor() {
        let mut screen = ScreenBuffer::new(80, 25);
        screen.set_cursor(70, 20);
        screen.resize(40, 10);
        assert_eq!(screen.cursor(), (39, 9));
    }

    #[test]
    fn test_resize_length_invariant() {
        let mut screen = ScreenBuffer::new(7, 3);
        for (w, h) in [(3u16, 9u16), (12, 12), (1, 1), (5, 2)] {
            screen.resize(w, h);
            assert_eq!(screen.len(), (w as usize) * (h as usize));
        }
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut screen = ScreenBuffer::new(10, 5);
        screen.set_cursor(100, 100);
        assert_eq!(screen.cursor(), (9, 4));
    }
}
