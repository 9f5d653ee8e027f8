//! `PackedCell`: The atomic unit of screen content.
//!
//! # Bit Layout
//!
//! A cell is a single `u32`, so a full 80x25 screen is one contiguous
//! 8 KB allocation that can be handed to the host surface as-is:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  PackedCell Layout (32 bits)                         │
//! ├──────────────┬────────────┬────────────┬─────────────┤
//! │  character   │ foreground │ background │  (unused)   │
//! │  bits 0..16  │ bits 16..20│ bits 20..24│ bits 24..32 │
//! └──────────────┴────────────┴────────────┴─────────────┘
//! ```
//!
//! The layout is private to this module: [`PackedCell::pack`] and
//! [`PackedCell::unpack`] are the only access paths, so the field widths
//! can change without touching any other code.

/// Number of low bits holding the character code.
const CHAR_BITS: u32 = 16;
/// Number of bits holding one color index.
const COLOR_BITS: u32 = 4;
/// Shift of the foreground color field.
const FG_SHIFT: u32 = CHAR_BITS;
/// Shift of the background color field.
const BG_SHIFT: u32 = CHAR_BITS + COLOR_BITS;
/// Mask for the character field.
const CHAR_MASK: u32 = (1 << CHAR_BITS) - 1;
/// Mask for one color field (applied after shifting).
const COLOR_MASK: u32 = (1 << COLOR_BITS) - 1;

/// A palette color.
///
/// The palette is the classic 16-entry console set. The discriminants are
/// the packed on-wire indices; [`Color::from_index`] masks its input so a
/// cell can never carry an out-of-palette value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Index 0.
    Black = 0,
    /// Index 1.
    DarkBlue = 1,
    /// Index 2.
    DarkGreen = 2,
    /// Index 3.
    DarkCyan = 3,
    /// Index 4.
    DarkRed = 4,
    /// Index 5.
    DarkMagenta = 5,
    /// Index 6.
    DarkYellow = 6,
    /// Index 7.
    Gray = 7,
    /// Index 8.
    DarkGray = 8,
    /// Index 9.
    Blue = 9,
    /// Index 10.
    Green = 10,
    /// Index 11.
    Cyan = 11,
    /// Index 12.
    Red = 12,
    /// Index 13.
    Magenta = 13,
    /// Index 14.
    Yellow = 14,
    /// Index 15.
    White = 15,
}

impl Color {
    /// Default foreground (white).
    pub const DEFAULT_FG: Self = Self::White;
    /// Default background (black).
    pub const DEFAULT_BG: Self = Self::Black;

    /// Look up a color by palette index.
    ///
    /// The index is masked to the palette width, so every input maps to
    /// some palette entry.
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        match index & COLOR_MASK as u8 {
            0 => Self::Black,
            1 => Self::DarkBlue,
            2 => Self::DarkGreen,
            3 => Self::DarkCyan,
            4 => Self::DarkRed,
            5 => Self::DarkMagenta,
            6 => Self::DarkYellow,
            7 => Self::Gray,
            8 => Self::DarkGray,
            9 => Self::Blue,
            10 => Self::Green,
            11 => Self::Cyan,
            12 => Self::Red,
            13 => Self::Magenta,
            14 => Self::Yellow,
            _ => Self::White,
        }
    }

    /// The palette index of this color.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// A single screen cell: character + foreground + background, packed.
///
/// `PackedCell` is `#[repr(transparent)]` over `u32`, so a `&[PackedCell]`
/// is layout-compatible with the flat integer grid the host surface
/// consumes.
///
/// # Character Range
///
/// The character field is 16 bits wide. Code points above U+FFFF truncate
/// on encode; if the truncated pattern is not a valid scalar value
/// (the surrogate range), decode yields U+FFFD. Round-trips are exact for
/// every `char` whose scalar value fits in 16 bits.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedCell(u32);

// Compile-time assertion: the packed cell must stay one machine word wide,
// four cells per 16-byte slot.
const _: () = assert!(
    std::mem::size_of::<PackedCell>() == 4,
    "PackedCell must be exactly 4 bytes"
);

impl Default for PackedCell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PackedCell {
    /// An empty cell (space, default colors).
    pub const EMPTY: Self = Self::pack(' ', Color::DEFAULT_FG, Color::DEFAULT_BG);

    /// Pack a character and two palette colors into one cell.
    ///
    /// The character code truncates to the field width; colors are
    /// constrained to the palette by construction.
    #[inline]
    pub const fn pack(character: char, foreground: Color, background: Color) -> Self {
        let ch = (character as u32) & CHAR_MASK;
        let fg = (foreground as u32) << FG_SHIFT;
        let bg = (background as u32) << BG_SHIFT;
        Self(ch | fg | bg)
    }

    /// Unpack into `(character, foreground, background)`.
    ///
    /// Exact inverse of [`Self::pack`] for all values `pack` produces from
    /// in-range characters.
    #[inline]
    pub const fn unpack(self) -> (char, Color, Color) {
        (self.character(), self.foreground(), self.background())
    }

    /// The character stored in this cell.
    #[inline]
    pub const fn character(self) -> char {
        match char::from_u32(self.0 & CHAR_MASK) {
            Some(c) => c,
            // Truncation of an astral code point can land in the
            // surrogate range, which is not a scalar value.
            None => char::REPLACEMENT_CHARACTER,
        }
    }

    /// The foreground color stored in this cell.
    #[inline]
    pub const fn foreground(self) -> Color {
        Color::from_index(((self.0 >> FG_SHIFT) & COLOR_MASK) as u8)
    }

    /// The background color stored in this cell.
    #[inline]
    pub const fn background(self) -> Color {
        Color::from_index(((self.0 >> BG_SHIFT) & COLOR_MASK) as u8)
    }

    /// The raw packed value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for PackedCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (ch, fg, bg) = self.unpack();
        write!(f, "PackedCell({ch:?} {fg:?}/{bg:?})")
    }
}
