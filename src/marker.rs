//! Point markers and sub-cell glyph composition.
//!
//! A terminal cell can show more than one data point when the marker uses a
//! block or braille glyph. Each marker exposes a sub-cell grid; points set
//! bits in a per-cell mask and [`Marker::glyph`] turns the mask back into a
//! character.
//!
//! | marker    | grid | glyphs                                   |
//! |-----------|------|------------------------------------------|
//! | `dot`     | 1×1  | `•`                                      |
//! | `sd`      | 1×1  | `█`                                      |
//! | `hd`      | 2×2  | quadrant blocks `▘▝▀▖▌▞▛▗▚▐▜▄▙▟█`         |
//! | `fhd`     | 2×3  | sextants U+1FB00-U+1FB3B plus `▌▐█`       |
//! | `braille` | 2×4  | braille patterns U+2800-U+28FF           |

use crate::error::{Error, Result};
use std::str::FromStr;

/// Marker used to draw data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    /// Bullet, one point per cell.
    Dot,
    /// Full block, one point per cell.
    Sd,
    /// Quadrant blocks, 2×2 points per cell.
    Hd,
    /// Sextant blocks, 2×3 points per cell.
    Fhd,
    /// Braille dots, 2×4 points per cell.
    #[default]
    Braille,
    /// Any single character, one point per cell.
    Char(char),
}

/// Quadrant glyphs indexed by mask (TL=1, TR=2, BL=4, BR=8).
const QUADRANTS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];

/// Braille dot bits indexed by `[row][col]`.
const BRAILLE_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

impl Marker {
    /// Sub-cell grid `(columns, rows)` per character.
    #[must_use]
    pub const fn resolution(self) -> (u32, u32) {
        match self {
            Self::Dot | Self::Sd | Self::Char(_) => (1, 1),
            Self::Hd => (2, 2),
            Self::Fhd => (2, 3),
            Self::Braille => (2, 4),
        }
    }

    /// Bit for the sub-cell at `(col, row)` inside one character.
    #[must_use]
    pub fn bit(self, col: u32, row: u32) -> u8 {
        let (cols, rows) = self.resolution();
        let (col, row) = (col.min(cols - 1), row.min(rows - 1));
        match self {
            Self::Braille => BRAILLE_BITS[row as usize][col as usize],
            _ => 1 << (row * cols + col),
        }
    }

    /// Whether two markers share a sub-cell layout and can merge masks.
    #[must_use]
    pub fn same_family(self, other: Self) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
            && match (self, other) {
                (Self::Char(a), Self::Char(b)) => a == b,
                _ => true,
            }
    }

    /// Character for a sub-cell mask.
    #[must_use]
    pub fn glyph(self, mask: u8) -> char {
        match self {
            Self::Dot => {
                if mask == 0 {
                    ' '
                } else {
                    '•'
                }
            }
            Self::Sd => {
                if mask == 0 {
                    ' '
                } else {
                    '█'
                }
            }
            Self::Char(c) => {
                if mask == 0 {
                    ' '
                } else {
                    c
                }
            }
            Self::Hd => QUADRANTS[(mask & 0x0f) as usize],
            Self::Fhd => sextant(mask & 0x3f),
            Self::Braille => char::from_u32(0x2800 + u32::from(mask)).unwrap_or(' '),
        }
    }

    /// Glyph with every sub-cell set, used in legends.
    #[must_use]
    pub fn legend_glyph(self) -> char {
        match self {
            Self::Hd | Self::Fhd | Self::Sd => '█',
            Self::Braille => '⣿',
            other => other.glyph(1),
        }
    }
}

/// Sextant glyph for a 6-bit mask (TL=1, TR=2, ML=4, MR=8, BL=16, BR=32).
///
/// Unicode encodes 60 sextants in order, skipping the patterns that already
/// exist as block elements: empty, left half, right half and full.
fn sextant(mask: u8) -> char {
    const LEFT: u8 = 0b01_0101;
    const RIGHT: u8 = 0b10_1010;
    match mask {
        0 => ' ',
        LEFT => '▌',
        RIGHT => '▐',
        0x3f => '█',
        m => {
            let skipped = u32::from(m > LEFT) + u32::from(m > RIGHT);
            char::from_u32(0x1FB00 + u32::from(m) - 1 - skipped).unwrap_or('█')
        }
    }
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dot" => Ok(Self::Dot),
            "sd" => Ok(Self::Sd),
            "hd" => Ok(Self::Hd),
            "fhd" => Ok(Self::Fhd),
            "braille" => Ok(Self::Braille),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(Error::UnknownMarker(other.to_string())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markers() {
        assert_eq!("braille".parse::<Marker>().unwrap(), Marker::Braille);
        assert_eq!("fhd".parse::<Marker>().unwrap(), Marker::Fhd);
        assert_eq!("x".parse::<Marker>().unwrap(), Marker::Char('x'));
        assert!("sparkles".parse::<Marker>().is_err());
        assert!("".parse::<Marker>().is_err());
    }

    #[test]
    fn test_quadrant_glyphs() {
        let hd = Marker::Hd;
        assert_eq!(hd.glyph(hd.bit(0, 0)), '▘');
        assert_eq!(hd.glyph(hd.bit(1, 1)), '▗');
        assert_eq!(hd.glyph(hd.bit(0, 0) | hd.bit(1, 0)), '▀');
        assert_eq!(hd.glyph(0x0f), '█');
    }

    #[test]
    fn test_sextant_glyphs() {
        let fhd = Marker::Fhd;
        assert_eq!(fhd.glyph(1), '\u{1FB00}');
        assert_eq!(fhd.glyph(20), '\u{1FB13}');
        assert_eq!(fhd.glyph(22), '\u{1FB14}');
        assert_eq!(fhd.glyph(62), '\u{1FB3B}');
        let left = fhd.bit(0, 0) | fhd.bit(0, 1) | fhd.bit(0, 2);
        assert_eq!(fhd.glyph(left), '▌');
        assert_eq!(fhd.glyph(0x3f), '█');
    }

    #[test]
    fn test_sextant_glyphs_are_distinct() {
        let glyphs: std::collections::HashSet<char> = (0..64).map(|m| sextant(m)).collect();
        assert_eq!(glyphs.len(), 64);
    }

    #[test]
    fn test_braille_bits() {
        let b = Marker::Braille;
        assert_eq!(b.glyph(b.bit(0, 0)), '⠁');
        assert_eq!(b.glyph(b.bit(1, 3)), '⢀');
        let all = (0..4).flat_map(|r| (0..2).map(move |c| (c, r))).fold(0u8, |m, (c, r)| m | b.bit(c, r));
        assert_eq!(b.glyph(all), '⣿');
    }

    #[test]
    fn test_single_cell_markers() {
        assert_eq!(Marker::Dot.resolution(), (1, 1));
        assert_eq!(Marker::Dot.glyph(1), '•');
        assert_eq!(Marker::Char('+').glyph(1), '+');
        assert_eq!(Marker::Sd.glyph(0), ' ');
    }

    #[test]
    fn test_same_family() {
        assert!(Marker::Braille.same_family(Marker::Braille));
        assert!(!Marker::Braille.same_family(Marker::Hd));
        assert!(!Marker::Char('a').same_family(Marker::Char('b')));
    }
}
