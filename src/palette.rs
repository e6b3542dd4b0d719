//! Yarn palette: ordered color slots with display symbols.
//!
//! The palette index is the canonical color identifier; chart cells store
//! indices, never raw colors. Slots keep their index and symbol for the
//! lifetime of a session - quantization seeding and swatch edits replace
//! colors in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;

/// Number of yarn slots in a default palette.
pub const DEFAULT_CAPACITY: usize = 5;

/// Error for palette slot operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Slot index past the end of the palette
    #[error("palette slot {0} is out of range")]
    SlotOutOfRange(usize),
}

/// One yarn: a color and the glyph used to chart it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YarnColor {
    pub color: Rgb,
    pub symbol: char,
}

impl YarnColor {
    pub const fn new(color: Rgb, symbol: char) -> Self {
        Self { color, symbol }
    }
}

/// Ordered, fixed-capacity list of yarns.
///
/// Never empty: the default palette has [`DEFAULT_CAPACITY`] slots and
/// explicit constructors fall back to it on empty input, so lookups are
/// total functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YarnPalette {
    entries: Vec<YarnColor>,
}

impl Default for YarnPalette {
    /// The stock five-yarn palette: black, white, red, green, blue.
    fn default() -> Self {
        Self {
            entries: vec![
                YarnColor::new(Rgb::new(0, 0, 0), '■'),
                YarnColor::new(Rgb::new(255, 255, 255), '□'),
                YarnColor::new(Rgb::new(255, 0, 0), '▲'),
                YarnColor::new(Rgb::new(0, 255, 0), '●'),
                YarnColor::new(Rgb::new(0, 0, 255), '★'),
            ],
        }
    }
}

impl YarnPalette {
    /// Build a palette from explicit entries.
    ///
    /// Empty input yields the default palette so the non-empty invariant
    /// holds for every constructed value.
    pub fn new(entries: Vec<YarnColor>) -> Self {
        if entries.is_empty() {
            Self::default()
        } else {
            Self { entries }
        }
    }

    /// Number of yarn slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The yarn in a slot, if the slot exists.
    pub fn entry(&self, index: usize) -> Option<&YarnColor> {
        self.entries.get(index)
    }

    /// All yarns in slot order.
    pub fn entries(&self) -> &[YarnColor] {
        &self.entries
    }

    /// Index of the yarn nearest to `color` by squared Euclidean RGB
    /// distance. Ties go to the lowest index: the scan only replaces the
    /// best candidate on a strictly smaller distance.
    pub fn nearest_index(&self, color: Rgb) -> usize {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, entry) in self.entries.iter().enumerate() {
            let dist = color.distance_sq(entry.color);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    /// The slot index after `index`, wrapping around. This is the cell-edit
    /// semantics: each edit moves a cell to the next yarn.
    pub fn cycle_index(&self, index: usize) -> usize {
        (index + 1) % self.entries.len()
    }

    /// Overwrite the first `colors.len()` slots' colors in order, leaving
    /// symbols and any trailing slots untouched. Extra seed colors beyond
    /// the palette capacity are ignored.
    pub fn seed_from(&mut self, colors: &[Rgb]) {
        for (entry, &color) in self.entries.iter_mut().zip(colors) {
            entry.color = color;
        }
    }

    /// Replace a single slot's color (manual swatch edit).
    pub fn set_color(&mut self, index: usize, color: Rgb) -> Result<(), PaletteError> {
        let entry = self.entries.get_mut(index).ok_or(PaletteError::SlotOutOfRange(index))?;
        entry.color = color;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_shape() {
        let palette = YarnPalette::default();
        assert_eq!(palette.len(), DEFAULT_CAPACITY);
        assert_eq!(palette.entry(0).unwrap().color, Rgb::new(0, 0, 0));
        assert_eq!(palette.entry(0).unwrap().symbol, '■');
        assert_eq!(palette.entry(4).unwrap().color, Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_new_empty_falls_back_to_default() {
        let palette = YarnPalette::new(Vec::new());
        assert_eq!(palette, YarnPalette::default());
    }

    #[test]
    fn test_nearest_exact_match() {
        let palette = YarnPalette::default();
        assert_eq!(palette.nearest_index(Rgb::new(255, 0, 0)), 2);
        assert_eq!(palette.nearest_index(Rgb::new(0, 0, 255)), 4);
    }

    #[test]
    fn test_nearest_approximate() {
        let palette = YarnPalette::default();
        // Dark gray is nearer to black than to anything else
        assert_eq!(palette.nearest_index(Rgb::new(30, 30, 30)), 0);
        // Washed-out red still lands on the red slot
        assert_eq!(palette.nearest_index(Rgb::new(220, 40, 40)), 2);
    }

    #[test]
    fn test_nearest_tie_takes_lowest_index() {
        let palette = YarnPalette::new(vec![
            YarnColor::new(Rgb::new(0, 0, 0), 'a'),
            YarnColor::new(Rgb::new(0, 0, 0), 'b'),
            YarnColor::new(Rgb::new(10, 10, 10), 'c'),
        ]);
        assert_eq!(palette.nearest_index(Rgb::new(0, 0, 0)), 0);
        // Equidistant between slots 0/1 (at 0) and slot 2 (at 10): 5,5,5 is
        // 75 away from both, lowest index wins
        assert_eq!(palette.nearest_index(Rgb::new(5, 5, 5)), 0);
    }

    #[test]
    fn test_cycle_index_wraps() {
        let palette = YarnPalette::default();
        assert_eq!(palette.cycle_index(0), 1);
        assert_eq!(palette.cycle_index(3), 4);
        assert_eq!(palette.cycle_index(4), 0);
    }

    #[test]
    fn test_seed_from_partial() {
        let mut palette = YarnPalette::default();
        palette.seed_from(&[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
        assert_eq!(palette.entry(0).unwrap().color, Rgb::new(1, 2, 3));
        assert_eq!(palette.entry(1).unwrap().color, Rgb::new(4, 5, 6));
        // Trailing slots untouched
        assert_eq!(palette.entry(2).unwrap().color, Rgb::new(255, 0, 0));
        // Symbols untouched
        assert_eq!(palette.entry(0).unwrap().symbol, '■');
    }

    #[test]
    fn test_seed_from_excess_colors_ignored() {
        let mut palette = YarnPalette::default();
        let seeds: Vec<Rgb> = (0..10).map(|i| Rgb::new(i, i, i)).collect();
        palette.seed_from(&seeds);
        assert_eq!(palette.len(), DEFAULT_CAPACITY);
        assert_eq!(palette.entry(4).unwrap().color, Rgb::new(4, 4, 4));
    }

    #[test]
    fn test_set_color() {
        let mut palette = YarnPalette::default();
        palette.set_color(1, Rgb::new(9, 9, 9)).unwrap();
        assert_eq!(palette.entry(1).unwrap().color, Rgb::new(9, 9, 9));
        assert_eq!(palette.entry(1).unwrap().symbol, '□');
        assert_eq!(palette.set_color(5, Rgb::new(0, 0, 0)), Err(PaletteError::SlotOutOfRange(5)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let palette = YarnPalette::default();
        let json = serde_json::to_string(&palette).unwrap();
        let parsed: YarnPalette = serde_json::from_str(&json).unwrap();
        assert_eq!(palette, parsed);
    }
}
