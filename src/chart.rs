//! The stitch chart: rows × cols of palette indices.
//!
//! Storage follows knitting convention, not image convention: storage row 0
//! is the bottom-most physical row (displayed as row 1) and row indices
//! increase upward. Columns are always stored left-to-right; the traversal
//! direction of a row is derived from its parity, never stored.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::palette::YarnPalette;

/// Error for cell addressing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    /// Cell coordinates outside the chart dimensions
    #[error("cell ({row}, {col}) is outside the chart")]
    OutOfBounds { row: usize, col: usize },
}

/// One stitch: the palette index of its yarn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub color_index: usize,
}

/// A knitting chart built from a quantized image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    rows: usize,
    cols: usize,
    /// cells[0] is the bottom row; each row is stored left-to-right.
    cells: Vec<Vec<Cell>>,
}

impl Chart {
    /// Build a chart from a `width x height` pixel source.
    ///
    /// `pixel_at(x, y)` uses image coordinates: `(0, 0)` is the top-left
    /// corner and `y` grows downward. The image's bottom scanline
    /// (`y = height - 1`) becomes storage row 0, so the chart reads
    /// bottom-up the way it is knitted.
    ///
    /// Any positive dimensions are accepted; the image-loading collaborator
    /// clamps to the product's 4..=64 range before calling.
    pub fn from_pixels<F>(width: usize, height: usize, mut pixel_at: F, palette: &YarnPalette) -> Self
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut cells = Vec::with_capacity(height);
        for y in (0..height).rev() {
            let mut row = Vec::with_capacity(width);
            for x in 0..width {
                row.push(Cell { color_index: palette.nearest_index(pixel_at(x, y)) });
            }
            cells.push(row);
        }
        Self { rows: height, cols: width, cells }
    }

    /// Build a chart straight from a decoded RGBA image (alpha is ignored).
    pub fn from_image(image: &RgbaImage, palette: &YarnPalette) -> Self {
        Self::from_pixels(
            image.width() as usize,
            image.height() as usize,
            |x, y| Rgb::from_rgba(*image.get_pixel(x as u32, y as u32)),
            palette,
        )
    }

    /// Total rows (`totalRows`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total stitches per row (`totalCols`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at `(storage_row, col)`, if in bounds.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// One storage row of cells, bottom row at index 0.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Cycle a cell to the next palette index and return the new index.
    pub fn cycle_cell(
        &mut self,
        row: usize,
        col: usize,
        palette: &YarnPalette,
    ) -> Result<usize, ChartError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(ChartError::OutOfBounds { row, col })?;
        cell.color_index = palette.cycle_index(cell.color_index);
        Ok(cell.color_index)
    }
}

/// 1-based row number shown to the knitter; row 1 is the bottom row.
pub fn display_row_number(storage_row: usize) -> usize {
    storage_row + 1
}

/// Odd display rows are worked right-to-left (right-side rows in flat
/// knitting); even rows left-to-right.
pub fn is_right_to_left(display_row: usize) -> bool {
    display_row % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn two_tone_palette() -> YarnPalette {
        // Slot 0 black, slot 1 white out of the stock palette
        YarnPalette::default()
    }

    #[test]
    fn test_from_pixels_dimensions() {
        let palette = two_tone_palette();
        let chart = Chart::from_pixels(3, 2, |_, _| Rgb::new(0, 0, 0), &palette);
        assert_eq!(chart.rows(), 2);
        assert_eq!(chart.cols(), 3);
        assert!(chart.cell_at(1, 2).is_some());
        assert!(chart.cell_at(2, 0).is_none());
    }

    #[test]
    fn test_bottom_scanline_becomes_row_zero() {
        let palette = two_tone_palette();
        // 1x2 image: top pixel white, bottom pixel black
        let chart = Chart::from_pixels(
            1,
            2,
            |_, y| if y == 0 { Rgb::new(255, 255, 255) } else { Rgb::new(0, 0, 0) },
            &palette,
        );
        // Storage row 0 = bottom scanline = black = slot 0
        assert_eq!(chart.cell_at(0, 0).unwrap().color_index, 0);
        assert_eq!(chart.cell_at(1, 0).unwrap().color_index, 1);
    }

    #[test]
    fn test_columns_stored_left_to_right() {
        let palette = two_tone_palette();
        // 2x1 image: left pixel black, right pixel white
        let chart = Chart::from_pixels(
            2,
            1,
            |x, _| if x == 0 { Rgb::new(0, 0, 0) } else { Rgb::new(255, 255, 255) },
            &palette,
        );
        assert_eq!(chart.cell_at(0, 0).unwrap().color_index, 0);
        assert_eq!(chart.cell_at(0, 1).unwrap().color_index, 1);
    }

    #[test]
    fn test_every_cell_is_valid_palette_index() {
        let palette = YarnPalette::default();
        let chart = Chart::from_pixels(
            7,
            5,
            |x, y| Rgb::new((x * 40) as u8, (y * 50) as u8, 128),
            &palette,
        );
        for row in 0..chart.rows() {
            for col in 0..chart.cols() {
                assert!(chart.cell_at(row, col).unwrap().color_index < palette.len());
            }
        }
    }

    #[test]
    fn test_from_image_matches_from_pixels() {
        let palette = YarnPalette::default();
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([255, 255, 255, 255]));

        let chart = Chart::from_image(&image, &palette);
        // Bottom scanline first: black, white
        assert_eq!(chart.cell_at(0, 0).unwrap().color_index, 0);
        assert_eq!(chart.cell_at(0, 1).unwrap().color_index, 1);
        // Top scanline: red, blue
        assert_eq!(chart.cell_at(1, 0).unwrap().color_index, 2);
        assert_eq!(chart.cell_at(1, 1).unwrap().color_index, 4);
    }

    #[test]
    fn test_cycle_cell_wraps_through_palette() {
        let palette = YarnPalette::default();
        let mut chart = Chart::from_pixels(1, 1, |_, _| Rgb::new(0, 0, 0), &palette);
        let start = chart.cell_at(0, 0).unwrap().color_index;

        let mut index = start;
        for _ in 0..palette.len() {
            index = chart.cycle_cell(0, 0, &palette).unwrap();
        }
        assert_eq!(index, start);
    }

    #[test]
    fn test_cycle_cell_out_of_bounds() {
        let palette = YarnPalette::default();
        let mut chart = Chart::from_pixels(2, 2, |_, _| Rgb::new(0, 0, 0), &palette);
        assert_eq!(
            chart.cycle_cell(2, 0, &palette),
            Err(ChartError::OutOfBounds { row: 2, col: 0 })
        );
        assert_eq!(
            chart.cycle_cell(0, 9, &palette),
            Err(ChartError::OutOfBounds { row: 0, col: 9 })
        );
    }

    #[test]
    fn test_display_row_number() {
        assert_eq!(display_row_number(0), 1);
        assert_eq!(display_row_number(9), 10);
    }

    #[test]
    fn test_row_parity_direction() {
        assert!(is_right_to_left(1));
        assert!(!is_right_to_left(2));
        assert!(is_right_to_left(3));
        assert!(!is_right_to_left(64));
    }

    #[test]
    fn test_serde_roundtrip() {
        let palette = YarnPalette::default();
        let chart = Chart::from_pixels(2, 3, |x, y| Rgb::new(x as u8, y as u8, 0), &palette);
        let json = serde_json::to_string(&chart).unwrap();
        let parsed: Chart = serde_json::from_str(&json).unwrap();
        assert_eq!(chart, parsed);
    }
}
