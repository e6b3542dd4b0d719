//! Terminal rendering utilities for colored chart display
//!
//! Provides ANSI escape sequence generation for previewing a chart with
//! true-color backgrounds in terminal emulators that support 24-bit color.
//! The chart is printed the way a knitter reads it: top row first, each row
//! labelled with its 1-based number (row 1 at the bottom), its face, and
//! the direction it is worked in.

use crate::chart::{display_row_number, is_right_to_left, Chart};
use crate::color::Rgb;
use crate::cursor::Cursor;
use crate::palette::YarnPalette;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape sequence for inverse video (cursor highlight)
pub const ANSI_INVERT: &str = "\x1b[7m";

/// Convert an RGB color to an ANSI 24-bit background escape sequence.
///
/// # Examples
///
/// ```
/// use knitchart::color::Rgb;
/// use knitchart::terminal::color_to_ansi_bg;
///
/// let red = color_to_ansi_bg(Rgb::new(255, 0, 0));
/// assert_eq!(red, "\x1b[48;2;255;0;0m");
/// ```
pub fn color_to_ansi_bg(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Pick black or white for a symbol so it stays readable on its background.
fn contrast_fg(color: Rgb) -> &'static str {
    // Perceived luminance, integer weights
    let luma = 299 * u32::from(color.r) + 587 * u32::from(color.g) + 114 * u32::from(color.b);
    if luma > 127_500 {
        "\x1b[38;2;0;0;0m"
    } else {
        "\x1b[38;2;255;255;255m"
    }
}

/// Render a chart with ANSI color backgrounds.
///
/// Returns a tuple of (colored_chart, legend):
/// - colored_chart: rows top-down, each prefixed with
///   `"{row} {face} {arrow}"` (`RS ←` for right-to-left rows, `WS →` for
///   left-to-right), one 3-char cell per stitch showing the yarn symbol
/// - legend: one line per palette slot mapping index and symbol to its hex
///   color
///
/// When a cursor is given, its stitch is highlighted with inverse video.
pub fn render_ansi_chart(
    chart: &Chart,
    palette: &YarnPalette,
    cursor: Option<&Cursor>,
) -> (String, String) {
    let mut output = String::new();

    let highlight = cursor.map(|c| (c.row() - 1, c.column_index()));

    for storage_row in (0..chart.rows()).rev() {
        let row_number = display_row_number(storage_row);
        let right_to_left = is_right_to_left(row_number);
        let (face, arrow) = if right_to_left { ("RS", '←') } else { ("WS", '→') };
        output.push_str(&format!("{row_number:>3} {face} {arrow} "));

        if let Some(cells) = chart.row(storage_row) {
            for (col, cell) in cells.iter().enumerate() {
                let (color, symbol) = match palette.entry(cell.color_index) {
                    Some(yarn) => (yarn.color, yarn.symbol),
                    // Stale index after a palette shrink; charts are
                    // rebuilt with the palette in practice
                    None => (Rgb::new(255, 0, 255), '?'),
                };
                let is_cursor_cell = highlight == Some((storage_row, col));
                if is_cursor_cell {
                    output.push_str(ANSI_INVERT);
                }
                output.push_str(&color_to_ansi_bg(color));
                output.push_str(contrast_fg(color));
                output.push(' ');
                output.push(symbol);
                output.push(' ');
                output.push_str(ANSI_RESET);
            }
        }
        output.push('\n');
    }

    let mut legend = String::new();
    for (index, yarn) in palette.entries().iter().enumerate() {
        legend.push_str(&format!(
            "{}{} {} {}{} {}\n",
            color_to_ansi_bg(yarn.color),
            contrast_fg(yarn.color),
            yarn.symbol,
            ANSI_RESET,
            index,
            yarn.color.to_hex(),
        ));
    }

    (output, legend)
}
