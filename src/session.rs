//! Session-scoped pattern controller.
//!
//! One `PatternSession` owns the palette, the chart, and the cursor - the
//! state the product used to keep in free-standing globals. All mutation
//! goes through `&mut self`, which gives the single-critical-section
//! guarantee the host needs when a click and a speech result could race.

use image::RgbaImage;
use thiserror::Error;

use crate::chart::{Chart, ChartError};
use crate::color::Rgb;
use crate::command::{Command, CommandInterpreter};
use crate::cursor::{Cursor, RowFace};
use crate::palette::{PaletteError, YarnColor, YarnPalette};
use crate::quantize::dominant_colors;

/// Error for operations that need a loaded pattern or valid cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Navigation or edit requested before any pattern was built
    #[error("no pattern has been loaded")]
    NoPatternLoaded,
    /// Edit addressed a cell outside the current dimensions
    #[error("cell ({row}, {col}) is outside the chart")]
    OutOfBounds { row: usize, col: usize },
    /// Palette slot index out of range
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

impl From<ChartError> for PatternError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::OutOfBounds { row, col } => PatternError::OutOfBounds { row, col },
        }
    }
}

/// The engine behind one knitting session.
///
/// Chart and cursor exist only after [`build_pattern`](Self::build_pattern);
/// until then, navigation is a silent no-op and edits report
/// [`PatternError::NoPatternLoaded`]. Rebuilding replaces both wholesale -
/// no attempt is made to preserve the cursor across a resize.
#[derive(Debug, Clone)]
pub struct PatternSession {
    palette: YarnPalette,
    chart: Option<Chart>,
    cursor: Option<Cursor>,
    interpreter: CommandInterpreter,
}

impl Default for PatternSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSession {
    /// A session with the stock palette and no pattern.
    pub fn new() -> Self {
        Self {
            palette: YarnPalette::default(),
            chart: None,
            cursor: None,
            interpreter: CommandInterpreter::new(),
        }
    }

    /// A session with a caller-supplied palette.
    pub fn with_palette(palette: YarnPalette) -> Self {
        Self { palette, ..Self::new() }
    }

    /// Build a pattern from a `width x height` pixel source.
    ///
    /// `pixel_at(x, y)` uses image coordinates (origin top-left). The
    /// dominant colors of the buffer seed the palette in frequency order,
    /// every pixel is mapped to its nearest yarn, and the cursor starts
    /// fresh at `(1, 1)`.
    ///
    /// The image-loading collaborator is expected to have resampled the
    /// image and clamped the dimensions to the product's 4..=64 range;
    /// other positive dimensions are tolerated.
    pub fn build_pattern<F>(&mut self, width: usize, height: usize, mut pixel_at: F) -> &Chart
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(pixel_at(x, y));
            }
        }

        let seeds = dominant_colors(pixels.iter().copied(), self.palette.len());
        self.palette.seed_from(&seeds);

        let chart =
            Chart::from_pixels(width, height, |x, y| pixels[y * width + x], &self.palette);
        self.cursor = Some(Cursor::new(chart.rows(), chart.cols()));
        self.chart.insert(chart)
    }

    /// Build a pattern straight from a decoded RGBA image.
    pub fn build_pattern_from_image(&mut self, image: &RgbaImage) -> &Chart {
        let width = image.width() as usize;
        self.build_pattern(width, image.height() as usize, |x, y| {
            Rgb::from_rgba(*image.get_pixel(x as u32, y as u32))
        })
    }

    /// Whether a pattern has been built.
    pub fn has_pattern(&self) -> bool {
        self.chart.is_some()
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn palette(&self) -> &YarnPalette {
        &self.palette
    }

    /// The yarn in a palette slot.
    pub fn yarn(&self, index: usize) -> Option<&YarnColor> {
        self.palette.entry(index)
    }

    /// Replace one palette slot's color (swatch edit). Existing chart cells
    /// keep their indices, so the whole chart re-colors with the slot.
    pub fn set_yarn_color(&mut self, index: usize, color: Rgb) -> Result<(), PatternError> {
        Ok(self.palette.set_color(index, color)?)
    }

    /// Current row, 1-based from the bottom. `None` until a pattern exists.
    pub fn current_row(&self) -> Option<usize> {
        self.cursor.map(|c| c.row())
    }

    /// Current stitch within the row, 1-based in working order.
    pub fn current_stitch(&self) -> Option<usize> {
        self.cursor.map(|c| c.stitch())
    }

    /// 0-based storage column of the current stitch.
    pub fn column_index(&self) -> Option<usize> {
        self.cursor.map(|c| c.column_index())
    }

    /// Face of the current row.
    pub fn face(&self) -> Option<RowFace> {
        self.cursor.map(|c| c.face())
    }

    /// One stitch forward; silent no-op without a pattern.
    pub fn advance_stitch(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.advance_stitch();
        }
    }

    /// One stitch back; silent no-op without a pattern.
    pub fn retreat_stitch(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.retreat_stitch();
        }
    }

    /// Next row, stitch 1; silent no-op without a pattern.
    pub fn advance_row(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.advance_row();
        }
    }

    /// Back to `(1, 1)`; silent no-op without a pattern.
    pub fn reset(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.reset();
        }
    }

    /// Cycle a cell to the next yarn and return the new palette index.
    pub fn edit_cell(&mut self, row: usize, col: usize) -> Result<usize, PatternError> {
        let chart = self.chart.as_mut().ok_or(PatternError::NoPatternLoaded)?;
        Ok(chart.cycle_cell(row, col, &self.palette)?)
    }

    /// Map a transcript onto a command without applying it.
    pub fn interpret(&self, text: &str) -> Command {
        self.interpreter.interpret(text)
    }

    /// Interpret a transcript and apply the resulting navigation command.
    ///
    /// `StopListening` belongs to the voice collaborator and
    /// `Unrecognized` is a valid sentinel; neither changes any state here.
    /// The recognized command is returned so the caller can announce it.
    pub fn apply_command(&mut self, text: &str) -> Command {
        let command = self.interpreter.interpret(text);
        match command {
            Command::AdvanceRow => self.advance_row(),
            Command::AdvanceStitch => self.advance_stitch(),
            Command::RetreatStitch => self.retreat_stitch(),
            Command::Reset => self.reset(),
            Command::StopListening | Command::Unrecognized => {}
        }
        command
    }
}
