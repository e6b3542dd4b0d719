//! WASM API module for browser/JS interop
//!
//! Provides WebAssembly bindings over a pattern session so a browser host
//! can feed canvas `ImageData` buffers in and drive navigation from button
//! and speech-result callbacks.

use wasm_bindgen::prelude::*;

use crate::color::{parse_hex, Rgb};
use crate::command::Command;
use crate::session::PatternSession;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A knitting chart session owned by the JS host.
#[wasm_bindgen]
pub struct KnitSession {
    inner: PatternSession,
}

impl Default for KnitSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl KnitSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> KnitSession {
        KnitSession { inner: PatternSession::new() }
    }

    /// Build a pattern from a canvas `ImageData`-style RGBA byte buffer.
    ///
    /// Returns false (and leaves any existing pattern untouched) if the
    /// buffer is shorter than `width * height * 4` bytes.
    pub fn build_pattern(&mut self, width: usize, height: usize, pixels: &[u8]) -> bool {
        if pixels.len() < width * height * 4 {
            return false;
        }
        self.inner.build_pattern(width, height, |x, y| {
            let i = (y * width + x) * 4;
            Rgb::new(pixels[i], pixels[i + 1], pixels[i + 2])
        });
        true
    }

    pub fn has_pattern(&self) -> bool {
        self.inner.has_pattern()
    }

    /// Total rows, 0 while no pattern is loaded.
    #[wasm_bindgen(getter)]
    pub fn total_rows(&self) -> usize {
        self.inner.chart().map_or(0, |c| c.rows())
    }

    /// Total stitches per row, 0 while no pattern is loaded.
    #[wasm_bindgen(getter)]
    pub fn total_cols(&self) -> usize {
        self.inner.chart().map_or(0, |c| c.cols())
    }

    /// Current row (1-based from the bottom), or undefined without a pattern.
    #[wasm_bindgen(getter)]
    pub fn current_row(&self) -> Option<usize> {
        self.inner.current_row()
    }

    /// Current stitch (1-based in working order), or undefined without a pattern.
    #[wasm_bindgen(getter)]
    pub fn current_stitch(&self) -> Option<usize> {
        self.inner.current_stitch()
    }

    /// 0-based storage column to highlight, or undefined without a pattern.
    #[wasm_bindgen(getter)]
    pub fn column_index(&self) -> Option<usize> {
        self.inner.column_index()
    }

    /// True when the current row is worked right-to-left.
    pub fn is_right_to_left(&self) -> bool {
        self.inner.cursor().map_or(false, |c| c.is_right_to_left())
    }

    pub fn next_stitch(&mut self) {
        self.inner.advance_stitch();
    }

    pub fn prev_stitch(&mut self) {
        self.inner.retreat_stitch();
    }

    pub fn next_row(&mut self) {
        self.inner.advance_row();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Interpret a transcript, apply it, and return the command name
    /// (kebab-case, e.g. "advance-row") for speech feedback.
    pub fn apply_command(&mut self, text: &str) -> String {
        self.inner.apply_command(text).to_string()
    }

    /// True when the transcript asks to stop listening.
    pub fn is_stop_command(&self, text: &str) -> bool {
        self.inner.interpret(text) == Command::StopListening
    }

    /// Palette index of a cell, or undefined when out of range / no pattern.
    pub fn cell_color_index(&self, row: usize, col: usize) -> Option<usize> {
        self.inner.chart().and_then(|c| c.cell_at(row, col)).map(|cell| cell.color_index)
    }

    /// Cycle a cell to the next yarn; returns the new palette index, or
    /// undefined when out of range / no pattern.
    pub fn edit_cell(&mut self, row: usize, col: usize) -> Option<usize> {
        self.inner.edit_cell(row, col).ok()
    }

    /// Number of palette slots.
    #[wasm_bindgen(getter)]
    pub fn palette_len(&self) -> usize {
        self.inner.palette().len()
    }

    /// Hex color of a palette slot, e.g. "#ff0000".
    pub fn yarn_hex(&self, index: usize) -> Option<String> {
        self.inner.yarn(index).map(|yarn| yarn.color.to_hex())
    }

    /// Display symbol of a palette slot.
    pub fn yarn_symbol(&self, index: usize) -> Option<String> {
        self.inner.yarn(index).map(|yarn| yarn.symbol.to_string())
    }

    /// Replace a palette slot's color from a hex string (swatch edit).
    pub fn set_yarn_color(&mut self, index: usize, hex: &str) -> bool {
        match parse_hex(hex) {
            Ok(color) => self.inner.set_yarn_color(index, color).is_ok(),
            Err(_) => false,
        }
    }

    /// The chart as JSON (`null` while no pattern is loaded), for host-side
    /// rendering or debugging.
    pub fn chart_json(&self) -> String {
        match self.inner.chart() {
            Some(chart) => serde_json::to_string(chart).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }
}
