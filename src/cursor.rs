//! Serpentine cursor: the knitter's position in the chart.
//!
//! Row and stitch are 1-based; row 1 is the bottom of the chart. Odd rows
//! are worked right-to-left, even rows left-to-right, so a linear stitch
//! count sweeps the grid boustrophedon-style. Every transition is a total
//! function that saturates at the chart boundaries.

use serde::{Deserialize, Serialize};

use crate::chart::is_right_to_left;

/// Which face of the fabric a row is worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowFace {
    /// Odd rows: right side, worked right-to-left
    Right,
    /// Even rows: wrong side, worked left-to-right
    Wrong,
}

impl RowFace {
    /// Face of a 1-based display row.
    pub fn of_row(display_row: usize) -> Self {
        if is_right_to_left(display_row) {
            RowFace::Right
        } else {
            RowFace::Wrong
        }
    }
}

impl std::fmt::Display for RowFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowFace::Right => write!(f, "right side"),
            RowFace::Wrong => write!(f, "wrong side"),
        }
    }
}

/// Position within a chart of known dimensions.
///
/// A cursor only exists alongside a chart and is recreated whenever the
/// chart is rebuilt; it never outlives the dimensions it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    row: usize,
    stitch: usize,
    total_rows: usize,
    total_cols: usize,
}

impl Cursor {
    /// A fresh cursor at `(1, 1)`. Dimensions are clamped to at least 1 so
    /// the `row`/`stitch` ranges stay valid even for degenerate input.
    pub fn new(total_rows: usize, total_cols: usize) -> Self {
        Self {
            row: 1,
            stitch: 1,
            total_rows: total_rows.max(1),
            total_cols: total_cols.max(1),
        }
    }

    /// Current row, 1-based from the bottom.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Current stitch within the row, 1-based in working order.
    pub fn stitch(&self) -> usize {
        self.stitch
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn total_cols(&self) -> usize {
        self.total_cols
    }

    /// Back to the first stitch of the first row.
    pub fn reset(&mut self) {
        self.row = 1;
        self.stitch = 1;
    }

    /// One stitch forward, wrapping to the next row's first stitch at a row
    /// end. No-op at the last stitch of the last row.
    pub fn advance_stitch(&mut self) {
        if self.stitch < self.total_cols {
            self.stitch += 1;
        } else if self.row < self.total_rows {
            self.row += 1;
            self.stitch = 1;
        }
    }

    /// One stitch back, wrapping to the previous row's last stitch at a row
    /// start. No-op at `(1, 1)`.
    pub fn retreat_stitch(&mut self) {
        if self.stitch > 1 {
            self.stitch -= 1;
        } else if self.row > 1 {
            self.row -= 1;
            self.stitch = self.total_cols;
        }
    }

    /// Jump to the first stitch of the next row. No-op on the last row.
    pub fn advance_row(&mut self) {
        if self.row < self.total_rows {
            self.row += 1;
            self.stitch = 1;
        }
    }

    /// Face of the current row.
    pub fn face(&self) -> RowFace {
        RowFace::of_row(self.row)
    }

    /// Whether the current row is worked right-to-left.
    pub fn is_right_to_left(&self) -> bool {
        is_right_to_left(self.row)
    }

    /// 0-based storage column of the current stitch, for rendering and
    /// highlighting. On a right-to-left row, stitch 1 is the rightmost
    /// storage column; on a left-to-right row it is column 0.
    pub fn column_index(&self) -> usize {
        if self.is_right_to_left() {
            self.total_cols - self.stitch
        } else {
            self.stitch - 1
        }
    }
}
