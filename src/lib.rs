//! Knitchart - stitch-by-stitch knitting charts from raster images
//!
//! This library provides the pattern engine behind a knitting-chart app:
//! - Quantize an image's pixels into a small fixed yarn palette
//! - Build a chart whose rows are stored bottom-up, the way they are knitted
//! - Track a knitter's position with a serpentine (boustrophedon) cursor
//! - Interpret free-text navigation commands from voice or UI input
//!
//! Rendering, image loading, and speech recognition are host concerns; the
//! host drives a [`session::PatternSession`] and reads its state back.

pub mod chart;
pub mod color;
pub mod command;
pub mod cursor;
pub mod palette;
pub mod quantize;
pub mod session;
pub mod terminal;

#[cfg(feature = "wasm")]
pub mod wasm;
