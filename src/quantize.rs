//! Dominant-color extraction from raw pixel buffers.
//!
//! Quantization is exact-match: the full 24-bit color is the frequency key,
//! with no binning or clustering. The result seeds the yarn palette in
//! frequency order.

use std::collections::HashMap;

use crate::color::Rgb;

/// Seed colors used to top up the result when an image has fewer distinct
/// colors than requested. Matches the stock palette order.
pub const FALLBACK_COLORS: [Rgb; 5] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
];

/// Extract up to `max_colors` dominant colors from a pixel stream.
///
/// Distinct colors are ranked by `(frequency desc, first seen asc)`, which
/// makes the output deterministic for a given pixel order. If the image has
/// fewer distinct colors than `max_colors`, the result is padded from
/// [`FALLBACK_COLORS`], skipping colors already present.
///
/// The result can be shorter than `max_colors` only when both the image and
/// the fallback set are exhausted; callers seeding a palette treat that as a
/// partial seed.
///
/// # Examples
///
/// ```
/// use knitchart::color::Rgb;
/// use knitchart::quantize::dominant_colors;
///
/// let red = Rgb::new(255, 0, 0);
/// let pixels = vec![red; 9];
/// let colors = dominant_colors(pixels, 5);
/// assert_eq!(colors[0], red);
/// assert_eq!(colors.len(), 5); // padded from the fallback set
/// ```
pub fn dominant_colors<I>(pixels: I, max_colors: usize) -> Vec<Rgb>
where
    I: IntoIterator<Item = Rgb>,
{
    if max_colors == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<Rgb, u32> = HashMap::new();
    let mut first_seen: Vec<Rgb> = Vec::new();
    for pixel in pixels {
        let count = counts.entry(pixel).or_insert(0);
        if *count == 0 {
            first_seen.push(pixel);
        }
        *count += 1;
    }

    // first_seen is already in encounter order; a stable sort by descending
    // frequency therefore breaks ties on first appearance.
    let mut ranked = first_seen;
    ranked.sort_by_key(|color| std::cmp::Reverse(counts[color]));
    ranked.truncate(max_colors);

    for fallback in FALLBACK_COLORS {
        if ranked.len() >= max_colors {
            break;
        }
        if !ranked.contains(&fallback) {
            ranked.push(fallback);
        }
    }

    ranked
}
