//! Squarified treemap layout (Bruls, Huizing, van Wijk).
//!
//! Items are placed in bands along the shorter side of the remaining canvas. The split search is
//! greedy: a band grows while adding the next item does not make its worst aspect ratio worse.
//! Ratios are judged on the padded cells, the shapes that are actually drawn.

use crate::error::{Result, check_canvas};
use crate::{Error, Rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Band spans the full canvas height; cells stack top to bottom.
    Row,
    /// Band spans the full canvas width; cells stack left to right.
    Column,
}

impl Orientation {
    pub fn for_canvas(canvas: &Rectangle) -> Self {
        if canvas.width >= canvas.height {
            Self::Row
        } else {
            Self::Column
        }
    }
}

/// Lays `sizes` out in one band of `canvas`. Sizes are areas in canvas units.
pub fn layout_band(sizes: &[f64], canvas: &Rectangle) -> Vec<Rectangle> {
    let covered: f64 = sizes.iter().sum();
    let mut out = Vec::with_capacity(sizes.len());
    match Orientation::for_canvas(canvas) {
        Orientation::Row => {
            let band_width = covered / canvas.height;
            let mut y = canvas.y;
            for &size in sizes {
                let h = size / band_width;
                out.push(Rectangle::new(canvas.x, y, band_width, h));
                y += h;
            }
        }
        Orientation::Column => {
            let band_height = covered / canvas.width;
            let mut x = canvas.x;
            for &size in sizes {
                let w = size / band_height;
                out.push(Rectangle::new(x, canvas.y, w, band_height));
                x += w;
            }
        }
    }
    out
}

/// The part of `canvas` left over once a band holding `sizes` has been placed.
pub fn leftover(sizes: &[f64], canvas: &Rectangle) -> Rectangle {
    let covered: f64 = sizes.iter().sum();
    match Orientation::for_canvas(canvas) {
        Orientation::Row => {
            let band_width = covered / canvas.height;
            Rectangle::new(
                canvas.x + band_width,
                canvas.y,
                canvas.width - band_width,
                canvas.height,
            )
        }
        Orientation::Column => {
            let band_height = covered / canvas.width;
            Rectangle::new(
                canvas.x,
                canvas.y + band_height,
                canvas.width,
                canvas.height - band_height,
            )
        }
    }
}

/// Worst aspect ratio among the padded cells of a band holding `sizes`.
pub fn worst_ratio(sizes: &[f64], canvas: &Rectangle) -> f64 {
    layout_band(sizes, canvas)
        .into_iter()
        .map(|rect| rect.padded().aspect_ratio())
        .fold(0.0, f64::max)
}

/// Number of leading `sizes` that go into the next band.
///
/// Returns the smallest `i` for which the band of `i` items has a strictly better worst ratio
/// than the band of `i + 1` items, or `len - 1` when no such `i` exists. For two or more sizes
/// the result is always in `1..len`, so at least one item is left for the remaining canvas.
pub fn find_split(sizes: &[f64], canvas: &Rectangle) -> usize {
    for i in 1..sizes.len() {
        if worst_ratio(&sizes[..i], canvas) < worst_ratio(&sizes[..=i], canvas) {
            return i;
        }
    }
    sizes.len().saturating_sub(1)
}

fn check_weights(weights: &[f64]) -> Result<()> {
    for (index, &value) in weights.iter().enumerate() {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::InvalidWeight { index, value });
        }
    }
    Ok(())
}

// Weights are divided by the largest one before summing, so finite inputs never sum to infinity.
fn scaled_to_area(weights: &[f64], canvas: &Rectangle) -> Vec<f64> {
    let max = weights.iter().copied().fold(0.0, f64::max);
    let total: f64 = weights.iter().map(|w| w / max).sum();
    let k = canvas.area() / total;
    weights.iter().map(|w| w / max * k).collect()
}

/// Computes one rectangle per weight covering the canvas `(x, y, width, height)`.
///
/// The output has the same length and order as `weights` and the rectangle areas are
/// proportional to the weights. Rectangles are not padded; see [`Rectangle::padded`].
///
/// Weights are laid out in the order given. Sorting them largest first usually gives squarer
/// cells, but that is left to the caller.
pub fn squarify(
    weights: &[f64],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<Vec<Rectangle>> {
    check_canvas(width, height)?;
    check_weights(weights)?;

    let mut out = Vec::with_capacity(weights.len());
    let mut canvas = Rectangle::new(x, y, width, height);
    let mut remaining = weights;

    while !remaining.is_empty() {
        let sizes = scaled_to_area(remaining, &canvas);
        if sizes.len() == 1 {
            out.extend(layout_band(&sizes, &canvas));
            break;
        }

        let split = find_split(&sizes, &canvas);
        let (band, _) = sizes.split_at(split);
        tracing::debug!(
            placed = out.len(),
            band = split,
            left = sizes.len() - split,
            orientation = ?Orientation::for_canvas(&canvas),
            "squarify band"
        );

        for rect in layout_band(band, &canvas) {
            tracing::trace!(?rect, "squarify cell");
            out.push(rect);
        }
        canvas = leftover(band, &canvas);
        remaining = &remaining[split..];
    }

    Ok(out)
}
