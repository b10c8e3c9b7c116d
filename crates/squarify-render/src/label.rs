//! Width-aware label truncation.
//!
//! No font metrics are available headlessly; a label is estimated at one `font_size` per
//! character.

use squarify_core::Rectangle;

/// Estimated rendered width of `label`.
pub fn estimated_width(label: &str, font_size: f64) -> f64 {
    label.chars().count() as f64 * font_size
}

/// How many leading characters of `label` fit into `cell`.
///
/// Cells no taller than the font get no label at all.
pub fn max_label_chars(label: &str, cell: &Rectangle, font_size: f64) -> usize {
    if cell.height <= font_size {
        return 0;
    }
    let chars = label.chars().count();
    if chars == 0 {
        return 0;
    }
    let fit = (cell.width / estimated_width(label, font_size) * chars as f64).ceil();
    if fit.is_finite() && fit > 0.0 {
        fit as usize
    } else {
        0
    }
}

/// The visible part of `label` for `cell`.
pub fn fit_label<'a>(label: &'a str, cell: &Rectangle, font_size: f64) -> &'a str {
    let max = max_label_chars(label, cell, font_size);
    match label.char_indices().nth(max) {
        Some((end, _)) => &label[..end],
        None => label,
    }
}
