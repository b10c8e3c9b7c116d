#![forbid(unsafe_code)]

//! SVG rendering for squarified treemaps.
//!
//! [`treemap`] is the whole pipeline: shape the weighted input, lay it out on the canvas, pad each
//! cell and serialize the result as a standalone `<svg>` document.
//!
//! Labels are inserted verbatim unless [`TreemapOptions::escape_labels`] is set; hosts that embed
//! the markup are responsible for the safety of label text.

pub mod config;
pub mod label;
pub mod palette;
pub mod svg;

pub use config::TreemapOptions;
pub use palette::ColorTable;
pub use svg::{TreemapCell, render_svg};

use serde_json::Value;
use squarify_core::{Dataset, Rectangle, shape, squarify};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] squarify_core::Error),
    #[error("invalid treemap options: {message}")]
    InvalidOptions { message: String },
    #[error("treemap config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Lays `dataset` out on the options' canvas and resolves label text and fill colors.
///
/// Cells come back in dataset order (after the optional descending sort), already padded.
pub fn layout_cells(dataset: &Dataset, options: &TreemapOptions) -> Result<Vec<TreemapCell>> {
    options.validate()?;

    let sorted;
    let dataset = if options.sort_descending {
        sorted = dataset.sorted_descending();
        &sorted
    } else {
        dataset
    };

    let rects = squarify(&dataset.weights(), 0.0, 0.0, options.width, options.height)?;
    let cells = dataset
        .items
        .iter()
        .zip(rects)
        .map(|(item, rect)| {
            let rect = rect.padded();
            TreemapCell {
                rect,
                fill: options.color_for(&item.color_key).to_string(),
                label: label::fit_label(&item.label, &rect, options.font_size).to_string(),
            }
        })
        .collect();
    Ok(cells)
}

/// Renders an already shaped dataset.
pub fn render_dataset(dataset: &Dataset, options: &TreemapOptions) -> Result<String> {
    let cells = layout_cells(dataset, options)?;
    tracing::debug!(
        cells = cells.len(),
        width = options.width,
        height = options.height,
        "rendering treemap"
    );
    Ok(render_svg(&cells, options))
}

/// Renders weighted hierarchical `data` as a treemap SVG document.
///
/// `data` is an object of objects, e.g.
/// `{"host1": {"high": 12, "medium": 4}, "host2": {"medium": 4}}`. Entries that do not fit that
/// shape are skipped; an unsupported `data` value yields an empty document of the requested size.
///
/// Fails only on invalid options, such as a zero-sized canvas.
pub fn treemap(data: &Value, options: &TreemapOptions) -> Result<String> {
    options.validate()?;
    render_dataset(&shape(data), options)
}

/// The unpadded layout of `data`, one rectangle per retained item.
pub fn layout_rects(data: &Value, options: &TreemapOptions) -> Result<Vec<Rectangle>> {
    options.validate()?;
    let dataset = shape(data);
    let dataset = if options.sort_descending {
        dataset.sorted_descending()
    } else {
        dataset
    };
    Ok(squarify(
        &dataset.weights(),
        0.0,
        0.0,
        options.width,
        options.height,
    )?)
}
