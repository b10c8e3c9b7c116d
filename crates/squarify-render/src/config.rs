use crate::palette::ColorTable;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_WIDTH: f64 = 1024.0;
pub const DEFAULT_HEIGHT: f64 = 768.0;
pub const DEFAULT_FONT_SIZE: f64 = 11.0;
pub const DEFAULT_BORDER_COLOR: &str = "#ffffff";
pub const DEFAULT_FALLBACK_COLOR: &str = "transparent";

#[derive(Debug, Clone, PartialEq)]
pub struct TreemapOptions {
    /// Canvas width of the emitted `<svg>`.
    pub width: f64,
    /// Canvas height of the emitted `<svg>`.
    pub height: f64,
    /// Label font size; also the minimum cell height that still gets a label.
    pub font_size: f64,
    /// Stroke color of every cell.
    pub border_color: String,
    /// Color key to fill color.
    pub colors: ColorTable,
    /// Fill for cells whose color key is missing from `colors`.
    pub fallback_color: String,
    /// Lay items out largest first instead of in input order.
    pub sort_descending: bool,
    /// XML-escape label text. Off by default: the embedding host owns label safety.
    pub escape_labels: bool,
}

impl Default for TreemapOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            colors: ColorTable::severity(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            sort_descending: false,
            escape_labels: false,
        }
    }
}

fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_i64().map(|n| n as f64))
        .or_else(|| v.as_u64().map(|n| n as f64))
}

fn config_value<'a>(cfg: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = cfg;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

fn config_f64(cfg: &Value, path: &[&str]) -> Option<f64> {
    config_value(cfg, path).and_then(json_f64)
}

fn config_bool(cfg: &Value, path: &[&str]) -> Option<bool> {
    config_value(cfg, path).and_then(Value::as_bool)
}

fn config_string(cfg: &Value, path: &[&str]) -> Option<String> {
    config_value(cfg, path)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

impl TreemapOptions {
    /// Reads the `treemap` section of a JSON config, falling back to defaults per key.
    ///
    /// ```json
    /// { "treemap": { "width": 800, "fontSize": 12, "titleColor": { "high": "#c00" } } }
    /// ```
    ///
    /// An empty `titleColor` object keeps the default severity palette.
    pub fn from_config(cfg: &Value) -> Result<Self> {
        let defaults = Self::default();

        let colors = match config_value(cfg, &["treemap", "titleColor"]) {
            Some(v) => {
                let table = ColorTable::deserialize(v)?;
                if table.is_empty() {
                    defaults.colors
                } else {
                    table
                }
            }
            None => defaults.colors,
        };

        let options = Self {
            width: config_f64(cfg, &["treemap", "width"]).unwrap_or(defaults.width),
            height: config_f64(cfg, &["treemap", "height"]).unwrap_or(defaults.height),
            font_size: config_f64(cfg, &["treemap", "fontSize"]).unwrap_or(defaults.font_size),
            border_color: config_string(cfg, &["treemap", "borderColor"])
                .unwrap_or(defaults.border_color),
            colors,
            fallback_color: config_string(cfg, &["treemap", "fallbackColor"])
                .unwrap_or(defaults.fallback_color),
            sort_descending: config_bool(cfg, &["treemap", "sortDescending"])
                .unwrap_or(defaults.sort_descending),
            escape_labels: config_bool(cfg, &["treemap", "escapeLabels"])
                .unwrap_or(defaults.escape_labels),
        };
        options.validate()?;
        Ok(options)
    }

    /// Rejects canvases and font sizes the layout and label fitting cannot work with.
    pub fn validate(&self) -> Result<()> {
        squarify_core::error::check_canvas(self.width, self.height)?;
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(Error::InvalidOptions {
                message: format!("font size must be finite and positive, got {}", self.font_size),
            });
        }
        Ok(())
    }

    pub fn color_for(&self, color_key: &str) -> &str {
        self.colors
            .get(color_key)
            .unwrap_or(self.fallback_color.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_config_empty_is_default() {
        let options = TreemapOptions::from_config(&json!({})).unwrap();
        assert_eq!(options, TreemapOptions::default());
        assert_eq!(options.width, 1024.0);
        assert_eq!(options.height, 768.0);
        assert_eq!(options.font_size, 11.0);
        assert_eq!(options.border_color, "#ffffff");
    }

    #[test]
    fn from_config_reads_treemap_section() {
        let cfg = json!({
            "treemap": {
                "width": 640,
                "height": 480.5,
                "fontSize": 14,
                "borderColor": "#000",
                "titleColor": { "critical": "#800000", "high": "#ff0000" },
                "fallbackColor": "#cccccc",
                "sortDescending": true,
                "escapeLabels": true
            }
        });
        let options = TreemapOptions::from_config(&cfg).unwrap();
        assert_eq!(options.width, 640.0);
        assert_eq!(options.height, 480.5);
        assert_eq!(options.font_size, 14.0);
        assert_eq!(options.border_color, "#000");
        assert_eq!(options.colors.len(), 2);
        assert_eq!(options.color_for("critical"), "#800000");
        assert_eq!(options.color_for("medium"), "#cccccc");
        assert!(options.sort_descending);
        assert!(options.escape_labels);
    }

    #[test]
    fn from_config_empty_title_color_keeps_palette() {
        let cfg = json!({ "treemap": { "titleColor": {} } });
        let options = TreemapOptions::from_config(&cfg).unwrap();
        assert_eq!(options.colors, ColorTable::severity());
    }

    #[test]
    fn from_config_rejects_bad_values() {
        let err = TreemapOptions::from_config(&json!({ "treemap": { "height": 0 } })).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));

        let err =
            TreemapOptions::from_config(&json!({ "treemap": { "fontSize": -2 } })).unwrap_err();
        assert!(matches!(err, Error::InvalidOptions { .. }));

        let err = TreemapOptions::from_config(&json!({ "treemap": { "titleColor": { "high": 3 } } }))
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
