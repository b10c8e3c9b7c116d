// Treemap SVG serialization.
//
// Cells are resolved into `TreemapCell`s first and written into a single buffer afterwards.

use crate::TreemapOptions;
use serde::Serialize;
use squarify_core::Rectangle;
use std::fmt::Write as _;

/// Label shift below the cell top, on top of half the font size.
const LABEL_BASELINE_BUFFER: f64 = 5.0;
const LABEL_OFFSET_X: f64 = 1.0;

/// One rendered treemap cell: a padded rectangle, its fill and its (possibly truncated) label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapCell {
    pub rect: Rectangle,
    pub fill: String,
    pub label: String,
}

impl TreemapCell {
    pub fn label_x(&self) -> f64 {
        self.rect.x + LABEL_OFFSET_X
    }

    pub fn label_y(&self, font_size: f64) -> f64 {
        self.rect.y + font_size / 2.0 + LABEL_BASELINE_BUFFER
    }
}

pub(crate) fn fmt_into(out: &mut String, buf: &mut ryu_js::Buffer, mut v: f64) {
    // Shortest round-trippable form without `.0` suffixes (JS `Number#toString()` style).
    if !v.is_finite() {
        out.push('0');
        return;
    }
    if v == -0.0 {
        v = 0.0;
    }
    out.push_str(buf.format_finite(v));
}

pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, &mut ryu_js::Buffer::new(), v);
    out
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

fn push_attr(out: &mut String, buf: &mut ryu_js::Buffer, name: &str, v: f64) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    fmt_into(out, buf, v);
    out.push('"');
}

/// Serializes `cells` as a standalone SVG document sized to the options' canvas.
pub fn render_svg(cells: &[TreemapCell], options: &TreemapOptions) -> String {
    let mut buf = ryu_js::Buffer::new();
    let width = fmt(options.width);
    let height = fmt(options.height);
    let font_size = fmt(options.font_size);
    let border = escape_xml(&options.border_color);

    let mut out = String::with_capacity(256 + cells.len() * 256);
    let _ = write!(
        &mut out,
        r#"<svg version="1.1" baseProfile="full" width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#
    );

    for cell in cells {
        out.push_str("<g><rect");
        push_attr(&mut out, &mut buf, "x", cell.rect.x);
        push_attr(&mut out, &mut buf, "y", cell.rect.y);
        push_attr(&mut out, &mut buf, "width", cell.rect.width);
        push_attr(&mut out, &mut buf, "height", cell.rect.height);
        out.push_str(r#" fill=""#);
        escape_xml_into(&mut out, &cell.fill);
        let _ = write!(&mut out, r#"" stroke="{border}" stroke-width="1"/>"#);

        out.push_str("<text");
        push_attr(&mut out, &mut buf, "x", cell.label_x());
        push_attr(&mut out, &mut buf, "y", cell.label_y(options.font_size));
        let _ = write!(
            &mut out,
            r#" font-size="{font_size}" dominant-baseline="central">"#
        );
        if options.escape_labels {
            escape_xml_into(&mut out, &cell.label);
        } else {
            out.push_str(&cell.label);
        }
        out.push_str("</text></g>");
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(label: &str) -> TreemapCell {
        TreemapCell {
            rect: Rectangle::new(1.0, 1.0, 73.0, 48.0),
            fill: "#d4003e".to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn fmt_matches_expected() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(f64::INFINITY), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(73.0), "73");
        assert_eq!(fmt(11.5), "11.5");
        assert_eq!(fmt(-3.25), "-3.25");
    }

    #[test]
    fn escape_xml_escapes_markup() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(escape_xml(""), "");
    }

    #[test]
    fn render_svg_writes_root_and_groups() {
        let options = TreemapOptions {
            width: 90.0,
            height: 50.0,
            ..Default::default()
        };
        let svg = render_svg(&[cell("host1")], &options);
        assert_eq!(
            svg,
            concat!(
                r#"<svg version="1.1" baseProfile="full" width="90" height="50" viewBox="0 0 90 50" xmlns="http://www.w3.org/2000/svg">"#,
                r##"<g><rect x="1" y="1" width="73" height="48" fill="#d4003e" stroke="#ffffff" stroke-width="1"/>"##,
                r#"<text x="2" y="11.5" font-size="11" dominant-baseline="central">host1</text></g>"#,
                "</svg>"
            )
        );
    }

    #[test]
    fn render_svg_escapes_labels_only_on_request() {
        let raw = render_svg(&[cell("<b>")], &TreemapOptions::default());
        assert!(raw.contains("><b></text>"));

        let options = TreemapOptions {
            escape_labels: true,
            ..Default::default()
        };
        let escaped = render_svg(&[cell("<b>")], &options);
        assert!(escaped.contains(">&lt;b&gt;</text>"));
    }
}
