use serde::{Deserialize, Serialize};

/// Visual gap inserted on each side of a placed cell.
pub const CELL_SPACING: f64 = 1.0;

/// Axis-aligned rectangle in canvas units, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Longer side over shorter side; `1.0` is a square.
    pub fn aspect_ratio(&self) -> f64 {
        (self.width / self.height).max(self.height / self.width)
    }

    /// Shrinks each axis by `margin` on both sides.
    ///
    /// An axis is only inset when its extent exceeds `2 * margin`; thinner axes are kept as-is
    /// so slivers never collapse to zero or negative sizes.
    pub fn inset(self, margin: f64) -> Self {
        let mut out = self;
        if out.width > 2.0 * margin {
            out.x += margin;
            out.width -= 2.0 * margin;
        }
        if out.height > 2.0 * margin {
            out.y += margin;
            out.height -= 2.0 * margin;
        }
        out
    }

    /// [`Rectangle::inset`] by [`CELL_SPACING`], separating adjacent cells.
    pub fn padded(self) -> Self {
        self.inset(CELL_SPACING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_insets_both_axes() {
        let r = Rectangle::new(0.0, 0.0, 75.0, 50.0).padded();
        assert_eq!(r, Rectangle::new(1.0, 1.0, 73.0, 48.0));
    }

    #[test]
    fn padded_keeps_thin_axes() {
        let r = Rectangle::new(10.0, 20.0, 2.0, 30.0).padded();
        assert_eq!(r, Rectangle::new(10.0, 21.0, 2.0, 28.0));

        let r = Rectangle::new(10.0, 20.0, 30.0, 1.5).padded();
        assert_eq!(r, Rectangle::new(11.0, 20.0, 28.0, 1.5));

        let r = Rectangle::new(0.0, 0.0, 2.0, 2.0).padded();
        assert_eq!(r, Rectangle::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn aspect_ratio_is_orientation_independent() {
        assert_eq!(Rectangle::new(0.0, 0.0, 10.0, 10.0).aspect_ratio(), 1.0);
        assert_eq!(Rectangle::new(0.0, 0.0, 40.0, 10.0).aspect_ratio(), 4.0);
        assert_eq!(Rectangle::new(0.0, 0.0, 10.0, 40.0).aspect_ratio(), 4.0);
    }
}
