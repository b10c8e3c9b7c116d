pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid canvas {width}x{height}: width and height must be finite and positive")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("invalid weight at index {index}: {value} (weights must be finite and positive)")]
    InvalidWeight { index: usize, value: f64 },
}

/// Fails unless both canvas dimensions, and their product, are finite and strictly positive.
pub fn check_canvas(width: f64, height: f64) -> Result<()> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) && ok(width * height) {
        Ok(())
    } else {
        Err(Error::InvalidCanvas { width, height })
    }
}
