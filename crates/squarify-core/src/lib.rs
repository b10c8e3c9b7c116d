#![forbid(unsafe_code)]

//! `squarify-core` computes squarified treemap layouts.
//!
//! The crate is headless: it turns weighted JSON-like input into a flat [`Dataset`]
//! and partitions a canvas into one [`Rectangle`] per item. Rendering lives in
//! `squarify-render`.

pub mod error;
pub mod geom;
pub mod shape;
pub mod squarify;

pub use error::{Error, Result};
pub use geom::Rectangle;
pub use shape::{Dataset, DatasetItem, shape};
pub use squarify::squarify;
