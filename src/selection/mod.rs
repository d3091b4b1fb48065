//! Selection algorithms that turn images into masks.
//!
//! - **Color slice**: select every pixel inside a color sphere around a
//!   target RGB value

pub mod color_slice;

pub use color_slice::{color_slice, color_slice_normalized};
