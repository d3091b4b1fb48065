//! Photometric filters, all applied in place on byte images.
//!
//! ## Supported Formats
//!
//! | Filter | Shape | Notes |
//! |--------|-------|-------|
//! | gamma_correct | (H, W) or (H, W, C) | every channel alike |
//! | contrast_stretch | (H, W, 3) | one range shared by all channels |
//! | fluor_filter | (H, W, 3) | BGR channel order |
//!
//! ## Architecture
//!
//! - **Lookup tables** - each filter evaluates its curve once per byte value
//! - **Validate, then mutate** - a rejected call leaves the buffer untouched
//! - **Normalised variants** - `*_normalized` accept any numeric element type,
//!   min-max rescale it to bytes (lossy) and return the filtered copy
//! - **Parallel rows** - with the `parallel` feature, rows are processed on
//!   the rayon pool; calls remain blocking

pub mod color_adjust;
pub mod fluorescence;
pub mod levels_curves;

pub use color_adjust::{gamma_correct, gamma_correct_normalized, gamma_lut};
pub use fluorescence::{fluor_filter, fluor_filter_normalized, FluorChannel, FluorSettings};
pub use levels_curves::{contrast_stretch, contrast_stretch_normalized, stretch_lut};
