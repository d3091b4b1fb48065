//! maskops: raster operations for microscopy and vision pipelines.
//!
//! Pixel-level algorithms over in-memory buffers:
//!
//! - **Masks**: dilation distance between two masks, boolean resize, border
//!   highlighting with area/perimeter metrics
//! - **Selection**: color slicing by Euclidean distance to a target color
//! - **Filters**: gamma correction, contrast stretch, fluorescence remapping
//!
//! ## Image Format
//! Buffers are `ndarray` arrays in row-major order:
//! - **Mask**: (height, width), `u8` (nonzero = set) or `bool`
//! - **Image**: (height, width, channels), `u8` per channel (0-255)
//!
//! Flat buffers can be wrapped with the checked constructors in [`raster`],
//! which reject a length that disagrees with the declared dimensions.
//!
//! Operations that modify an image take a mutable view, so exclusive access
//! is enforced by the borrow checker. Every operation validates its input
//! before writing: a returned error means the buffer was not touched.
//!
//! Filters that accept non-byte images (`*_normalized`) first rescale them
//! to 0-255 using the image's own minimum and maximum. That step is lossy.
//!
//! ## Logging
//! Diagnostics go through the [`log`] facade; install any logger to see them.

pub mod color;
pub mod error;
pub mod filters;
pub mod mask;
pub mod raster;
pub mod selection;

pub use color::Rgb;
pub use error::{Error, Result};
pub use filters::{
    contrast_stretch, contrast_stretch_normalized, fluor_filter, fluor_filter_normalized,
    gamma_correct, gamma_correct_normalized, FluorChannel, FluorSettings,
};
pub use mask::{
    highlight_mask_border, mask_distance, mask_distance_bool, mask_distance_or_sentinel,
    resize_mask, resize_mask_u8, BorderMetrics, BORDER_VALUE, MAX_DILATE_ITERATIONS, NOT_REACHED,
};
pub use selection::{color_slice, color_slice_normalized};
