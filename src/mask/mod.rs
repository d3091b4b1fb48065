//! Binary mask operations.
//!
//! - **Distance**: dilation count for one mask to reach another
//! - **Resize**: nearest-neighbour resampling preserving boolean values
//! - **Border**: in-place border marking with area/perimeter metrics
//!
//! Masks are `(height, width)` arrays; for `u8` masks any nonzero value is set.

pub mod border;
pub mod distance;
pub mod resize;

pub use border::{highlight_mask_border, BorderMetrics, BORDER_VALUE};
pub use distance::{
    mask_distance, mask_distance_bool, mask_distance_or_sentinel, MAX_DILATE_ITERATIONS, NOT_REACHED,
};
pub use resize::{resize_mask, resize_mask_u8};
