//! Mask border highlighting with area and perimeter counts.
//!
//! A border pixel is a set pixel with at least one unset pixel among its 8
//! neighbours. Pixels beyond the canvas edge count as unset, so a mask
//! touching the edge is bordered there too.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ndarray::ArrayViewMut2;

/// Value written into border pixels.
pub const BORDER_VALUE: u8 = 255;

/// Area and perimeter of a mask, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BorderMetrics {
    /// Set pixels before marking.
    pub area: usize,
    /// Border pixels found (and marked).
    pub circum: usize,
}

/// 8-connected neighbour offsets (dy, dx).
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Check if a pixel is set, treating out-of-bounds as unset.
#[inline]
fn is_set(mask: &ArrayViewMut2<u8>, y: isize, x: isize) -> bool {
    let (height, width) = mask.dim();
    if y < 0 || x < 0 || y as usize >= height || x as usize >= width {
        return false;
    }
    mask[[y as usize, x as usize]] != 0
}

/// Mark the border of `mask` with [`BORDER_VALUE`], in place.
///
/// Interior pixels keep their value; unset pixels stay 0. Marking never
/// clears a pixel, so the single row-major scan sees the original set/unset
/// layout throughout. If the mask already uses 255 as its set value, border
/// pixels are indistinguishable from interior ones afterwards; the metrics
/// are still exact.
pub fn highlight_mask_border(mut mask: ArrayViewMut2<u8>) -> BorderMetrics {
    let (height, width) = mask.dim();
    let mut metrics = BorderMetrics::default();

    for y in 0..height as isize {
        for x in 0..width as isize {
            if !is_set(&mask, y, x) {
                continue;
            }
            metrics.area += 1;

            let on_border = NEIGHBORS
                .iter()
                .any(|&(dy, dx)| !is_set(&mask, y + dy, x + dx));
            if on_border {
                mask[[y as usize, x as usize]] = BORDER_VALUE;
                metrics.circum += 1;
            }
        }
    }

    log::trace!(
        "highlight_mask_border: {}x{} area={} circum={}",
        width,
        height,
        metrics.area,
        metrics.circum
    );
    metrics
}
