//! Mask distance by iterative dilation.
//!
//! Mask A is grown one pixel at a time with a 3x3 square structuring element
//! (8-connected) until it contacts mask B. A grown mask contacts B when one
//! of its pixels lies on a B pixel or is 8-adjacent to one, i.e. when a
//! single further dilation would make the two overlap. The number of
//! dilations performed up to that point is the distance.
//!
//! | A vs B | distance |
//! |--------|----------|
//! | B empty | `Some(0)` |
//! | A covers or overlaps B | `Some(0)` |
//! | A touches B (8-adjacent) | `Some(0)` |
//! | one free pixel between them | `Some(1)` |
//! | A empty, B non-empty | `None` |
//!
//! Growth is bounded by [`MAX_DILATE_ITERATIONS`].

use ndarray::ArrayView2;

use crate::error::{Error, Result};
use crate::raster::for_each_chunk_mut;

/// Upper bound on dilation rounds before giving up.
///
/// Any non-empty mask fills a `w x h` canvas in `max(w, h)` rounds, so the
/// bound only matters for canvases wider or taller than this.
pub const MAX_DILATE_ITERATIONS: usize = 1 << 16;

/// Value returned by [`mask_distance_or_sentinel`] when B is never reached.
pub const NOT_REACHED: i64 = -1;

/// Number of dilations needed for `a` to contact `b` (nonzero = set).
///
/// Returns `Ok(None)` when `b` cannot be reached: `a` is empty, growth
/// stalls, or [`MAX_DILATE_ITERATIONS`] is exhausted. Neither input is
/// modified.
///
/// # Errors
/// [`Error::ShapeMismatch`] when the masks differ in shape.
pub fn mask_distance(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<Option<usize>> {
    check_same_shape(a.shape(), b.shape())?;
    let (height, width) = a.dim();

    let working: Vec<bool> = a.iter().map(|&v| v != 0).collect();
    let target: Vec<bool> = b.iter().map(|&v| v != 0).collect();

    Ok(grow_until_contact(working, &target, width, height))
}

/// [`mask_distance`] for boolean masks.
pub fn mask_distance_bool(a: ArrayView2<bool>, b: ArrayView2<bool>) -> Result<Option<usize>> {
    check_same_shape(a.shape(), b.shape())?;
    let (height, width) = a.dim();

    let working: Vec<bool> = a.iter().copied().collect();
    let target: Vec<bool> = b.iter().copied().collect();

    Ok(grow_until_contact(working, &target, width, height))
}

/// [`mask_distance`] with [`NOT_REACHED`] in place of `None`.
pub fn mask_distance_or_sentinel(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<i64> {
    Ok(mask_distance(a, b)?.map_or(NOT_REACHED, |d| d as i64))
}

fn check_same_shape(left: &[usize], right: &[usize]) -> Result<()> {
    if left != right {
        return Err(Error::ShapeMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        });
    }
    Ok(())
}

fn grow_until_contact(
    mut working: Vec<bool>,
    target: &[bool],
    width: usize,
    height: usize,
) -> Option<usize> {
    if !target.iter().any(|&t| t) {
        return Some(0);
    }
    if !working.iter().any(|&w| w) {
        log::debug!("mask_distance: source mask is empty, target unreachable");
        return None;
    }

    // Pixels from which one more dilation reaches the target.
    let mut contact = vec![false; target.len()];
    dilate_into(target, &mut contact, width, height);

    let mut next = vec![false; working.len()];
    for iteration in 0..MAX_DILATE_ITERATIONS {
        if working.iter().zip(&contact).any(|(&w, &c)| w && c) {
            log::trace!("mask_distance: contact after {iteration} dilations");
            return Some(iteration);
        }

        if !dilate_into(&working, &mut next, width, height) {
            log::debug!("mask_distance: growth stalled after {iteration} dilations");
            return None;
        }
        std::mem::swap(&mut working, &mut next);
    }

    log::debug!("mask_distance: no contact within {MAX_DILATE_ITERATIONS} dilations");
    None
}

/// One 3x3 dilation of `src` into `dst`. Returns true if any pixel was added.
fn dilate_into(src: &[bool], dst: &mut [bool], width: usize, height: usize) -> bool {
    for_each_chunk_mut(dst, width, |y, row| {
        let y_start = y.saturating_sub(1);
        let y_end = (y + 2).min(height);

        for (x, out) in row.iter_mut().enumerate() {
            let x_start = x.saturating_sub(1);
            let x_end = (x + 2).min(width);

            *out = (y_start..y_end)
                .any(|sy| src[sy * width + x_start..sy * width + x_end].iter().any(|&v| v));
        }
    });

    dst.iter().zip(src).any(|(&d, &s)| d && !s)
}
