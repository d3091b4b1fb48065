//! Nearest-neighbour mask resampling.
//!
//! Destination pixel `(x, y)` samples source pixel
//! `(round(x * mw / w), round(y * mh / h))`, clamped to the source canvas.
//! Rounding is half away from zero. Boolean semantics are preserved: no
//! interpolation ever produces an intermediate value.

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};
use crate::raster::for_each_chunk_mut;

/// Resize a boolean mask to `width x height`.
///
/// An unchanged size returns a bit-identical copy.
///
/// # Errors
/// [`Error::InvalidDimensions`] when the target is zero-sized, or when the
/// source is empty and the target is not.
pub fn resize_mask(mask: ArrayView2<bool>, width: usize, height: usize) -> Result<Array2<bool>> {
    resample(mask, width, height, |&v| v)
}

/// Resize a byte mask (nonzero = set) to a `width x height` boolean mask.
pub fn resize_mask_u8(mask: ArrayView2<u8>, width: usize, height: usize) -> Result<Array2<bool>> {
    resample(mask, width, height, |&v| v != 0)
}

fn resample<T, F>(mask: ArrayView2<T>, width: usize, height: usize, is_set: F) -> Result<Array2<bool>>
where
    T: Sync,
    F: Fn(&T) -> bool + Sync + Send,
{
    let (src_h, src_w) = mask.dim();

    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if src_w == 0 || src_h == 0 {
        return Err(Error::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }

    if (src_w, src_h) == (width, height) {
        log::trace!("resize_mask: {width}x{height} unchanged, copying");
        return Ok(mask.map(&is_set));
    }

    let fx = src_w as f64 / width as f64;
    let fy = src_h as f64 / height as f64;

    // Source column for every destination column, computed once.
    let columns: Vec<usize> = (0..width)
        .map(|x| ((x as f64 * fx).round() as usize).min(src_w - 1))
        .collect();

    let mut out = vec![false; width * height];
    for_each_chunk_mut(&mut out, width, |y, row| {
        let sy = ((y as f64 * fy).round() as usize).min(src_h - 1);
        let src_row = mask.row(sy);
        for (dst, &sx) in row.iter_mut().zip(&columns) {
            *dst = is_set(&src_row[sx]);
        }
    });

    Array2::from_shape_vec((height, width), out).map_err(|_| Error::InvalidDimensions { width, height })
}
