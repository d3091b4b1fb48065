//! Raster buffer helpers.
//!
//! - Checked construction of `ndarray` views over flat, row-major buffers
//! - Min-max normalisation of arbitrary numeric rasters to bytes
//! - Chunked (optionally rayon-parallel) kernels shared by the filters
//!
//! Masks are `(height, width)`, images are `(height, width, channels)`.

use ndarray::{Array, ArrayView, ArrayView2, ArrayView3, ArrayViewMut, ArrayViewMut2, ArrayViewMut3, Dimension};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};

/// Elements per work item when a kernel does not care about row boundaries.
const CHUNK_LEN: usize = 1 << 14;

fn checked_len(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

fn expect_len(actual: usize, dims: &[usize], width: usize, height: usize) -> Result<()> {
    let expected = checked_len(dims).ok_or(Error::InvalidDimensions { width, height })?;
    if expected != actual {
        return Err(Error::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Wrap a flat `width * height` buffer as a `(height, width)` mask view.
pub fn mask_view<T>(data: &[T], width: usize, height: usize) -> Result<ArrayView2<'_, T>> {
    expect_len(data.len(), &[height, width], width, height)?;
    ArrayView2::from_shape((height, width), data).map_err(|_| Error::SizeMismatch {
        expected: width * height,
        actual: data.len(),
    })
}

/// Mutable counterpart of [`mask_view`].
pub fn mask_view_mut<T>(data: &mut [T], width: usize, height: usize) -> Result<ArrayViewMut2<'_, T>> {
    expect_len(data.len(), &[height, width], width, height)?;
    let actual = data.len();
    ArrayViewMut2::from_shape((height, width), data).map_err(|_| Error::SizeMismatch {
        expected: width * height,
        actual,
    })
}

/// Wrap a flat interleaved buffer as a `(height, width, channels)` image view.
pub fn image_view<T>(
    data: &[T],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<ArrayView3<'_, T>> {
    expect_len(data.len(), &[height, width, channels], width, height)?;
    ArrayView3::from_shape((height, width, channels), data).map_err(|_| Error::SizeMismatch {
        expected: width * height * channels,
        actual: data.len(),
    })
}

/// Mutable counterpart of [`image_view`].
pub fn image_view_mut<T>(
    data: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<ArrayViewMut3<'_, T>> {
    expect_len(data.len(), &[height, width, channels], width, height)?;
    let actual = data.len();
    ArrayViewMut3::from_shape((height, width, channels), data).map_err(|_| Error::SizeMismatch {
        expected: width * height * channels,
        actual,
    })
}

/// Linearly rescale a raster to the full byte range using its own min/max.
///
/// `(v - min) / (max - min) * 255`, truncated. The step is lossy and cannot
/// be undone. A flat raster (or one with no finite values) maps to zeros;
/// NaN elements map to 0.
pub fn normalize_to_u8<T, D>(input: ArrayView<'_, T, D>) -> Array<u8, D>
where
    T: Copy + Into<f64>,
    D: Dimension,
{
    let (min, max) = input.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        let v: f64 = v.into();
        (lo.min(v), hi.max(v))
    });

    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        log::debug!("normalize_to_u8: degenerate range [{min}, {max}], output is zero");
        return Array::zeros(input.raw_dim());
    }

    input.mapv(|v| {
        let v: f64 = v.into();
        ((v - min) / range * 255.0) as u8
    })
}

/// Run `f` over consecutive `chunk_len`-sized pieces of `data`.
///
/// The closure receives the chunk index; with `parallel` enabled the chunks
/// are spread over the rayon pool, but the call still returns only after
/// every chunk is processed.
pub(crate) fn for_each_chunk_mut<T, F>(data: &mut [T], chunk_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if chunk_len == 0 || data.is_empty() {
        return;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(i, chunk)| f(i, chunk));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(i, chunk)| f(i, chunk));
}

/// Replace every byte `v` of `image` with `lut[v]`.
pub(crate) fn apply_lut<D: Dimension>(image: &mut ArrayViewMut<'_, u8, D>, lut: &[u8; 256]) {
    match image.as_slice_memory_order_mut() {
        Some(data) => for_each_chunk_mut(data, CHUNK_LEN, |_, chunk| {
            for v in chunk.iter_mut() {
                *v = lut[*v as usize];
            }
        }),
        None => image.map_inplace(|v| *v = lut[*v as usize]),
    }
}
