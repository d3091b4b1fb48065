//! Contrast stretch: linear remap of the observed intensity range, in place.
//!
//! The darkest value found in the image maps to `low`, the brightest to
//! `high`, everything in between linearly. One range is measured over all
//! three channels so the channels stay balanced against each other.
//!
//! ## Supported Formats
//!
//! - **RGB / BGR**: (height, width, 3) only

use ndarray::{Array3, ArrayView3, ArrayViewMut3};

use crate::error::{Error, Result};
use crate::raster::{apply_lut, normalize_to_u8};

const EXPECTED_SHAPE: &str = "(height, width, 3)";

/// Build the stretch lookup table for an observed `[min, max]` range.
///
/// `lut[i] = round(low + (i - min) * (high - low) / (max - min))`, clamped to
/// 0..=255. Returns `None` for an empty or inverted input range.
pub fn stretch_lut(min: u8, max: u8, low: u8, high: u8) -> Option<[u8; 256]> {
    if max <= min {
        return None;
    }

    let scale = (high as f64 - low as f64) / (max as f64 - min as f64);
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        let s = low as f64 + (i as f64 - min as f64) * scale;
        *v = s.round().clamp(0.0, 255.0) as u8;
    }
    Some(lut)
}

/// Stretch an RGB byte image so its range becomes `[low, high]`, in place.
///
/// # Arguments
/// * `image` - RGB image (height, width, 3)
/// * `low` - Output value for the darkest input value
/// * `high` - Output value for the brightest input value
///
/// `low > high` inverts the image. An image with a single intensity has no
/// range to stretch and is left as is.
///
/// # Errors
/// [`Error::InvalidShape`] unless the image has exactly 3 channels.
pub fn contrast_stretch(mut image: ArrayViewMut3<u8>, low: u8, high: u8) -> Result<()> {
    if image.dim().2 != 3 {
        return Err(Error::invalid_shape(EXPECTED_SHAPE, image.shape()));
    }

    let Some((min, max)) = image
        .iter()
        .fold(None, |acc: Option<(u8, u8)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    else {
        return Ok(());
    };

    match stretch_lut(min, max, low, high) {
        Some(lut) => apply_lut(&mut image, &lut),
        None => log::debug!("contrast_stretch: flat image (value {min}), left unchanged"),
    }
    Ok(())
}

/// Contrast-stretch an image of any numeric type.
///
/// The input is first min-max normalised to bytes (lossy), so it spans
/// 0..=255 before being stretched to `[low, high]`.
pub fn contrast_stretch_normalized<T>(input: ArrayView3<T>, low: u8, high: u8) -> Result<Array3<u8>>
where
    T: Copy + Into<f64>,
{
    if input.dim().2 != 3 {
        return Err(Error::invalid_shape(EXPECTED_SHAPE, input.shape()));
    }
    let mut bytes = normalize_to_u8(input);
    contrast_stretch(bytes.view_mut(), low, high)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn full_range() -> Array3<u8> {
        Array3::from_shape_fn((16, 16, 3), |(y, x, c)| match c {
            0 => (y * 16 + x) as u8,
            1 => 255 - (y * 16 + x) as u8,
            _ => 128,
        })
    }

    #[test]
    fn test_full_range_identity() {
        let original = full_range();
        let mut img = original.clone();
        contrast_stretch(img.view_mut(), 0, 255).unwrap();
        assert_eq!(img, original);
    }

    #[test]
    fn test_stretches_narrow_range() {
        let mut img = array![[[50u8, 100, 150], [75, 125, 100]]];
        contrast_stretch(img.view_mut(), 0, 200).unwrap();
        assert_eq!(img, array![[[0u8, 100, 200], [50, 150, 100]]]);
    }

    #[test]
    fn test_inverted_bounds_invert() {
        let mut img = array![[[0u8, 255, 100]]];
        contrast_stretch(img.view_mut(), 255, 0).unwrap();
        assert_eq!(img, array![[[255u8, 0, 155]]]);
    }

    #[test]
    fn test_flat_image_unchanged() {
        let mut img = Array3::<u8>::from_elem((2, 2, 3), 42);
        contrast_stretch(img.view_mut(), 0, 255).unwrap();
        assert!(img.iter().all(|&v| v == 42));
    }

    #[test]
    fn test_rejects_grayscale() {
        let mut img = Array3::<u8>::zeros((2, 2, 1));
        assert!(matches!(
            contrast_stretch(img.view_mut(), 0, 255),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_stretch_lut_rejects_empty_range() {
        assert!(stretch_lut(10, 10, 0, 255).is_none());
        assert!(stretch_lut(10, 9, 0, 255).is_none());
    }

    #[test]
    fn test_normalized_float() {
        let img = array![[[0.0f32, 0.5, 1.0]]];
        let out = contrast_stretch_normalized(img.view(), 0, 100).unwrap();
        // normalised to [0, 127, 255], then 127 * 100 / 255 = 49.8
        assert_eq!(out, array![[[0u8, 50, 100]]]);
    }
}
