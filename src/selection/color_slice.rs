//! Color slicing: binary segmentation by distance to a target color.
//!
//! A pixel is selected when it lies inside the color sphere of radius `r0`
//! around the target, compared on squared integer distances so no square
//! root (and no float rounding) is involved.

use ndarray::{Array2, ArrayView3, Axis};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::raster::{for_each_chunk_mut, normalize_to_u8};

/// Select pixels within `radius` of `target`.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3)
/// * `target` - Center of the color sphere
/// * `radius` - Sphere radius; negative selects nothing
///
/// # Returns
/// Mask (height, width) with 1 for selected pixels, 0 elsewhere
///
/// # Errors
/// [`Error::InvalidShape`] unless the image has exactly 3 channels.
pub fn color_slice(input: ArrayView3<u8>, target: Rgb, radius: i32) -> Result<Array2<u8>> {
    let (height, width, channels) = input.dim();
    if channels != 3 {
        return Err(Error::invalid_shape("(height, width, 3)", input.shape()));
    }

    let mut mask = Array2::<u8>::zeros((height, width));
    if radius < 0 {
        return Ok(mask);
    }
    let r_sq = (radius as i64 * radius as i64).min(i32::MAX as i64) as i32;

    if let Some(data) = mask.as_slice_mut() {
        for_each_chunk_mut(data, width, |y, row| {
            let src = input.index_axis(Axis(0), y);
            for (x, out) in row.iter_mut().enumerate() {
                let d = target.distance_sq(src[[x, 0]], src[[x, 1]], src[[x, 2]]);
                *out = (d <= r_sq) as u8;
            }
        });
    }

    Ok(mask)
}

/// [`color_slice`] for images of any numeric type.
///
/// The image is first min-max normalised to 0..=255 over all channels
/// (lossy); the radius and target are interpreted on that byte scale.
pub fn color_slice_normalized<T>(input: ArrayView3<T>, target: Rgb, radius: i32) -> Result<Array2<u8>>
where
    T: Copy + Into<f64>,
{
    if input.dim().2 != 3 {
        return Err(Error::invalid_shape("(height, width, 3)", input.shape()));
    }
    let bytes = normalize_to_u8(input);
    color_slice(bytes.view(), target, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    fn sample() -> Array3<u8> {
        array![
            [[255, 0, 0], [0, 255, 0]],
            [[0, 0, 255], [10, 10, 10]],
        ]
    }

    #[test]
    fn test_selects_target_color() {
        let mask = color_slice(sample().view(), Rgb::new(255, 0, 0), 5).unwrap();
        assert_eq!(mask, array![[1, 0], [0, 0]]);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let img = array![[[3u8, 4, 0], [3, 5, 0]]];
        let mask = color_slice(img.view(), Rgb::BLACK, 5).unwrap();
        assert_eq!(mask, array![[1, 0]]);
    }

    #[test]
    fn test_zero_radius_is_exact_match() {
        let mask = color_slice(sample().view(), Rgb::new(10, 10, 10), 0).unwrap();
        assert_eq!(mask, array![[0, 0], [0, 1]]);
    }

    #[test]
    fn test_negative_radius_selects_nothing() {
        let mask = color_slice(sample().view(), Rgb::new(10, 10, 10), -1).unwrap();
        assert!(mask.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_huge_radius_selects_everything() {
        let mask = color_slice(sample().view(), Rgb::BLACK, i32::MAX).unwrap();
        assert!(mask.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_rejects_non_rgb() {
        let img = Array3::<u8>::zeros((2, 2, 4));
        assert!(matches!(
            color_slice(img.view(), Rgb::BLACK, 1),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_normalized_float_input() {
        let img = array![[[1.0f32, 0.0, 0.0], [0.0, 0.0, 0.0]]];
        let mask = color_slice_normalized(img.view(), Rgb::RED, 0).unwrap();
        assert_eq!(mask, array![[1, 0]]);
    }
}
