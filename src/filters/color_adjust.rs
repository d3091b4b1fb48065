//! Gamma correction (power-law intensity remap), in place.
//!
//! `s = c * r^gamma` on intensities normalised to 0.0-1.0, evaluated once
//! per byte value into a lookup table and then applied to every element.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width) or (height, width, 1)
//! - **Color**: (height, width, channels), every channel transformed alike
//!
//! Channel count is inferred from the trailing dimension.

use ndarray::{Array, ArrayView, ArrayViewMut, Dimension};

use crate::error::{Error, Result};
use crate::raster::{apply_lut, normalize_to_u8};

const EXPECTED_SHAPE: &str = "(height, width) or (height, width, channels)";

/// Build the gamma lookup table.
///
/// `lut[i] = clamp(c * round(255 * (i / 255)^gamma), 0, 255)`, truncated.
/// Non-finite results saturate (`+inf` to 255, `NaN` to 0).
pub fn gamma_lut(gamma: f64, c: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        let s = c * (255.0 * (i as f64 / 255.0).powf(gamma)).round();
        *v = s.clamp(0.0, 255.0) as u8;
    }
    lut
}

fn check_dims(shape: &[usize]) -> Result<()> {
    match shape.len() {
        2 | 3 => Ok(()),
        _ => Err(Error::invalid_shape(EXPECTED_SHAPE, shape)),
    }
}

/// Apply gamma correction to a byte image in place.
///
/// # Arguments
/// * `image` - Grayscale (height, width) or (height, width, channels) image
/// * `gamma` - Exponent: < 1.0 brightens, > 1.0 darkens, 1.0 = no change
/// * `c` - Gain applied after the power law, 1.0 = no change
///
/// No range is enforced on `gamma` or `c`; non-physical values (e.g.
/// `gamma <= 0`) still produce a well-defined table.
///
/// # Errors
/// [`Error::InvalidShape`] for anything but 2 or 3 dimensions. The image is
/// untouched in that case.
pub fn gamma_correct<D: Dimension>(mut image: ArrayViewMut<u8, D>, gamma: f64, c: f64) -> Result<()> {
    check_dims(image.shape())?;
    let lut = gamma_lut(gamma, c);
    apply_lut(&mut image, &lut);
    Ok(())
}

/// Gamma-correct an image of any numeric type.
///
/// The input is first min-max normalised to bytes (lossy, irreversible),
/// then corrected. Returns the new byte image; the input is not modified.
pub fn gamma_correct_normalized<T, D>(input: ArrayView<T, D>, gamma: f64, c: f64) -> Result<Array<u8, D>>
where
    T: Copy + Into<f64>,
    D: Dimension,
{
    check_dims(input.shape())?;
    let mut bytes = normalize_to_u8(input);
    gamma_correct(bytes.view_mut(), gamma, c)?;
    Ok(bytes)
}
