//! Fluorescence channel remapping: per-channel amplification and recoloring.
//!
//! Microscopy images store one fluorophore per channel. This filter lets
//! each channel be amplified and painted in an arbitrary display color, then
//! composites the three contributions back into the image.
//!
//! ## Compositing
//!
//! The image is BGR: channel 0 is blue, 1 green, 2 red. For each source
//! channel `s` with amplified intensity `v_s` and display color `(R, G, B)`:
//!
//! ```text
//! out_blue  = clamp(round(sum_s v_s * B_s / 255), 0, 255)
//! out_green = clamp(round(sum_s v_s * G_s / 255), 0, 255)
//! out_red   = clamp(round(sum_s v_s * R_s / 255), 0, 255)
//! ```
//!
//! The blend is additive; overlapping fluorophores saturate instead of
//! hiding each other. With pure primaries every output channel receives a
//! single source, so the result equals a max composite.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::raster::{for_each_chunk_mut, normalize_to_u8};

const EXPECTED_SHAPE: &str = "(height, width, 3) BGR";

/// Amplification and display color of one fluorescence channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FluorChannel {
    /// Amplification in percent; 100 leaves the intensity unchanged.
    pub amp: i32,
    /// Display color packed as `0xRRGGBB`.
    pub color: u32,
}

impl FluorChannel {
    pub const fn new(amp: i32, color: u32) -> Self {
        Self { amp, color }
    }

    /// Intensity lookup table: `min(round(i * amp / 100), 255)`, floored at 0.
    pub fn amp_lut(&self) -> [u8; 256] {
        let f = self.amp as f64 * 0.01;
        let mut lut = [0u8; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            *v = (f * i as f64).round().clamp(0.0, 255.0) as u8;
        }
        lut
    }

    /// Display color weights in BGR order.
    fn weights_bgr(&self) -> [u32; 3] {
        let c = Rgb::from_packed(self.color);
        [c.b as u32, c.g as u32, c.r as u32]
    }
}

/// Settings for all three channels of a BGR fluorescence image.
///
/// The default paints every channel in its own color at 100 %, which is
/// the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FluorSettings {
    pub blue: FluorChannel,
    pub green: FluorChannel,
    pub red: FluorChannel,
}

impl Default for FluorSettings {
    fn default() -> Self {
        Self {
            blue: FluorChannel::new(100, Rgb::BLUE.packed()),
            green: FluorChannel::new(100, Rgb::GREEN.packed()),
            red: FluorChannel::new(100, Rgb::RED.packed()),
        }
    }
}

impl FluorSettings {
    pub const fn new(blue: FluorChannel, green: FluorChannel, red: FluorChannel) -> Self {
        Self { blue, green, red }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Channels in image order (B, G, R).
    fn channels(&self) -> [&FluorChannel; 3] {
        [&self.blue, &self.green, &self.red]
    }
}

/// Per-pixel compositor built from [`FluorSettings`].
struct Compositor {
    luts: [[u8; 256]; 3],
    weights: [[u32; 3]; 3],
}

impl Compositor {
    fn new(settings: &FluorSettings) -> Self {
        let channels = settings.channels();
        Self {
            luts: channels.map(|ch| ch.amp_lut()),
            weights: channels.map(|ch| ch.weights_bgr()),
        }
    }

    #[inline]
    fn apply(&self, px: [u8; 3]) -> [u8; 3] {
        let mut acc = [0u32; 3];
        for (s, &v) in px.iter().enumerate() {
            let v = self.luts[s][v as usize] as u32;
            for (d, a) in acc.iter_mut().enumerate() {
                *a += v * self.weights[s][d];
            }
        }
        acc.map(|a| ((a + 127) / 255).min(255) as u8)
    }
}

/// Amplify and recolor a BGR fluorescence image, in place.
///
/// Destructive: the original channel intensities cannot be recovered.
///
/// # Errors
/// [`Error::InvalidShape`] unless the image has exactly 3 channels. The
/// image is untouched in that case.
pub fn fluor_filter(mut image: ArrayViewMut3<u8>, settings: &FluorSettings) -> Result<()> {
    let (_, width, channels) = image.dim();
    if channels != 3 {
        return Err(Error::invalid_shape(EXPECTED_SHAPE, image.shape()));
    }
    if settings.is_identity() {
        log::debug!("fluor_filter: identity settings, nothing to do");
        return Ok(());
    }

    let compositor = Compositor::new(settings);

    match image.as_slice_mut() {
        Some(data) => for_each_chunk_mut(data, width * 3, |_, row| {
            for px in row.chunks_exact_mut(3) {
                let out = compositor.apply([px[0], px[1], px[2]]);
                px.copy_from_slice(&out);
            }
        }),
        None => {
            for mut px in image.lanes_mut(Axis(2)) {
                let out = compositor.apply([px[0], px[1], px[2]]);
                for (d, v) in out.into_iter().enumerate() {
                    px[d] = v;
                }
            }
        }
    }
    Ok(())
}

/// Fluorescence filter for images of any numeric type.
///
/// The input is first min-max normalised to bytes over all channels
/// (lossy), then filtered. Returns the new byte image.
pub fn fluor_filter_normalized<T>(input: ArrayView3<T>, settings: &FluorSettings) -> Result<Array3<u8>>
where
    T: Copy + Into<f64>,
{
    if input.dim().2 != 3 {
        return Err(Error::invalid_shape(EXPECTED_SHAPE, input.shape()));
    }
    let mut bytes = normalize_to_u8(input);
    fluor_filter(bytes.view_mut(), settings)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn bgr() -> Array3<u8> {
        array![[[10u8, 20, 30], [200, 100, 50]]]
    }

    #[test]
    fn test_default_is_identity() {
        let mut img = bgr();
        fluor_filter(img.view_mut(), &FluorSettings::default()).unwrap();
        assert_eq!(img, bgr());
    }

    #[test]
    fn test_compositor_identity_weights() {
        let c = Compositor::new(&FluorSettings::default());
        assert_eq!(c.apply([0, 128, 255]), [0, 128, 255]);
        assert_eq!(c.apply([1, 2, 3]), [1, 2, 3]);
    }

    #[test]
    fn test_amplification_clamps() {
        let mut settings = FluorSettings::default();
        settings.red.amp = 200;
        let mut img = bgr();
        fluor_filter(img.view_mut(), &settings).unwrap();
        assert_eq!(img, array![[[10u8, 20, 60], [200, 100, 100]]]);

        settings.red.amp = 1000;
        let mut img = bgr();
        fluor_filter(img.view_mut(), &settings).unwrap();
        assert_eq!(img[[0, 1, 2]], 255);
    }

    #[test]
    fn test_green_tinted_blue_moves_channel() {
        let settings = FluorSettings {
            green: FluorChannel::new(100, Rgb::BLUE.packed()),
            ..FluorSettings::default()
        };
        let mut img = array![[[0u8, 80, 0]]];
        fluor_filter(img.view_mut(), &settings).unwrap();
        assert_eq!(img, array![[[80u8, 0, 0]]]);
    }

    #[test]
    fn test_color_fraction_weights() {
        let settings = FluorSettings {
            red: FluorChannel::new(100, 0x80_00_40),
            ..FluorSettings::default()
        };
        let mut img = array![[[0u8, 0, 255]]];
        fluor_filter(img.view_mut(), &settings).unwrap();
        // blue gets 255 * 0x40 / 255, red 255 * 0x80 / 255
        assert_eq!(img, array![[[0x40u8, 0, 0x80]]]);
    }

    #[test]
    fn test_additive_blend_saturates() {
        let white = FluorChannel::new(100, Rgb::WHITE.packed());
        let settings = FluorSettings::new(white, white, white);
        let mut img = array![[[100u8, 100, 100], [10, 20, 30]]];
        fluor_filter(img.view_mut(), &settings).unwrap();
        assert_eq!(img, array![[[255u8, 255, 255], [60, 60, 60]]]);
    }

    #[test]
    fn test_zero_amp_blanks_channel() {
        let mut settings = FluorSettings::default();
        settings.blue.amp = 0;
        let mut img = bgr();
        fluor_filter(img.view_mut(), &settings).unwrap();
        assert_eq!(img, array![[[0u8, 20, 30], [0, 100, 50]]]);
    }

    #[test]
    fn test_negative_amp_floors_at_zero() {
        let lut = FluorChannel::new(-50, 0).amp_lut();
        assert!(lut.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_strided_image() {
        let mut settings = FluorSettings::default();
        settings.green.amp = 50;
        let mut img = Array3::<u8>::from_elem((2, 4, 3), 100);
        fluor_filter(img.slice_mut(ndarray::s![.., ..;2, ..]), &settings).unwrap();
        assert_eq!(img[[0, 0, 1]], 50);
        assert_eq!(img[[0, 1, 1]], 100);
    }

    #[test]
    fn test_rejects_rgba() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        assert!(matches!(
            fluor_filter(img.view_mut(), &FluorSettings::default()),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_normalized_input() {
        let img = array![[[0.0f64, 2.0, 4.0]]];
        let out = fluor_filter_normalized(img.view(), &FluorSettings::default()).unwrap();
        assert_eq!(out, array![[[0u8, 127, 255]]]);
    }
}
