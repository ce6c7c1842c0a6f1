//! CPU reference of the fragment shader.
//!
//! [`IccEffect`] evaluates the same per-pixel rule as
//! [`FRAGMENT_SHADER`](crate::shader::FRAGMENT_SHADER) so the contract can
//! be checked without a GPU, and so the effect can be rendered offline.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::{IndirectMask, LookupCube, LutError, LutResult, Zone};

/// Two lookup cubes selected per pixel by an indirect mask.
#[derive(Debug, Clone)]
pub struct IccEffect {
    primary: Arc<LookupCube>,
    secondary: Arc<LookupCube>,
}

impl IccEffect {
    /// `primary` colors [`Zone::Primary`] pixels, `secondary` colors
    /// [`Zone::Secondary`] pixels.
    pub fn new(primary: Arc<LookupCube>, secondary: Arc<LookupCube>) -> Self {
        Self { primary, secondary }
    }

    /// Primary cube (`color_data1`).
    pub fn primary(&self) -> &LookupCube {
        &self.primary
    }

    /// Secondary cube (`color_data2`).
    pub fn secondary(&self) -> &LookupCube {
        &self.secondary
    }

    /// Shades one normalized color given its normalized mask sample.
    pub fn shade(&self, color: [f32; 3], idx: f32) -> [f32; 3] {
        match Zone::from_normalized(idx) {
            Zone::Primary => self.primary.sample(color),
            Zone::Secondary => self.secondary.sample(color),
            Zone::Passthrough => color,
        }
    }

    /// Renders the effect in place over a packed RGB8 image.
    ///
    /// The mask is sampled at each pixel center with the same bilinear,
    /// clamp-to-edge filtering as its texture, so a mask of a different
    /// size is stretched over the image the way the GPU stretches it.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::DimensionMismatch`] if `rgb` is not
    /// `width * height * 3` bytes.
    pub fn render(
        &self,
        rgb: &mut [u8],
        width: u32,
        height: u32,
        mask: &IndirectMask,
    ) -> LutResult<()> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(LutError::DimensionMismatch {
                expected,
                actual: rgb.len(),
            });
        }
        if expected == 0 {
            return Ok(());
        }
        debug!(width, height, "rendering ICC effect on CPU");

        let (w, h) = (width as f32, height as f32);
        rgb.par_chunks_mut(width as usize * 3)
            .enumerate()
            .for_each(|(y, row)| {
                let v = (y as f32 + 0.5) / h;
                for (x, px) in row.chunks_exact_mut(3).enumerate() {
                    let u = (x as f32 + 0.5) / w;
                    let color = [px[0], px[1], px[2]].map(|c| c as f32 / 255.0);
                    let out = self.shade(color, mask.sample(u, v));
                    for (dst, src) in px.iter_mut().zip(out) {
                        *dst = to_u8(src);
                    }
                }
            });
        Ok(())
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ZoneBoundaries, build_mask};

    /// Cube whose every cell holds one color.
    fn flat(size: usize, color: [u8; 3]) -> Arc<LookupCube> {
        let bytes: Vec<u8> = std::iter::repeat_n(color, size * size * size).flatten().collect();
        Arc::new(LookupCube::from_bytes(size, &bytes).unwrap())
    }

    #[test]
    fn test_shade_follows_thresholds() {
        let fx = IccEffect::new(flat(2, [255, 0, 0]), flat(2, [0, 0, 255]));
        // Coordinates that land exactly on texel centers of a 2^3 cube
        let c = [0.0, 1.0, 0.25];

        assert_eq!(fx.shade(c, 1.0), [1.0, 0.0, 0.0]);
        assert_eq!(fx.shade(c, Zone::Secondary.value() as f32 / 255.0), [0.0, 0.0, 1.0]);
        assert_eq!(fx.shade(c, 0.0), c);
    }

    #[test]
    fn test_render_zones() {
        let fx = IccEffect::new(flat(4, [10, 20, 30]), flat(4, [40, 50, 60]));
        let (w, h) = (300u32, 4u32);
        let mask = build_mask(w, h, ZoneBoundaries::default()).unwrap();
        let mut image = vec![200u8; (w * h * 3) as usize];

        fx.render(&mut image, w, h, &mask).unwrap();

        let px = |x: usize, y: usize| {
            let i = (y * w as usize + x) * 3;
            [image[i], image[i + 1], image[i + 2]]
        };
        for y in 0..h as usize {
            assert_eq!(px(0, y), [40, 50, 60]);
            assert_eq!(px(119, y), [40, 50, 60]);
            assert_eq!(px(120, y), [200, 200, 200]);
            assert_eq!(px(150, y), [200, 200, 200]);
            assert_eq!(px(151, y), [10, 20, 30]);
            assert_eq!(px(299, y), [10, 20, 30]);
        }
    }

    #[test]
    fn test_identity_cube_roughly_preserves_colors() {
        let id = Arc::new(LookupCube::identity(16).unwrap());
        let fx = IccEffect::new(Arc::clone(&id), id);
        let mask = build_mask(8, 1, ZoneBoundaries::new(0, 1)).unwrap();
        let mut image: Vec<u8> = (0..8u8).flat_map(|i| [i * 30, 255 - i * 30, 128]).collect();
        let original = image.clone();

        fx.render(&mut image, 8, 1, &mask).unwrap();

        for (a, b) in image.iter().zip(&original) {
            // Texel-center addressing shifts mid values by up to half a cell
            assert!(a.abs_diff(*b) <= 9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_render_stretched_mask_filters_linearly() {
        let fx = IccEffect::new(flat(2, [255, 255, 255]), flat(2, [0, 0, 0]));
        // 4 columns (128, 0, 0, 255) stretched over 8 pixels
        let mask = build_mask(4, 1, ZoneBoundaries::new(1, 2)).unwrap();
        let mut image = vec![100u8; 8 * 3];

        fx.render(&mut image, 8, 1, &mask).unwrap();

        let got: Vec<u8> = image.chunks_exact(3).map(|px| px[0]).collect();
        // Pixel 5 sits a quarter of the way from column 2 to column 3,
        // which blends to 0.25 and selects the secondary cube.
        assert_eq!(got, [0, 0, 0, 100, 100, 0, 255, 255]);
    }

    #[test]
    fn test_render_rejects_bad_buffer() {
        let fx = IccEffect::new(flat(2, [0; 3]), flat(2, [0; 3]));
        let mask = build_mask(4, 4, ZoneBoundaries::new(1, 2)).unwrap();
        let mut image = vec![0u8; 10];
        let err = fx.render(&mut image, 4, 4, &mask).unwrap_err();
        assert!(matches!(err, LutError::DimensionMismatch { expected: 48, actual: 10 }));
    }
}
