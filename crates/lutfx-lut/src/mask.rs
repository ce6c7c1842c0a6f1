//! Indirect selection mask.

use crate::shader::{TextureDescriptor, TextureFormat};
use crate::{LutError, LutResult, Zone, ZoneBoundaries};
use tracing::debug;

/// Per-pixel zone markers, one byte per pixel, row-major.
///
/// Uploaded as a single-channel 8-bit texture and decoded by the shader
/// with [`Zone::from_normalized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndirectMask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl IndirectMask {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed mask bytes, `width * height` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the mask, returning the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Raw byte at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the mask.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "({}, {}) outside mask", x, y);
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Decoded zone at `(x, y)`.
    pub fn zone_at(&self, x: u32, y: u32) -> Zone {
        Zone::from_value(self.get(x, y))
    }

    /// Normalized value at texture coordinate `(u, v)`, filtered like the
    /// uploaded texture: bilinear between texel centers, clamp-to-edge.
    ///
    /// A mask stretched over a larger target therefore blends neighboring
    /// zone bytes, exactly as the shader sees them.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let (x0, x1, fx) = texel(u, self.width);
        let (y0, y1, fy) = texel(v, self.height);
        let at = |x, y| self.get(x, y) as f32;

        let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
        let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
        (top * (1.0 - fy) + bottom * fy) / 255.0
    }

    /// Texture description for the render stage.
    pub fn texture_descriptor(&self) -> TextureDescriptor {
        TextureDescriptor::new(self.width, self.height, 1, TextureFormat::A8)
    }
}

/// Neighboring texels and blend weight for one coordinate. Texel centers
/// sit at `(i + 0.5) / extent`.
fn texel(coord: f32, extent: u32) -> (u32, u32, f32) {
    let last = extent - 1;
    let coord = if coord.is_nan() { 0.0 } else { coord };
    let t = (coord * extent as f32 - 0.5).clamp(0.0, last as f32);
    let i = (t.floor() as u32).min(last);
    (i, (i + 1).min(last), t - i as f32)
}

/// Builds the indirect mask for a `width` x `height` target.
///
/// Column `x > zones.high` selects the primary cube, `x < zones.low` the
/// secondary cube, everything else passes through.
///
/// # Errors
///
/// - [`LutError::InvalidSize`] for a zero dimension or `low >= high`
/// - [`LutError::Allocation`] if the buffer cannot be allocated
///
/// # Example
///
/// ```rust
/// use lutfx_lut::{build_mask, Zone, ZoneBoundaries};
///
/// let mask = build_mask(300, 370, ZoneBoundaries::default()).unwrap();
/// assert_eq!(mask.zone_at(151, 0), Zone::Primary);
/// assert_eq!(mask.zone_at(119, 369), Zone::Secondary);
/// ```
pub fn build_mask(width: u32, height: u32, zones: ZoneBoundaries) -> LutResult<IndirectMask> {
    if width == 0 || height == 0 {
        return Err(LutError::InvalidSize(format!(
            "mask must be non-empty, got {}x{}",
            width, height
        )));
    }
    if zones.low >= zones.high {
        return Err(LutError::InvalidSize(format!(
            "zone low ({}) must be below high ({})",
            zones.low, zones.high
        )));
    }
    debug!(width, height, low = zones.low, high = zones.high, "building indirect mask");

    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| LutError::Allocation(format!("{}x{} mask overflows", width, height)))?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| LutError::Allocation(format!("{} bytes: {}", len, e)))?;
    data.resize(len, Zone::Passthrough.value());

    let row: Vec<u8> = (0..width).map(|x| zones.zone_for(x).value()).collect();
    for line in data.chunks_exact_mut(width as usize) {
        line.copy_from_slice(&row);
    }

    Ok(IndirectMask { data, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_geometry() {
        let mask = build_mask(300, 370, ZoneBoundaries::default()).unwrap();
        assert_eq!(mask.as_bytes().len(), 300 * 370);

        for y in [0, 1, 200, 369] {
            assert_eq!(mask.get(119, y), 128);
            assert_eq!(mask.get(120, y), 0);
            assert_eq!(mask.get(150, y), 0);
            assert_eq!(mask.get(151, y), 255);
        }

        for y in 0..370 {
            for x in 0..300 {
                let want = if x > 150 {
                    255
                } else if x < 120 {
                    128
                } else {
                    0
                };
                assert_eq!(mask.get(x, y), want, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_row_major_layout() {
        let mask = build_mask(10, 3, ZoneBoundaries::new(2, 5)).unwrap();
        let bytes = mask.as_bytes();
        assert_eq!(bytes.len(), 30);
        assert_eq!(&bytes[10..20], &[128, 128, 0, 0, 0, 0, 255, 255, 255, 255]);
        assert_eq!(mask.zone_at(9, 2), Zone::Primary);
        assert_eq!(mask.zone_at(3, 1), Zone::Passthrough);
        assert_eq!(mask.zone_at(0, 0), Zone::Secondary);
    }

    #[test]
    fn test_narrow_target_is_all_secondary() {
        let mask = build_mask(64, 4, ZoneBoundaries::default()).unwrap();
        assert!(mask.as_bytes().iter().all(|&v| v == Zone::Secondary.value()));
    }

    #[test]
    fn test_invalid_inputs() {
        let invalid = [
            (0, 10, ZoneBoundaries::default()),
            (10, 0, ZoneBoundaries::default()),
            (300, 10, ZoneBoundaries::new(150, 150)),
            (300, 10, ZoneBoundaries::new(200, 100)),
        ];
        for (w, h, zones) in invalid {
            let result = build_mask(w, h, zones);
            assert!(matches!(result, Err(LutError::InvalidSize(_))), "{}x{} {:?}", w, h, zones);
        }
    }

    #[test]
    fn test_sample_texel_centers_and_edges() {
        let mask = build_mask(4, 2, ZoneBoundaries::new(1, 2)).unwrap();
        // columns: 128, 0, 0, 255
        approx::assert_abs_diff_eq!(mask.sample(0.0, 0.0), 128.0 / 255.0);
        approx::assert_abs_diff_eq!(mask.sample(0.375, 0.5), 0.0);
        approx::assert_abs_diff_eq!(mask.sample(1.0, 1.0), 1.0);
        approx::assert_abs_diff_eq!(mask.sample(-3.0, 9.0), 128.0 / 255.0);
        approx::assert_abs_diff_eq!(mask.sample(f32::NAN, 0.5), 128.0 / 255.0);
    }

    #[test]
    fn test_sample_blends_between_centers() {
        let mask = build_mask(4, 1, ZoneBoundaries::new(1, 2)).unwrap();

        // Halfway between column 2 (0) and column 3 (255)
        approx::assert_abs_diff_eq!(mask.sample(0.75, 0.5), 0.5, epsilon = 1e-6);
        // A quarter of the way from column 2 to column 3
        approx::assert_abs_diff_eq!(mask.sample(0.6875, 0.5), 0.25, epsilon = 1e-6);
        assert_eq!(Zone::from_normalized(mask.sample(0.6875, 0.5)), Zone::Secondary);
    }

    #[test]
    fn test_single_texel_mask() {
        let mask = build_mask(1, 1, ZoneBoundaries::new(5, 10)).unwrap();
        approx::assert_abs_diff_eq!(mask.sample(0.9, 0.1), 128.0 / 255.0);
    }

    #[test]
    fn test_texture_descriptor() {
        let mask = build_mask(30, 20, ZoneBoundaries::new(5, 10)).unwrap();
        let desc = mask.texture_descriptor();
        assert_eq!((desc.width, desc.height, desc.depth), (30, 20, 1));
        assert_eq!(desc.byte_len(), mask.clone().into_bytes().len());
    }
}
