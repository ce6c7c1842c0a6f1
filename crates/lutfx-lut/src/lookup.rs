//! ICC lookup cubes.
//!
//! A [`LookupCube`] samples the sRGB -> device transform on a regular
//! grid so the GPU can apply it with one 3D texture fetch per pixel.
//!
//! # Layout
//!
//! - `size^3` cells of three bytes (R, G, B)
//! - R varies fastest, then G, then B
//! - cell `(r, g, b)` starts at byte `3 * (r + g*size + b*size*size)`
//! - grid index `i` holds input channel value `i * 255 / (size - 1)`

use crate::shader::{TextureDescriptor, TextureFormat};
use crate::{LutError, LutResult};
use lutfx_icc::{Intent, Profile, Transform};
use std::path::Path;
use tracing::{debug, trace};

/// Cube resolution used when none is given.
pub const DEFAULT_CUBE_SIZE: usize = 16;

/// A transformed color lookup cube, ready for upload as an RGB8 3D texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCube {
    cells: Vec<[u8; 3]>,
    size: usize,
}

impl LookupCube {
    /// Creates an identity cube: every cell holds its own grid color.
    pub fn identity(size: usize) -> LutResult<Self> {
        validate_size(size)?;
        let mut cells = alloc_cells(size)?;
        fill_grid(&mut cells, size);
        Ok(Self { cells, size })
    }

    /// Wraps tightly packed RGB bytes in R-fastest order.
    pub fn from_bytes(size: usize, bytes: &[u8]) -> LutResult<Self> {
        validate_size(size)?;
        let expected = byte_len(size)?;
        if bytes.len() != expected {
            return Err(LutError::DimensionMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let cells = bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Ok(Self { cells, size })
    }

    /// Side length of the cube.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size^3`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Packed RGB bytes, `3 * size^3` long.
    pub fn as_bytes(&self) -> &[u8] {
        self.cells.as_flattened()
    }

    /// Consumes the cube, returning the packed RGB bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.cells.into_flattened()
    }

    /// Cells as RGB triplets.
    pub fn cells(&self) -> &[[u8; 3]] {
        &self.cells
    }

    /// Byte offset of grid position `(r, g, b)`.
    #[inline]
    pub fn offset(&self, r: usize, g: usize, b: usize) -> usize {
        3 * self.index(r, g, b)
    }

    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + self.size * (g + self.size * b)
    }

    /// Transformed color at grid position `(r, g, b)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is `>= size`.
    pub fn cell(&self, r: usize, g: usize, b: usize) -> [u8; 3] {
        self.cells[self.index(r, g, b)]
    }

    /// Texture description for the render stage.
    pub fn texture_descriptor(&self) -> TextureDescriptor {
        let n = self.size as u32;
        TextureDescriptor::new(n, n, n, TextureFormat::Rgb8)
    }

    /// Cells as normalized floats, same order.
    pub fn to_f32(&self) -> Vec<[f32; 3]> {
        self.cells.iter().map(|c| c.map(|v| v as f32 / 255.0)).collect()
    }

    /// Samples the cube like a linearly filtered, clamp-to-edge 3D texture.
    ///
    /// `rgb` is the normalized texture coordinate. Texel centers sit at
    /// `(i + 0.5) / size`, as on the GPU. Coordinates within half a texel
    /// of either edge clamp to the end node, so `[0, 0.5/size]` reads node 0
    /// and `[1 - 0.5/size, 1]` reads node `size - 1` unblended.
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        let (ri, rf) = self.texel(rgb[0]);
        let (gi, gf) = self.texel(rgb[1]);
        let (bi, bf) = self.texel(rgb[2]);

        let c = |r: usize, g: usize, b: usize| self.cell(r, g, b).map(|v| v as f32 / 255.0);
        let c000 = c(ri, gi, bi);
        let c100 = c(ri + 1, gi, bi);
        let c010 = c(ri, gi + 1, bi);
        let c110 = c(ri + 1, gi + 1, bi);
        let c001 = c(ri, gi, bi + 1);
        let c101 = c(ri + 1, gi, bi + 1);
        let c011 = c(ri, gi + 1, bi + 1);
        let c111 = c(ri + 1, gi + 1, bi + 1);

        let mut result = [0.0f32; 3];
        for i in 0..3 {
            let c00 = c000[i] * (1.0 - rf) + c100[i] * rf;
            let c01 = c001[i] * (1.0 - rf) + c101[i] * rf;
            let c10 = c010[i] * (1.0 - rf) + c110[i] * rf;
            let c11 = c011[i] * (1.0 - rf) + c111[i] * rf;

            let c0 = c00 * (1.0 - gf) + c10 * gf;
            let c1 = c01 * (1.0 - gf) + c11 * gf;

            result[i] = c0 * (1.0 - bf) + c1 * bf;
        }
        result
    }

    /// Lower texel index and blend weight for one coordinate.
    fn texel(&self, coord: f32) -> (usize, f32) {
        let last = (self.size - 1) as f32;
        let coord = if coord.is_nan() { 0.0 } else { coord };
        let u = (coord * self.size as f32 - 0.5).clamp(0.0, last);
        let i = (u.floor() as usize).min(self.size - 2);
        (i, u - i as f32)
    }
}

/// Builds lookup cubes with a fixed resolution and intent.
///
/// # Example
///
/// ```rust,no_run
/// use lutfx_lut::LutBuilder;
/// use lutfx_icc::Intent;
/// use std::path::Path;
///
/// let cube = LutBuilder::new()
///     .with_size(32)
///     .with_intent(Intent::RelativeColorimetric)
///     .build(Path::new("display.icc"))
///     .unwrap();
/// assert_eq!(cube.as_bytes().len(), 3 * 32 * 32 * 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LutBuilder {
    size: usize,
    intent: Intent,
}

impl Default for LutBuilder {
    fn default() -> Self {
        Self {
            size: DEFAULT_CUBE_SIZE,
            intent: Intent::Perceptual,
        }
    }
}

impl LutBuilder {
    /// 16^3 cube, perceptual intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cube side length.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the rendering intent.
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    /// Cube side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rendering intent.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Builds a cube for the device profile at `path`.
    pub fn build(&self, path: &Path) -> LutResult<LookupCube> {
        build_lut(path, self.size, self.intent)
    }

    /// Builds a cube for an already loaded device profile.
    pub fn build_from_profile(&self, device: &Profile) -> LutResult<LookupCube> {
        build_lut_from_profile(device, self.size, self.intent)
    }
}

/// Builds an sRGB -> device lookup cube from an ICC profile file.
///
/// Profiles and the transform are released before returning, on success
/// and on failure. No cube is returned unless every cell was transformed.
///
/// # Errors
///
/// - [`LutError::InvalidSize`] if `cube_size < 2`
/// - [`LutError::Profile`] if the file is missing, unreadable or corrupt
/// - [`LutError::Transform`] if the engine refuses the transform
/// - [`LutError::Allocation`] if the cube buffer cannot be allocated
pub fn build_lut(profile_path: &Path, cube_size: usize, intent: Intent) -> LutResult<LookupCube> {
    validate_size(cube_size)?;
    debug!(path = %profile_path.display(), cube_size, %intent, "building lookup cube");
    let device = Profile::from_file(profile_path)?;
    build_lut_from_profile(&device, cube_size, intent)
}

/// [`build_lut`] with a 16^3 cube and perceptual intent.
pub fn build_lut_default(profile_path: &Path) -> LutResult<LookupCube> {
    build_lut(profile_path, DEFAULT_CUBE_SIZE, Intent::Perceptual)
}

/// Builds an sRGB -> device lookup cube for a loaded profile.
pub fn build_lut_from_profile(
    device: &Profile,
    cube_size: usize,
    intent: Intent,
) -> LutResult<LookupCube> {
    validate_size(cube_size)?;
    let srgb = Profile::srgb();
    let transform = Transform::new(&srgb, device, intent)?;

    let mut cells = alloc_cells(cube_size)?;
    fill_grid(&mut cells, cube_size);
    transform.apply(&mut cells);
    trace!(cells = cells.len(), "lookup cube transformed");

    Ok(LookupCube { cells, size: cube_size })
}

/// Input channel value at grid index `i`: `i * 255 / (size - 1)`, truncated.
#[inline]
pub fn quantize(i: usize, size: usize) -> u8 {
    (i * 255 / (size - 1)) as u8
}

fn validate_size(size: usize) -> LutResult<()> {
    if size < 2 {
        return Err(LutError::InvalidSize(format!("cube size must be at least 2, got {}", size)));
    }
    Ok(())
}

fn byte_len(size: usize) -> LutResult<usize> {
    size.checked_pow(3)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| LutError::Allocation(format!("cube size {} overflows", size)))
}

/// Zero-initialized `size^3` cells, reserved fallibly.
fn alloc_cells(size: usize) -> LutResult<Vec<[u8; 3]>> {
    let count = byte_len(size)? / 3;
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(count)
        .map_err(|e| LutError::Allocation(format!("{} cells: {}", count, e)))?;
    cells.resize(count, [0u8; 3]);
    Ok(cells)
}

/// Writes each node's input color, B outer, G middle, R inner.
fn fill_grid(cells: &mut [[u8; 3]], size: usize) {
    let mut it = cells.iter_mut();
    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                if let Some(cell) = it.next() {
                    *cell = [quantize(r, size), quantize(g, size), quantize(b, size)];
                }
            }
        }
    }
}
