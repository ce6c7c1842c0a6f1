//! # lutfx-lut
//!
//! Lookup cubes and indirect masks for GPU ICC color correction.
//!
//! The render stage samples two [`LookupCube`]s as 3D textures and picks
//! one per pixel from an [`IndirectMask`]. This crate produces both
//! buffers, describes how to upload them, and carries a CPU reference of
//! the shader.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lutfx_lut::{build_lut, build_mask, ZoneBoundaries};
//! use lutfx_icc::Intent;
//! use std::path::Path;
//!
//! let cube = build_lut(Path::new("display.icc"), 16, Intent::Perceptual)?;
//! assert_eq!(cube.as_bytes().len(), 3 * 16 * 16 * 16);
//!
//! let mask = build_mask(300, 370, ZoneBoundaries::default())?;
//! assert_eq!(mask.as_bytes().len(), 300 * 370);
//! # Ok::<(), lutfx_lut::LutError>(())
//! ```
//!
//! # Modules
//!
//! - [`cube`] - `.cube` text export
//! - [`shader`] - GLSL source, uniform bindings and texture descriptors
//!
//! # Dependencies
//!
//! - [`lutfx-icc`] - profiles and transforms
//! - [`rayon`] - parallel CPU reference rendering
//! - [`thiserror`] - Error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod effect;
mod error;
mod lookup;
mod mask;
mod zone;
pub mod cube;
pub mod shader;

pub use cache::{LutCache, MaskCache};
pub use effect::IccEffect;
pub use error::{LutError, LutResult};
pub use lookup::{
    DEFAULT_CUBE_SIZE, LookupCube, LutBuilder, build_lut, build_lut_default,
    build_lut_from_profile, quantize,
};
pub use mask::{IndirectMask, build_mask};
pub use zone::{PRIMARY_THRESHOLD, SECONDARY_THRESHOLD, Zone, ZoneBoundaries};
pub use cube::{write_cube, write_cube_to};
