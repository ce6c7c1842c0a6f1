//! Color transforms between ICC profiles.

use crate::{IccError, IccResult, Intent, Profile};
use lcms2::{PixelFormat, Transform as LcmsTransform};
use tracing::debug;

/// An 8-bit RGB color transform between two ICC profiles.
///
/// Built with no extra engine flags. The engine handle is released on
/// drop; the source and destination profiles may be dropped as soon as
/// the transform exists.
///
/// # Example
///
/// ```rust
/// use lutfx_icc::{Profile, StandardProfile, Transform, Intent};
///
/// let srgb = Profile::srgb();
/// let p3 = Profile::from_standard(StandardProfile::DisplayP3).unwrap();
///
/// let transform = Transform::new(&srgb, &p3, Intent::Perceptual).unwrap();
///
/// let mut pixels = [[200u8, 100, 50]];
/// transform.apply(&mut pixels);
/// ```
pub struct Transform {
    inner: LcmsTransform<[u8; 3], [u8; 3]>,
    intent: Intent,
}

impl Transform {
    /// Creates a new RGB_8 -> RGB_8 transform between two profiles.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::TransformFailed`] when the engine refuses the
    /// combination, e.g. a non-RGB destination or an unsupported intent.
    pub fn new(source: &Profile, dest: &Profile, intent: Intent) -> IccResult<Self> {
        debug!(
            source = %source.description(),
            dest = %dest.description(),
            %intent,
            "creating RGB_8 transform"
        );
        let inner = LcmsTransform::new(
            &source.inner,
            PixelFormat::RGB_8,
            &dest.inner,
            PixelFormat::RGB_8,
            intent.into(),
        )
        .map_err(|e| IccError::TransformFailed(e.to_string()))?;

        Ok(Self { inner, intent })
    }

    /// Rendering intent the transform was built with.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Transforms every pixel in place in a single engine call.
    pub fn apply(&self, pixels: &mut [[u8; 3]]) {
        self.inner.transform_in_place(pixels);
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("intent", &self.intent)
            .finish_non_exhaustive()
    }
}
