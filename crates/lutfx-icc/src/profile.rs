//! ICC profile wrapper.

use crate::{IccError, IccResult, StandardProfile};
use lcms2::{ColorSpaceSignature, Profile as LcmsProfile};
use std::path::Path;
use tracing::trace;

/// An ICC color profile.
///
/// Profiles are immutable once created. The underlying engine handle is
/// released when the value is dropped.
///
/// # Example
///
/// ```rust,no_run
/// use lutfx_icc::Profile;
/// use std::path::Path;
///
/// let profile = Profile::from_file(Path::new("monitor.icc")).unwrap();
/// println!("Description: {}", profile.description());
/// ```
pub struct Profile {
    /// Internal lcms2 profile handle.
    pub(crate) inner: LcmsProfile,
}

impl Profile {
    /// Loads a profile from an ICC file.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::LoadFailed`] if the file cannot be read or does
    /// not contain a valid ICC profile.
    pub fn from_file(path: &Path) -> IccResult<Self> {
        trace!(path = %path.display(), "opening ICC profile");
        let inner = LcmsProfile::new_file(path)
            .map_err(|e| IccError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self { inner })
    }

    /// Creates a profile from raw ICC data.
    pub fn from_icc(data: &[u8]) -> IccResult<Self> {
        let inner = LcmsProfile::new_icc(data)
            .map_err(|e| IccError::InvalidProfile(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates the built-in sRGB profile (IEC 61966-2-1).
    pub fn srgb() -> Self {
        Self {
            inner: LcmsProfile::new_srgb(),
        }
    }

    /// Creates a profile from a standard specification.
    pub fn from_standard(standard: StandardProfile) -> IccResult<Self> {
        standard.to_profile()
    }

    /// Returns the profile description.
    pub fn description(&self) -> String {
        self.inner
            .info(lcms2::InfoType::Description, lcms2::Locale::none())
            .unwrap_or_default()
    }

    /// Returns the profile manufacturer.
    pub fn manufacturer(&self) -> String {
        self.inner
            .info(lcms2::InfoType::Manufacturer, lcms2::Locale::none())
            .unwrap_or_default()
    }

    /// Returns the profile model.
    pub fn model(&self) -> String {
        self.inner
            .info(lcms2::InfoType::Model, lcms2::Locale::none())
            .unwrap_or_default()
    }

    /// Returns the profile copyright.
    pub fn copyright(&self) -> String {
        self.inner
            .info(lcms2::InfoType::Copyright, lcms2::Locale::none())
            .unwrap_or_default()
    }

    /// Returns the color space signature.
    pub fn color_space(&self) -> String {
        format!("{:?}", self.inner.color_space())
    }

    /// Returns true if this is an RGB profile.
    pub fn is_rgb(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::RgbData)
    }

    /// Exports the profile as ICC data.
    pub fn to_icc(&self) -> IccResult<Vec<u8>> {
        self.inner
            .icc()
            .map_err(|e| IccError::CreateFailed(e.to_string()))
    }

    /// Writes the profile to an ICC file.
    pub fn save(&self, path: &Path) -> IccResult<()> {
        let data = self.to_icc()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .field("color_space", &self.color_space())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb() {
        let profile = Profile::srgb();
        assert!(profile.is_rgb());
        assert!(!profile.description().is_empty());
    }

    #[test]
    fn test_to_icc() {
        let profile = Profile::srgb();
        let data = profile.to_icc().unwrap();
        assert!(!data.is_empty());

        let reloaded = Profile::from_icc(&data).unwrap();
        assert!(reloaded.is_rgb());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srgb.icc");
        Profile::srgb().save(&path).unwrap();

        let loaded = Profile::from_file(&path).unwrap();
        assert!(loaded.is_rgb());
    }

    #[test]
    fn test_missing_file() {
        let err = Profile::from_file(Path::new("/nonexistent/display.icc")).unwrap_err();
        assert!(matches!(err, IccError::LoadFailed(_)));
        assert!(err.to_string().contains("display.icc"));
    }

    #[test]
    fn test_garbage_data() {
        let err = Profile::from_icc(b"definitely not an icc profile").unwrap_err();
        assert!(matches!(err, IccError::InvalidProfile(_)));
    }
}
