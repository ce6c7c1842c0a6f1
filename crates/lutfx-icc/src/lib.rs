//! # lutfx-icc
//!
//! ICC color profile support for building GPU color lookup cubes.
//!
//! This crate wraps the Little CMS 2 engine with the small surface lutfx
//! needs: loading device profiles, creating built-in RGB profiles, and
//! running 8-bit RGB transforms in bulk.
//!
//! # Example
//!
//! ```rust,no_run
//! use lutfx_icc::{Profile, Transform, Intent};
//! use std::path::Path;
//!
//! let display = Profile::from_file(Path::new("display.icc")).unwrap();
//! let transform = Transform::new(&Profile::srgb(), &display, Intent::Perceptual).unwrap();
//!
//! let mut pixels = vec![[128u8, 64, 32]; 16];
//! transform.apply(&mut pixels);
//! ```
//!
//! # Engine diagnostics
//!
//! Little CMS reports parse and pipeline problems through a process-wide
//! error handler. Call [`configure_color_engine`] once at startup to route
//! those messages to `tracing` or to a custom sink.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod engine;
mod error;
mod profile;
mod standard;
mod transform;

pub use engine::{EngineConfig, LogSink, configure_color_engine, is_engine_configured};
pub use error::{IccError, IccResult};
pub use profile::Profile;
pub use standard::StandardProfile;
pub use transform::Transform;

use std::fmt;
use std::str::FromStr;

/// Rendering intent for color transformations.
///
/// Determines how out-of-gamut colors are handled during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Intent {
    /// Compresses the source gamut to fit the destination.
    ///
    /// Best for photographic images. Matrix-shaper profiles fall back to
    /// relative colorimetric.
    #[default]
    Perceptual,

    /// Clips out-of-gamut colors, maps source white to destination white.
    RelativeColorimetric,

    /// Maintains saturation at the expense of accuracy.
    Saturation,

    /// Clips out-of-gamut colors without white point adaptation.
    AbsoluteColorimetric,
}

impl Intent {
    /// All intents, in ICC numbering order.
    pub const ALL: [Intent; 4] = [
        Intent::Perceptual,
        Intent::RelativeColorimetric,
        Intent::Saturation,
        Intent::AbsoluteColorimetric,
    ];

    /// Short lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Intent::Perceptual => "perceptual",
            Intent::RelativeColorimetric => "relative",
            Intent::Saturation => "saturation",
            Intent::AbsoluteColorimetric => "absolute",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intent {
    type Err = IccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "perceptual" | "p" => Ok(Intent::Perceptual),
            "relative" | "relative-colorimetric" | "r" => Ok(Intent::RelativeColorimetric),
            "saturation" | "s" => Ok(Intent::Saturation),
            "absolute" | "absolute-colorimetric" | "a" => Ok(Intent::AbsoluteColorimetric),
            _ => Err(IccError::UnknownName {
                kind: "rendering intent",
                name: s.to_string(),
            }),
        }
    }
}

impl From<Intent> for lcms2::Intent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Perceptual => lcms2::Intent::Perceptual,
            Intent::RelativeColorimetric => lcms2::Intent::RelativeColorimetric,
            Intent::Saturation => lcms2::Intent::Saturation,
            Intent::AbsoluteColorimetric => lcms2::Intent::AbsoluteColorimetric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names_parse_back() {
        for intent in Intent::ALL {
            assert_eq!(intent.name().parse::<Intent>().unwrap(), intent);
        }
    }

    #[test]
    fn test_intent_rejects_unknown() {
        let err = "vivid".parse::<Intent>().unwrap_err();
        assert!(err.to_string().contains("vivid"));
    }

    #[test]
    fn test_default_is_perceptual() {
        assert_eq!(Intent::default(), Intent::Perceptual);
    }
}
