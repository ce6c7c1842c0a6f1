//! Standard ICC profile definitions.

use crate::{IccError, IccResult, Profile};
use lcms2::{CIExyY, CIExyYTRIPLE, Profile as LcmsProfile, ToneCurve};
use std::fmt;
use std::str::FromStr;

/// Built-in RGB profile specifications.
///
/// The `Swap*` variants are sRGB with permuted primaries: converting
/// sRGB into them reorders the channels, which makes the effect of a
/// lookup cube obvious on screen and easy to assert in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardProfile {
    /// IEC 61966-2-1 sRGB.
    Srgb,
    /// Linear sRGB (gamma 1.0).
    LinearSrgb,
    /// Adobe RGB (1998).
    AdobeRgb,
    /// Display P3 (Apple).
    DisplayP3,
    /// ITU-R BT.2020.
    Rec2020,
    /// sRGB whose device channels carry (blue, red, green).
    SwapBrg,
    /// sRGB whose device channels carry (red, blue, green).
    SwapRbg,
}

impl StandardProfile {
    /// All built-in profiles.
    pub const ALL: [StandardProfile; 7] = [
        StandardProfile::Srgb,
        StandardProfile::LinearSrgb,
        StandardProfile::AdobeRgb,
        StandardProfile::DisplayP3,
        StandardProfile::Rec2020,
        StandardProfile::SwapBrg,
        StandardProfile::SwapRbg,
    ];

    /// Short lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            StandardProfile::Srgb => "srgb",
            StandardProfile::LinearSrgb => "linear-srgb",
            StandardProfile::AdobeRgb => "adobe-rgb",
            StandardProfile::DisplayP3 => "display-p3",
            StandardProfile::Rec2020 => "rec2020",
            StandardProfile::SwapBrg => "swap-brg",
            StandardProfile::SwapRbg => "swap-rbg",
        }
    }

    /// Creates an ICC profile from this standard.
    pub fn to_profile(self) -> IccResult<Profile> {
        let inner = match self {
            StandardProfile::Srgb => LcmsProfile::new_srgb(),
            StandardProfile::LinearSrgb => {
                rgb(&d65_white(), &srgb_primaries(), &ToneCurve::new(1.0))?
            }
            StandardProfile::AdobeRgb => {
                let primaries = CIExyYTRIPLE {
                    Red: CIExyY { x: 0.6400, y: 0.3300, Y: 1.0 },
                    Green: CIExyY { x: 0.2100, y: 0.7100, Y: 1.0 },
                    Blue: CIExyY { x: 0.1500, y: 0.0600, Y: 1.0 },
                };
                rgb(&d65_white(), &primaries, &ToneCurve::new(2.2))?
            }
            StandardProfile::DisplayP3 => {
                let primaries = CIExyYTRIPLE {
                    Red: CIExyY { x: 0.680, y: 0.320, Y: 1.0 },
                    Green: CIExyY { x: 0.265, y: 0.690, Y: 1.0 },
                    Blue: CIExyY { x: 0.150, y: 0.060, Y: 1.0 },
                };
                rgb(&d65_white(), &primaries, &srgb_curve()?)?
            }
            StandardProfile::Rec2020 => {
                let primaries = CIExyYTRIPLE {
                    Red: CIExyY { x: 0.708, y: 0.292, Y: 1.0 },
                    Green: CIExyY { x: 0.170, y: 0.797, Y: 1.0 },
                    Blue: CIExyY { x: 0.131, y: 0.046, Y: 1.0 },
                };
                // BT.2020 transfer (simplified)
                rgb(&d65_white(), &primaries, &ToneCurve::new(2.4))?
            }
            StandardProfile::SwapBrg => {
                let p = srgb_primaries();
                let primaries = CIExyYTRIPLE { Red: p.Blue, Green: p.Red, Blue: p.Green };
                rgb(&d65_white(), &primaries, &srgb_curve()?)?
            }
            StandardProfile::SwapRbg => {
                let p = srgb_primaries();
                let primaries = CIExyYTRIPLE { Red: p.Red, Green: p.Blue, Blue: p.Green };
                rgb(&d65_white(), &primaries, &srgb_curve()?)?
            }
        };
        Ok(Profile { inner })
    }
}

impl fmt::Display for StandardProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardProfile {
    type Err = IccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        StandardProfile::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| IccError::UnknownName {
                kind: "standard profile",
                name: s.to_string(),
            })
    }
}

fn rgb(white: &CIExyY, primaries: &CIExyYTRIPLE, curve: &ToneCurve) -> IccResult<LcmsProfile> {
    let curves = [curve, curve, curve];
    LcmsProfile::new_rgb(white, primaries, &curves)
        .map_err(|e| IccError::CreateFailed(e.to_string()))
}

/// IEC 61966-2-1 piecewise transfer curve (ICC parametric type 4).
fn srgb_curve() -> IccResult<ToneCurve> {
    let params = [2.4, 1.0 / 1.055, 0.055 / 1.055, 1.0 / 12.92, 0.04045];
    ToneCurve::new_parametric(4, &params).map_err(|e| IccError::CreateFailed(e.to_string()))
}

/// D65 white point.
fn d65_white() -> CIExyY {
    CIExyY { x: 0.3127, y: 0.3290, Y: 1.0 }
}

/// sRGB / Rec.709 primaries.
fn srgb_primaries() -> CIExyYTRIPLE {
    CIExyYTRIPLE {
        Red: CIExyY { x: 0.6400, y: 0.3300, Y: 1.0 },
        Green: CIExyY { x: 0.3000, y: 0.6000, Y: 1.0 },
        Blue: CIExyY { x: 0.1500, y: 0.0600, Y: 1.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Intent, Transform};

    #[test]
    fn test_all_standards() {
        for std in StandardProfile::ALL {
            let profile = std.to_profile().unwrap();
            assert!(profile.is_rgb(), "{:?} should be RGB", std);
        }
    }

    #[test]
    fn test_names_parse_back() {
        for std in StandardProfile::ALL {
            assert_eq!(std.name().parse::<StandardProfile>().unwrap(), std);
        }
        assert!("cmyk".parse::<StandardProfile>().is_err());
    }

    #[test]
    fn test_swap_brg_permutes_channels() {
        let dest = StandardProfile::SwapBrg.to_profile().unwrap();
        let transform =
            Transform::new(&Profile::srgb(), &dest, Intent::RelativeColorimetric).unwrap();

        let mut pixels = [[255u8, 0, 0], [0, 255, 0], [0, 0, 255]];
        transform.apply(&mut pixels);

        let expected = [[0u8, 255, 0], [0, 0, 255], [255, 0, 0]];
        for (got, want) in pixels.iter().zip(expected.iter()) {
            for c in 0..3 {
                assert!(got[c].abs_diff(want[c]) <= 2, "got {:?}, want {:?}", got, want);
            }
        }
    }

    #[test]
    fn test_swap_rbg_keeps_red() {
        let dest = StandardProfile::SwapRbg.to_profile().unwrap();
        let transform =
            Transform::new(&Profile::srgb(), &dest, Intent::RelativeColorimetric).unwrap();

        let mut pixels = [[255u8, 0, 0], [0, 255, 0]];
        transform.apply(&mut pixels);

        assert!(pixels[0][0] >= 253 && pixels[0][1] <= 2 && pixels[0][2] <= 2);
        assert!(pixels[1][0] <= 2 && pixels[1][1] <= 2 && pixels[1][2] >= 253);
    }
}
