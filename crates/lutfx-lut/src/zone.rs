//! Indirect mask zones and the thresholds that decode them.
//!
//! The mask builder writes [`Zone::value`] bytes and the shader decodes
//! the normalized byte with [`Zone::from_normalized`]. Both sides go
//! through this enum so the byte constants and thresholds cannot drift.

/// Normalized mask value above which the primary cube is used.
pub const PRIMARY_THRESHOLD: f32 = 0.6;

/// Normalized mask value above which the secondary cube is used.
pub const SECONDARY_THRESHOLD: f32 = 0.1;

/// Which lookup cube colors a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    /// Original color passes through unmodified.
    #[default]
    Passthrough,
    /// Colored by the primary cube (`color_data1`).
    Primary,
    /// Colored by the secondary cube (`color_data2`).
    Secondary,
}

impl Zone {
    /// Mask byte encoding this zone.
    pub const fn value(self) -> u8 {
        match self {
            Zone::Passthrough => 0,
            Zone::Primary => 255,
            Zone::Secondary => 128,
        }
    }

    /// Decodes a normalized mask sample the way the fragment shader does.
    pub fn from_normalized(idx: f32) -> Self {
        if idx > PRIMARY_THRESHOLD {
            Zone::Primary
        } else if idx > SECONDARY_THRESHOLD {
            Zone::Secondary
        } else {
            Zone::Passthrough
        }
    }

    /// Decodes a raw mask byte.
    pub fn from_value(value: u8) -> Self {
        Self::from_normalized(value as f32 / 255.0)
    }
}

/// Horizontal zone split for the indirect mask.
///
/// Columns `x > high` are [`Zone::Primary`], columns `x < low` are
/// [`Zone::Secondary`], the band `low..=high` passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneBoundaries {
    /// Last column (exclusive) of the secondary zone.
    pub low: u32,
    /// Last column (inclusive) of the passthrough band.
    pub high: u32,
}

impl ZoneBoundaries {
    /// Creates boundaries; validity is checked by the mask builder.
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Zone for column `x`.
    #[inline]
    pub fn zone_for(&self, x: u32) -> Zone {
        if x > self.high {
            Zone::Primary
        } else if x < self.low {
            Zone::Secondary
        } else {
            Zone::Passthrough
        }
    }
}

impl Default for ZoneBoundaries {
    fn default() -> Self {
        Self { low: 120, high: 150 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_decode_to_their_zone() {
        for zone in [Zone::Passthrough, Zone::Primary, Zone::Secondary] {
            assert_eq!(Zone::from_value(zone.value()), zone);
        }
    }

    #[test]
    fn test_secondary_sits_between_thresholds() {
        let n = Zone::Secondary.value() as f32 / 255.0;
        assert!(n > SECONDARY_THRESHOLD);
        assert!(n <= PRIMARY_THRESHOLD);
    }

    #[test]
    fn test_threshold_edges() {
        assert_eq!(Zone::from_normalized(PRIMARY_THRESHOLD), Zone::Secondary);
        assert_eq!(Zone::from_normalized(SECONDARY_THRESHOLD), Zone::Passthrough);
        assert_eq!(Zone::from_normalized(1.0), Zone::Primary);
        assert_eq!(Zone::from_normalized(0.0), Zone::Passthrough);
    }

    #[test]
    fn test_default_boundaries() {
        let z = ZoneBoundaries::default();
        assert_eq!(z.zone_for(119), Zone::Secondary);
        assert_eq!(z.zone_for(120), Zone::Passthrough);
        assert_eq!(z.zone_for(150), Zone::Passthrough);
        assert_eq!(z.zone_for(151), Zone::Primary);
    }
}
