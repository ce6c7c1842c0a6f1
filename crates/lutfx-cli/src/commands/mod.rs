//! CLI command implementations

pub mod apply;
pub mod info;
pub mod lut;
pub mod mask;
pub mod profile;

use anyhow::{Context, Result, bail};
use lutfx_lut::ZoneBoundaries;
use std::path::Path;

use crate::ZoneArgs;

/// Validates zone flags before they reach the mask builder.
pub fn zones(args: &ZoneArgs) -> Result<ZoneBoundaries> {
    if args.low >= args.high {
        bail!("--low ({}) must be less than --high ({})", args.low, args.high);
    }
    Ok(ZoneBoundaries::new(args.low, args.high))
}

/// Write raw bytes to path
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 bytes");
        assert_eq!(format_size(3 * 16 * 16 * 16), "12.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_zones_validation() {
        assert!(zones(&ZoneArgs { low: 150, high: 120 }).is_err());
        assert_eq!(zones(&ZoneArgs { low: 120, high: 150 }).unwrap(), ZoneBoundaries::default());
    }
}
