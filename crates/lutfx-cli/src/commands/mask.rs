//! Indirect mask command

use crate::MaskArgs;
use crate::image::write_gray;
use anyhow::{Context, Result};
use lutfx_lut::build_mask;
use tracing::info;

pub fn run(args: MaskArgs, verbose: u8) -> Result<()> {
    let zones = super::zones(&args.zones)?;
    let mask = build_mask(args.width, args.height, zones)
        .with_context(|| format!("Failed to build {}x{} mask", args.width, args.height))?;

    write_gray(&args.output, mask.width(), mask.height(), mask.as_bytes())?;

    info!(width = mask.width(), height = mask.height(), "mask written");
    if verbose > 0 {
        println!(
            "{}: {}x{}, secondary x < {}, primary x > {}",
            args.output.display(),
            mask.width(),
            mask.height(),
            zones.low,
            zones.high
        );
    }
    Ok(())
}
