//! Offline render of the two-cube effect

use crate::ApplyArgs;
use crate::image::{read_rgb, write_rgb};
use anyhow::{Context, Result};
use lutfx_lut::{IccEffect, LutCache, MaskCache};
use tracing::{debug, info, warn};

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    let zones = super::zones(&args.zones)?;
    let mut image = read_rgb(&args.input)?;
    debug!(width = image.width, height = image.height, "loaded image");

    let luts = LutCache::new();
    let masks = MaskCache::new();

    let cubes = luts
        .get_or_build(&args.lut1, args.size, args.intent)
        .and_then(|primary| Ok((primary, luts.get_or_build(&args.lut2, args.size, args.intent)?)));

    match cubes {
        Ok((primary, secondary)) => {
            let mask = masks
                .get_or_build(image.width, image.height, zones)
                .with_context(|| format!("Failed to build {}x{} mask", image.width, image.height))?;
            let effect = IccEffect::new(primary, secondary);
            effect
                .render(&mut image.data, image.width, image.height, &mask)
                .context("Failed to render effect")?;
            info!(cubes = luts.len(), "effect applied");
        }
        Err(e) => {
            // Effect disabled; the image passes through unchanged.
            warn!("Error creating lookup texture: {}", e);
        }
    }

    write_rgb(&args.output, &image)?;

    if verbose > 0 {
        println!("{} -> {}", args.input.display(), args.output.display());
    }
    Ok(())
}
