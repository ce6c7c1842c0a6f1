//! Lookup cube command

use crate::{CubeFormat, LutArgs};
use anyhow::{Context, Result};
use lutfx_lut::{LutBuilder, write_cube};
use tracing::{debug, info};

pub fn run(args: LutArgs, verbose: u8) -> Result<()> {
    let builder = LutBuilder::new().with_size(args.size).with_intent(args.intent);
    debug!(?builder, "building cube");

    let cube = builder
        .build(&args.input)
        .with_context(|| format!("Failed to build lookup cube from {}", args.input.display()))?;

    match args.format {
        CubeFormat::Raw => super::write_bytes(&args.output, cube.as_bytes())?,
        CubeFormat::Cube => {
            let title = args.input.file_name().map(|n| n.to_string_lossy());
            write_cube(&args.output, &cube, title.as_deref())
                .with_context(|| format!("Failed to write: {}", args.output.display()))?;
        }
    }

    let desc = cube.texture_descriptor();
    info!(size = cube.size(), bytes = desc.byte_len(), "lookup cube written");
    if verbose > 0 {
        println!(
            "{}: {}x{}x{} {:?}, {}",
            args.output.display(),
            desc.width,
            desc.height,
            desc.depth,
            desc.format,
            super::format_size(desc.byte_len() as u64)
        );
    }
    Ok(())
}
