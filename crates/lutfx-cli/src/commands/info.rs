//! Profile info command

use crate::InfoArgs;
use anyhow::{Context, Result};
use lutfx_icc::Profile;
use tracing::debug;

pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        debug!(path = %path.display(), "reading profile");
        let profile = Profile::from_file(path)
            .with_context(|| format!("Failed to load: {}", path.display()))?;

        println!("{}", path.display());
        println!("  Description:  {}", profile.description());
        println!("  Manufacturer: {}", profile.manufacturer());
        println!("  Model:        {}", profile.model());
        println!("  Color space:  {}", profile.color_space());
        if verbose > 0 {
            println!("  Copyright:    {}", profile.copyright());
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            println!("  File size:    {}", super::format_size(size));
        }
        if !profile.is_rgb() {
            println!("  (not an RGB profile; lookup cubes cannot target it)");
        }
    }
    Ok(())
}
