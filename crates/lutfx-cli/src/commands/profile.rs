//! Built-in profile export command

use crate::ProfileArgs;
use anyhow::{Context, Result};
use lutfx_icc::Profile;
use tracing::info;

pub fn run(args: ProfileArgs, verbose: u8) -> Result<()> {
    let profile = Profile::from_standard(args.name)
        .with_context(|| format!("Failed to create {} profile", args.name))?;
    profile
        .save(&args.output)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    info!(profile = %args.name, "profile written");
    if verbose > 0 {
        println!("{}: {}", args.output.display(), args.name);
    }
    Ok(())
}
