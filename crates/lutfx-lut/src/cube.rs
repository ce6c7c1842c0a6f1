//! Adobe/Resolve `.cube` export.
//!
//! Lets a built [`LookupCube`] be inspected in grading tools. The format
//! stores one `R G B` float row per cell with R varying fastest, which is
//! exactly the cube's memory order.
//!
//! ```text
//! TITLE "display.icc"
//! LUT_3D_SIZE 16
//!
//! 0.000000 0.000000 0.000000
//! 0.066667 0.000000 0.000000
//! ...
//! ```

use crate::{LookupCube, LutResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a cube in `.cube` text format to `writer`.
pub fn write_cube_to<W: Write>(
    mut writer: W,
    cube: &LookupCube,
    title: Option<&str>,
) -> LutResult<()> {
    writeln!(writer, "# Generated by lutfx")?;
    if let Some(title) = title {
        writeln!(writer, "TITLE \"{}\"", title.replace('"', "'"))?;
    }
    writeln!(writer, "LUT_3D_SIZE {}", cube.size())?;
    writeln!(writer)?;

    for rgb in cube.to_f32() {
        writeln!(writer, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a cube to a `.cube` file.
pub fn write_cube<P: AsRef<Path>>(
    path: P,
    cube: &LookupCube,
    title: Option<&str>,
) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    write_cube_to(BufWriter::new(file), cube, title)
}
