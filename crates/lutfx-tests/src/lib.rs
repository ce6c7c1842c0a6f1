//! Integration tests for lutfx crates.
//!
//! Profile fixtures are generated from built-in profiles into a temp
//! directory, so the tests run without any ICC files installed.

use lutfx_icc::{Profile, StandardProfile};
use std::path::PathBuf;
use tempfile::TempDir;

/// Temp directory holding ICC files written from built-in profiles.
pub struct ProfileDir {
    dir: TempDir,
}

impl ProfileDir {
    /// Creates an empty fixture directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self { dir: tempfile::tempdir()? })
    }

    /// Writes `std` as `<name>.icc` and returns its path.
    pub fn write(&self, std: StandardProfile) -> lutfx_icc::IccResult<PathBuf> {
        let path = self.dir.path().join(format!("{}.icc", std.name()));
        Profile::from_standard(std)?.save(&path)?;
        Ok(path)
    }

    /// Writes raw ICC bytes as `name` and returns its path.
    pub fn write_icc(&self, name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, data)?;
        Ok(path)
    }

    /// Path of a file that does not exist inside the fixture directory.
    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
