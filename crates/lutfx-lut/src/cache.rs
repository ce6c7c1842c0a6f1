//! Thread-safe caches for built cubes and masks.
//!
//! Building a cube opens the profile and runs the engine; a render loop
//! should do that once per input, not once per frame.
//!
//! ```rust,no_run
//! use lutfx_lut::{LutCache, MaskCache, ZoneBoundaries};
//! use lutfx_icc::Intent;
//! use std::path::Path;
//!
//! let luts = LutCache::new();
//! let masks = MaskCache::new();
//!
//! // Every paint pass:
//! let cube = luts.get_or_build(Path::new("display.icc"), 16, Intent::Perceptual)?;
//! let mask = masks.get_or_build(300, 370, ZoneBoundaries::default())?;
//! # Ok::<(), lutfx_lut::LutError>(())
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use lutfx_icc::Intent;
use tracing::trace;

use crate::{IndirectMask, LookupCube, LutResult, ZoneBoundaries, build_lut, build_mask};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CubeKey {
    path: PathBuf,
    size: usize,
    intent: Intent,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
struct MaskKey {
    width: u32,
    height: u32,
    zones: ZoneBoundaries,
}

/// Lookup cubes keyed by (profile path, cube size, intent).
///
/// Failed builds are not cached, so a profile fixed on disk is picked up
/// on the next call.
#[derive(Debug, Default)]
pub struct LutCache {
    cache: RwLock<HashMap<CubeKey, Arc<LookupCube>>>,
}

impl LutCache {
    /// Create empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached cube or builds and caches it.
    pub fn get_or_build(
        &self,
        path: &Path,
        size: usize,
        intent: Intent,
    ) -> LutResult<Arc<LookupCube>> {
        let key = CubeKey {
            path: path.to_path_buf(),
            size,
            intent,
        };

        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cube) = cache.get(&key) {
                trace!(path = %path.display(), size, "lookup cube cache hit");
                return Ok(Arc::clone(cube));
            }
        }

        let cube = Arc::new(build_lut(path, size, intent)?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(key).or_insert(cube)))
    }

    /// Drops every cube built from `path`. Returns how many were removed.
    pub fn invalidate(&self, path: &Path) -> usize {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let before = cache.len();
        cache.retain(|k, _| k.path != path);
        before - cache.len()
    }

    /// Clear all cached cubes.
    pub fn clear(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Number of cached cubes.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Indirect masks keyed by (width, height, zone boundaries).
#[derive(Debug, Default)]
pub struct MaskCache {
    cache: RwLock<HashMap<MaskKey, Arc<IndirectMask>>>,
}

impl MaskCache {
    /// Create empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached mask or builds and caches it.
    pub fn get_or_build(
        &self,
        width: u32,
        height: u32,
        zones: ZoneBoundaries,
    ) -> LutResult<Arc<IndirectMask>> {
        let key = MaskKey { width, height, zones };

        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(mask) = cache.get(&key) {
                return Ok(Arc::clone(mask));
            }
        }

        let mask = Arc::new(build_mask(width, height, zones)?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(key).or_insert(mask)))
    }

    /// Clear all cached masks.
    pub fn clear(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Number of cached masks.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
