//! A failed build must not leave heap memory behind.
//!
//! Lives in its own test binary because it installs a counting global
//! allocator and needs to be the only test running.
//!
//! Only the Rust heap is counted: error strings, paths and the cube
//! buffer. Little CMS allocates its profile, IO and transform handles with
//! C `malloc`, which this allocator never sees; those are released by the
//! `Drop` impls of the `lcms2` wrappers and are not covered here.

use std::alloc::{GlobalAlloc, Layout, System};
use std::path::Path;
use std::sync::atomic::{AtomicIsize, Ordering};

use lutfx_icc::Intent;
use lutfx_lut::{LutError, build_lut};

struct Counting;

static LIVE: AtomicIsize = AtomicIsize::new(0);

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let p = unsafe { System.alloc(layout) };
        if !p.is_null() {
            LIVE.fetch_add(layout.size() as isize, Ordering::SeqCst);
        }
        p
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        LIVE.fetch_sub(layout.size() as isize, Ordering::SeqCst);
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

#[test]
fn missing_profile_leaks_nothing() {
    let path = Path::new("/nonexistent/lutfx/FakeBRG.icc");

    // Warm up lazily initialized state (engine context, std internals).
    let _ = build_lut(path, 16, Intent::Perceptual);

    let before = LIVE.load(Ordering::SeqCst);
    for _ in 0..8 {
        let result = build_lut(path, 16, Intent::Perceptual);
        assert!(matches!(result, Err(LutError::Profile(_))));
    }
    let after = LIVE.load(Ordering::SeqCst);

    assert_eq!(before, after, "failed builds leaked {} bytes", after - before);
}
