//! Color engine configuration.
//!
//! Little CMS reports problems (truncated tags, unsupported pipelines,
//! unreadable files) through one error handler per process. The handler
//! is installed here, once, from an [`EngineConfig`].

use crate::{IccError, IccResult};
use std::borrow::Cow;
use std::ffi::{CStr, c_char};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Callback signature for custom engine log sinks: `(error_code, message)`.
pub type SinkFn = dyn Fn(u32, &str) + Send + Sync;

/// Destination for color engine diagnostics.
#[derive(Clone, Default)]
pub enum LogSink {
    /// Emit each message as a `tracing` warning.
    #[default]
    Tracing,
    /// Drop engine messages.
    Silent,
    /// Forward to a user callback.
    Custom(Arc<SinkFn>),
}

impl LogSink {
    /// Wraps a closure as a custom sink.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u32, &str) + Send + Sync + 'static,
    {
        LogSink::Custom(Arc::new(f))
    }

    fn emit(&self, code: u32, message: &str) {
        match self {
            LogSink::Tracing => warn!(code, "lcms: {}", message),
            LogSink::Silent => {}
            LogSink::Custom(f) => f(code, message),
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::Tracing => f.write_str("Tracing"),
            LogSink::Silent => f.write_str("Silent"),
            LogSink::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Process-wide color engine settings.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Where engine diagnostics go.
    pub log_sink: LogSink,
}

impl EngineConfig {
    /// Creates a config with the default (`tracing`) sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log sink.
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.log_sink = sink;
        self
    }
}

static ENGINE: OnceLock<EngineConfig> = OnceLock::new();

/// Installs the engine error handler.
///
/// Must be called at most once per process, before profiles are loaded
/// if their diagnostics matter.
///
/// # Errors
///
/// Returns [`IccError::AlreadyConfigured`] on a second call.
pub fn configure_color_engine(config: EngineConfig) -> IccResult<()> {
    debug!(sink = ?config.log_sink, "configuring color engine");
    ENGINE.set(config).map_err(|_| IccError::AlreadyConfigured)?;
    // SAFETY: `engine_log` matches the engine's handler ABI and only reads
    // the static configuration, which is initialized above and never freed.
    unsafe { lcms2_sys::cmsSetLogErrorHandler(Some(engine_log)) };
    Ok(())
}

/// Returns true once [`configure_color_engine`] has succeeded.
pub fn is_engine_configured() -> bool {
    ENGINE.get().is_some()
}

unsafe extern "C" fn engine_log(_ctx: lcms2_sys::Context, code: u32, text: *const c_char) {
    let message = if text.is_null() {
        Cow::Borrowed("")
    } else {
        // SAFETY: the engine passes a NUL-terminated string valid for the call.
        unsafe { CStr::from_ptr(text) }.to_string_lossy()
    };
    if let Some(config) = ENGINE.get() {
        config.log_sink.emit(code, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Profile;
    use std::sync::Mutex;

    #[test]
    fn test_configure_once_routes_engine_messages() {
        let seen: Arc<Mutex<Vec<(u32, String)>>> = Arc::default();
        let sink_seen = Arc::clone(&seen);
        let config = EngineConfig::new().with_log_sink(LogSink::custom(move |code, msg| {
            if let Ok(mut v) = sink_seen.lock() {
                v.push((code, msg.to_string()));
            }
        }));

        configure_color_engine(config).unwrap();
        assert!(is_engine_configured());

        let again = configure_color_engine(EngineConfig::new());
        assert!(matches!(again, Err(IccError::AlreadyConfigured)));

        // A header-sized buffer with a bogus signature makes the engine complain.
        let mut bogus = vec![0u8; 132];
        bogus[3] = 132;
        assert!(Profile::from_icc(&bogus).is_err());

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty(), "engine reported nothing");
    }

    #[test]
    fn test_sink_debug() {
        assert_eq!(format!("{:?}", LogSink::Silent), "Silent");
        assert_eq!(format!("{:?}", LogSink::custom(|_, _| {})), "Custom(..)");
    }
}
