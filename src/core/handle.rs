//! The guarded settings handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, MutexGuard};

use crate::error::{ConfigError, Result};
use crate::level;
use crate::schema::Settings;

/// Owns a settings aggregate together with the lock that guards it.
///
/// Every read and write of the aggregate goes through [`lock`](Self::lock);
/// the returned guard releases on every exit path, so no caller can observe
/// a half-merged aggregate while a load cycle is running. Cloning the handle
/// is cheap and shares the same guarded state.
///
/// # Examples
///
/// ```rust,no_run
/// # use hup_config::prelude::*;
/// # use hup_config::schema::FieldSpec;
/// # #[derive(Debug, Default)]
/// # struct AppSettings { port: u16 }
/// # impl Settings for AppSettings {
/// #     fn fields() -> &'static [FieldSpec<Self>] { &[] }
/// # }
/// # fn example() -> Result<()> {
/// let handle = ConfigHandle::new(AppSettings::default(), "app.yaml")?;
/// let port = handle.lock().port;
/// # Ok(())
/// # }
/// ```
pub struct ConfigHandle<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    settings: Mutex<T>,
    source: PathBuf,
    reload_armed: AtomicBool,
}

impl<T: Settings> ConfigHandle<T> {
    /// Wrap `settings` together with the location of its persisted form.
    ///
    /// The source path is fixed for the life of the handle and read-only to
    /// the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySource`] when `source` is empty; a load
    /// against an empty path would silently skip its file step forever.
    pub fn new(settings: T, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        if source.as_os_str().is_empty() {
            return Err(ConfigError::EmptySource);
        }
        Ok(Self {
            inner: Arc::new(Inner {
                settings: Mutex::new(settings),
                source,
                reload_armed: AtomicBool::new(false),
            }),
        })
    }

    /// Acquire the guard over the settings aggregate.
    ///
    /// Blocks until any in-flight load cycle finishes. The guard derefs to
    /// the aggregate (mutably as well) and releases when dropped.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.settings.lock()
    }

    /// Where the persisted settings live.
    pub fn source(&self) -> &Path {
        &self.inner.source
    }

    /// Whether a reload watcher has been armed for this handle.
    pub fn is_reload_armed(&self) -> bool {
        self.inner.reload_armed.load(Ordering::Acquire)
    }

    /// Mark the handle armed. Returns `false` if it already was; the
    /// transition happens exactly once per handle.
    pub(crate) fn arm_reload(&self) -> bool {
        self.inner
            .reload_armed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the current debug level is at least as verbose as `level`.
    ///
    /// Comparison is by rank (`error < warning < info < verbose`), never
    /// lexical; see [`level::at_least`] for how unknown tokens rank.
    pub fn debug_at_least(&self, level: &str) -> bool {
        level::at_least(self.lock().debug_level(), level)
    }
}

impl<T> Clone for ConfigHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
