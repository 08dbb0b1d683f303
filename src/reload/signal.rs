//! The reload trigger seam.

use std::future::Future;

/// An out-of-band stream of reload requests.
///
/// One implementation ships: [`Hangup`], the process hang-up signal. The
/// trait exists so reload handling can be driven from tests, or embedded
/// behind another trigger, without raising real signals.
pub trait ReloadSignal: Send + 'static {
    /// Wait for the next occurrence. `None` means the stream is closed and
    /// the watcher task should stop.
    fn recv(&mut self) -> impl Future<Output = Option<()>> + Send;
}

/// SIGHUP as a reload stream.
#[cfg(unix)]
pub struct Hangup {
    inner: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Hangup {
    /// Register the process-wide SIGHUP handler.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Signal`](crate::error::ConfigError::Signal)
    /// when the handler cannot be installed.
    pub fn register() -> crate::error::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let inner = signal(SignalKind::hangup()).map_err(crate::error::ConfigError::Signal)?;
        Ok(Self { inner })
    }
}

#[cfg(unix)]
impl ReloadSignal for Hangup {
    fn recv(&mut self) -> impl Future<Output = Option<()>> + Send {
        self.inner.recv()
    }
}
