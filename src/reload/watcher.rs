//! Signal-driven reload.

use tokio::task::JoinHandle;

use crate::core::{ConfigHandle, Loader};
use crate::schema::Settings;

#[cfg(unix)]
use crate::error::Result;
#[cfg(unix)]
use crate::reload::signal::Hangup;
use crate::reload::signal::ReloadSignal;

/// What a watcher does when a signal-triggered reload fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadFailurePolicy {
    /// Log the failure and terminate the process.
    ///
    /// The default: a rejected reload means the file and environment no
    /// longer describe a loadable configuration, and running on settings
    /// that can no longer be reproduced invites drift.
    #[default]
    Fatal,
    /// Log the failure and keep serving the previous settings.
    KeepPrevious,
}

/// Re-runs the load cycle whenever a reload signal arrives.
///
/// A watcher owns the [`Loader`] it will drive. Arming spawns one background
/// task per handle that waits for signal occurrences and loads once per
/// occurrence, strictly serialized: the next wait starts only after the
/// previous load finished, and each load also serializes on the handle's
/// guard with every other reader and writer.
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
/// # async fn example() -> Result<()> {
/// let handle = ConfigHandle::new(AppSettings::default(), "app.yaml")?;
/// let loader = Loader::new();
/// loader.load(&handle)?;
///
/// let task = ReloadWatcher::new(loader)
///     .on_failure(ReloadFailurePolicy::KeepPrevious)
///     .arm(&handle)?;
/// # Ok(())
/// # }
/// ```
pub struct ReloadWatcher<T> {
    loader: Loader<T>,
    policy: ReloadFailurePolicy,
}

impl<T: Settings> ReloadWatcher<T> {
    /// A watcher that will drive `loader` on each signal occurrence.
    pub fn new(loader: Loader<T>) -> Self {
        Self {
            loader,
            policy: ReloadFailurePolicy::default(),
        }
    }

    /// Choose what happens when a reload fails.
    pub fn on_failure(mut self, policy: ReloadFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Arm reload on SIGHUP.
    ///
    /// Registers the process hang-up signal and spawns the watcher task.
    /// Arming a handle that is already armed is a no-op returning
    /// `Ok(None)`; a handle transitions to armed exactly once.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Signal`](crate::error::ConfigError::Signal)
    /// when the SIGHUP handler cannot be installed.
    #[cfg(unix)]
    pub fn arm(self, handle: &ConfigHandle<T>) -> Result<Option<ReloadTask>> {
        if handle.is_reload_armed() {
            return Ok(None);
        }
        let signal = Hangup::register()?;
        Ok(self.arm_with(handle, signal))
    }

    /// Arm reload on an arbitrary signal stream.
    ///
    /// Same contract as [`arm`](Self::arm) minus the SIGHUP registration;
    /// exists so embedders and tests can supply their own trigger.
    pub fn arm_with<S: ReloadSignal>(
        self,
        handle: &ConfigHandle<T>,
        mut signal: S,
    ) -> Option<ReloadTask> {
        if !handle.arm_reload() {
            return None;
        }

        let handle = handle.clone();
        let Self { loader, policy } = self;

        let task = tokio::spawn(async move {
            // One occurrence at a time: the next recv starts only after the
            // previous load finished.
            while let Some(()) = signal.recv().await {
                match loader.load(&handle) {
                    Ok(()) => {
                        tracing::info!(
                            path = %handle.source().display(),
                            "settings reloaded"
                        );
                    }
                    Err(err) => match policy {
                        ReloadFailurePolicy::Fatal => {
                            tracing::error!(
                                path = %handle.source().display(),
                                error = %err,
                                "settings reload failed"
                            );
                            eprintln!("settings reload failed: {err}");
                            std::process::exit(1);
                        }
                        ReloadFailurePolicy::KeepPrevious => {
                            tracing::warn!(
                                path = %handle.source().display(),
                                error = %err,
                                "settings reload failed, keeping previous settings"
                            );
                        }
                    },
                }
            }
        });

        Some(ReloadTask { task })
    }
}

/// Handle to a running watcher task.
///
/// Dropping the handle detaches the task: it keeps watching until process
/// exit, which is the default lifecycle. [`stop`](Self::stop) cancels it at
/// the next signal wait; an in-flight reload always completes first, so the
/// settings guard is never abandoned mid-merge.
#[derive(Debug)]
pub struct ReloadTask {
    task: JoinHandle<()>,
}

impl ReloadTask {
    /// Stop watching. Takes effect at the task's next await point.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Whether the watcher task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
