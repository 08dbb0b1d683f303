//! Signal-driven reload.
//!
//! [`ReloadWatcher`] re-runs the load cycle whenever the reload signal
//! arrives. On Unix that is the process hang-up signal (SIGHUP), the
//! "re-read your configuration" notification. The trigger itself is a seam
//! ([`ReloadSignal`]) so the watcher can be driven without raising signals.

mod signal;
mod watcher;

#[cfg(unix)]
pub use signal::Hangup;
pub use signal::ReloadSignal;
pub use watcher::{ReloadFailurePolicy, ReloadTask, ReloadWatcher};
