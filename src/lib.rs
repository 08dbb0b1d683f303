//! # hup-config
//!
//! Layered settings loading with required-field validation and SIGHUP
//! hot-reload.
//!
//! ## Overview
//!
//! `hup-config` populates a typed, mutable settings aggregate from two
//! layered sources and keeps it reloadable for the life of the process:
//!
//! - A settings file (YAML by default; the file is optional, so an absent or
//!   unreadable file skips the file step without error).
//! - Process-environment overrides, which win over file values for any
//!   field both sources bind.
//!
//! After the merge, fields marked required must be out of their default
//! state, or the load fails naming the exact fields. The aggregate lives
//! behind a guarded handle: one lock orders every load against every read,
//! so no caller ever observes a half-merged aggregate, including while a
//! SIGHUP-triggered reload is running.
//!
//! Instead of runtime reflection, each settings type describes itself once
//! as a `const` table of field descriptors: name, required marker,
//! default-state test, and the file/env bindings. See [`schema`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hup_config::prelude::*;
//! use hup_config::schema::field;
//!
//! #[derive(Debug, Default)]
//! struct AppSettings {
//!     debug: String,
//!     port: u16,
//!     timeout: u64,
//! }
//!
//! impl Settings for AppSettings {
//!     fn fields() -> &'static [FieldSpec<Self>] {
//!         const FIELDS: &[FieldSpec<AppSettings>] = &[
//!             FieldSpec::new("debug", |s| s.debug.is_unset())
//!                 .from_file("debug", |s, v| field::assign(&mut s.debug, v))
//!                 .from_env("DEBUG", |s, raw| field::parse(&mut s.debug, raw)),
//!             FieldSpec::new("port", |s| s.port.is_unset())
//!                 .from_env("PORT", |s, raw| field::parse(&mut s.port, raw))
//!                 .required(),
//!             FieldSpec::new("timeout", |s| s.timeout.is_unset())
//!                 .from_file("timeout", |s, v| field::assign(&mut s.timeout, v))
//!                 .from_env("TIMEOUT", |s, raw| field::parse(&mut s.timeout, raw)),
//!         ];
//!         FIELDS
//!     }
//!
//!     fn debug_level(&self) -> &str {
//!         &self.debug
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handle = ConfigHandle::new(AppSettings::default(), "app.yaml")?;
//!
//!     // First load is synchronous; the caller decides whether a failure
//!     // aborts startup.
//!     let loader = Loader::new();
//!     loader.load(&handle)?;
//!
//!     // Re-run the cycle on every SIGHUP for the rest of the process.
//!     let _task = ReloadWatcher::new(loader).arm(&handle)?;
//!
//!     if handle.debug_at_least("info") {
//!         println!("listening on port {}", handle.lock().port);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Reload semantics
//!
//! A reload is one full load cycle under the same guard the first load used.
//! Reloads are strictly serialized: one signal occurrence, one cycle, never
//! two in flight. A failed reload is fatal by default (the process must not
//! keep running on settings that can no longer be reproduced);
//! [`ReloadFailurePolicy::KeepPrevious`](reload::ReloadFailurePolicy) opts
//! into logging the failure and keeping the previous settings instead.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod level;
pub mod reload;
pub mod schema;
pub mod sources;
pub mod unset;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{ConfigHandle, Loader};
    pub use crate::error::{ConfigError, DecodeError, Result};
    pub use crate::reload::{ReloadFailurePolicy, ReloadWatcher};
    pub use crate::schema::{FieldSpec, Settings};
    pub use crate::unset::Unset;
}
