//! Decode collaborators.
//!
//! The engine itself never parses anything. A file decoder turns raw bytes
//! into field values, an environment decoder turns process variables into
//! field values, and both write through the target's descriptor table. The
//! shipped implementations cover the common case; custom ones plug in via
//! [`Loader::with_file_decoder`](crate::core::Loader::with_file_decoder) and
//! [`Loader::with_env_decoder`](crate::core::Loader::with_env_decoder).

mod env;
mod file;

pub use env::EnvOverrides;
pub use file::YamlFile;

use crate::error::DecodeError;

/// Decodes raw file bytes into fields carrying a file binding.
pub trait FileDecoder<T>: Send + Sync {
    /// Decode `bytes` into `target`.
    ///
    /// Fields without a file binding, and input keys no field is bound to,
    /// are left alone. Implementations write fields as they go; on error the
    /// already-written fields stay written.
    fn decode(&self, bytes: &[u8], target: &mut T) -> Result<(), DecodeError>;
}

/// Decodes process-environment overrides into fields carrying an env binding.
pub trait EnvDecoder<T>: Send + Sync {
    /// Decode the current process environment into `target`.
    ///
    /// Variables that are not set are skipped; the fields they would have
    /// written keep whatever the file step produced.
    fn decode(&self, target: &mut T) -> Result<(), DecodeError>;
}
