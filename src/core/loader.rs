//! The load cycle: read, decode, merge, validate.

use std::fs;

use crate::core::handle::ConfigHandle;
use crate::core::validation;
use crate::error::{ConfigError, Result};
use crate::schema::Settings;
use crate::sources::{EnvDecoder, EnvOverrides, FileDecoder, YamlFile};

/// Runs load cycles against a [`ConfigHandle`].
///
/// A loader owns the two decode collaborators. [`Loader::new`] wires the
/// shipped YAML and environment decoders; either can be swapped out with
/// [`with_file_decoder`](Self::with_file_decoder) and
/// [`with_env_decoder`](Self::with_env_decoder).
pub struct Loader<T> {
    file: Box<dyn FileDecoder<T>>,
    env: Box<dyn EnvDecoder<T>>,
}

impl<T: Settings> Loader<T> {
    /// A loader using the shipped YAML file and environment decoders.
    pub fn new() -> Self {
        Self {
            file: Box::new(YamlFile::new()),
            env: Box::new(EnvOverrides::new()),
        }
    }

    /// Replace the file decoder.
    pub fn with_file_decoder(mut self, decoder: impl FileDecoder<T> + 'static) -> Self {
        self.file = Box::new(decoder);
        self
    }

    /// Replace the environment decoder.
    pub fn with_env_decoder(mut self, decoder: impl EnvDecoder<T> + 'static) -> Self {
        self.env = Box::new(decoder);
        self
    }

    /// Run one load cycle.
    ///
    /// The handle's guard is held for the whole call, so concurrent readers
    /// never observe a partially merged aggregate. The cycle:
    ///
    /// 1. Read the source file. A read failure (absent, unreadable) skips
    ///    the file step; the file is optional and the skip is not an error.
    ///    A decode failure of bytes that *were* read aborts the cycle;
    ///    fields the decoder already wrote stay written.
    /// 2. Apply environment overrides. These run second, so they win for any
    ///    field both sources bind.
    /// 3. Check required fields against the merged result.
    ///
    /// Calling `load` again with the same file and environment reproduces
    /// the same in-memory result.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Decode`], [`ConfigError::EnvDecode`] or
    /// [`ConfigError::MissingRequired`], in that order of precedence.
    pub fn load(&self, handle: &ConfigHandle<T>) -> Result<()> {
        let mut settings = handle.lock();

        match fs::read(handle.source()) {
            Ok(bytes) => {
                self.file
                    .decode(&bytes, &mut settings)
                    .map_err(|source| ConfigError::Decode {
                        path: handle.source().to_path_buf(),
                        source,
                    })?;
            }
            Err(err) => {
                tracing::debug!(
                    path = %handle.source().display(),
                    error = %err,
                    "settings file unreadable, skipping file step"
                );
            }
        }

        self.env.decode(&mut settings).map_err(ConfigError::EnvDecode)?;

        validation::validate_required(&*settings)
    }
}

impl<T: Settings> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}
