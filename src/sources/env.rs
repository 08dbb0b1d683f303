//! Environment-variable decoder.

use std::env;

use super::EnvDecoder;
use crate::error::DecodeError;
use crate::schema::Settings;

/// The shipped environment decoder.
///
/// Reads each field's bound variable from the process environment. Unset
/// variables are skipped; set variables always win over file values because
/// the env step runs after the file step.
///
/// # Examples
///
/// ```rust
/// use hup_config::sources::EnvOverrides;
///
/// // Reads the bound variables exactly as named: PORT, TIMEOUT, ...
/// let plain = EnvOverrides::new();
///
/// // Reads APP_PORT, APP_TIMEOUT, ...
/// let prefixed = EnvOverrides::with_prefix("APP_");
/// ```
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    prefix: String,
}

impl EnvOverrides {
    /// Read variables exactly as bound in the descriptor table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every bound variable name.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn variable(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl<T: Settings> EnvDecoder<T> for EnvOverrides {
    fn decode(&self, target: &mut T) -> Result<(), DecodeError> {
        for spec in T::fields() {
            let Some(binding) = spec.env_binding() else {
                continue;
            };
            let variable = self.variable(binding.key);
            match env::var(&variable) {
                Ok(raw) => {
                    (binding.apply)(target, &raw).map_err(|err| DecodeError::Field {
                        field: variable,
                        reason: err.to_string(),
                    })?;
                }
                Err(env::VarError::NotPresent) => {}
                Err(err @ env::VarError::NotUnicode(_)) => {
                    return Err(DecodeError::Field {
                        field: variable,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
