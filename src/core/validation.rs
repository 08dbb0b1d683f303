//! Required-field validation.

use crate::error::{ConfigError, Result};
use crate::schema::Settings;

/// Names of required fields still unset on `target`, in declaration order.
///
/// Runs against whatever state `target` is in; the loader calls it on the
/// post-merge value, after both decoders have had their say.
pub fn missing_required<T: Settings>(target: &T) -> Vec<&'static str> {
    T::fields()
        .iter()
        .filter(|field| field.is_required() && field.is_unset(target))
        .map(|field| field.name())
        .collect()
}

/// Reject `target` if any required field is still unset.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequired`] naming the exact fields, order
/// preserved, so the message is stable across runs.
pub fn validate_required<T: Settings>(target: &T) -> Result<()> {
    let fields = missing_required(target);
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingRequired { fields })
    }
}
