//! YAML file decoder.

use serde_yaml::Value;

use super::FileDecoder;
use crate::error::DecodeError;
use crate::schema::Settings;

/// The shipped file decoder: a YAML document applied through the target's
/// file bindings.
///
/// The document must be a mapping (or empty). Keys no field is bound to are
/// ignored, so a settings struct can describe a subset of a shared file.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFile;

impl YamlFile {
    /// Create the decoder.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Settings> FileDecoder<T> for YamlFile {
    fn decode(&self, bytes: &[u8], target: &mut T) -> Result<(), DecodeError> {
        // An empty file carries no settings; not an error.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        let document: Value =
            serde_yaml::from_slice(bytes).map_err(|err| DecodeError::Document(err.to_string()))?;

        let mapping = match document {
            Value::Null => return Ok(()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(DecodeError::Document(format!(
                    "expected a mapping at the top level, got {}",
                    value_kind(&other)
                )));
            }
        };

        for spec in T::fields() {
            let Some(binding) = spec.file_binding() else {
                continue;
            };
            if let Some(value) = mapping.get(binding.key) {
                (binding.apply)(target, value.clone()).map_err(|err| DecodeError::Field {
                    field: binding.key.to_string(),
                    reason: err.to_string(),
                })?;
            }
        }

        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
