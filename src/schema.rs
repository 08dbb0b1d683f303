//! Per-field descriptor tables.
//!
//! A settings type describes itself once, at definition time, as a
//! `&'static` table of [`FieldSpec`]s: one entry per field, in declaration
//! order, carrying the field's name, its required marker, how to test it for
//! its default state, and how each decode collaborator writes into it. The
//! table is ordinary `const` data, so a field list that names a nonexistent
//! field or mismatches a type is a compile error, not a runtime surprise.
//!
//! ```rust
//! use hup_config::schema::{field, FieldSpec, Settings};
//! use hup_config::unset::Unset;
//!
//! #[derive(Debug, Default)]
//! struct Limits {
//!     max_connections: u32,
//!     burst: Option<u32>,
//! }
//!
//! impl Settings for Limits {
//!     fn fields() -> &'static [FieldSpec<Self>] {
//!         const FIELDS: &[FieldSpec<Limits>] = &[
//!             FieldSpec::new("max_connections", |s| s.max_connections.is_unset())
//!                 .from_file("max_connections", |s, v| field::assign(&mut s.max_connections, v))
//!                 .from_env("MAX_CONNECTIONS", |s, raw| field::parse(&mut s.max_connections, raw))
//!                 .required(),
//!             FieldSpec::new("burst", |s| s.burst.is_unset())
//!                 .from_env("BURST", |s, raw| field::parse_opt(&mut s.burst, raw)),
//!         ];
//!         FIELDS
//!     }
//! }
//! ```

use crate::error::ValueError;

/// A settings aggregate the engine can load, validate and reload.
pub trait Settings: Sized + Send + 'static {
    /// The field descriptor table, in declaration order.
    fn fields() -> &'static [FieldSpec<Self>];

    /// The current debug-verbosity token, or `""` when the aggregate does
    /// not carry one.
    fn debug_level(&self) -> &str {
        ""
    }
}

/// Applies a parsed document value to one field.
pub type ApplyValue<T> = fn(&mut T, serde_yaml::Value) -> Result<(), ValueError>;

/// Applies a raw environment string to one field.
pub type ApplyStr<T> = fn(&mut T, &str) -> Result<(), ValueError>;

/// Describes one field of a settings aggregate.
pub struct FieldSpec<T> {
    name: &'static str,
    required: bool,
    is_unset: fn(&T) -> bool,
    file: Option<FileBinding<T>>,
    env: Option<EnvBinding<T>>,
}

/// Binds a field to a document key for the file decoder.
pub struct FileBinding<T> {
    /// The document key to read.
    pub key: &'static str,
    /// Writes the value found under `key` into the field.
    pub apply: ApplyValue<T>,
}

/// Binds a field to an environment variable for the env decoder.
pub struct EnvBinding<T> {
    /// The variable name to read.
    pub key: &'static str,
    /// Parses the variable's value into the field.
    pub apply: ApplyStr<T>,
}

impl<T> FieldSpec<T> {
    /// Describe a field by its declaration name and its default-state test.
    pub const fn new(name: &'static str, is_unset: fn(&T) -> bool) -> Self {
        Self {
            name,
            required: false,
            is_unset,
            file: None,
            env: None,
        }
    }

    /// Bind the field to a document key for the file decoder.
    pub const fn from_file(mut self, key: &'static str, apply: ApplyValue<T>) -> Self {
        self.file = Some(FileBinding { key, apply });
        self
    }

    /// Bind the field to an environment variable for the env decoder.
    pub const fn from_env(mut self, key: &'static str, apply: ApplyStr<T>) -> Self {
        self.env = Some(EnvBinding { key, apply });
        self
    }

    /// Mark the field required: it must be set once both decoders have run.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The field's declaration name, as used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the field is marked required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the field is still in its default state on `target`.
    pub fn is_unset(&self, target: &T) -> bool {
        (self.is_unset)(target)
    }

    /// The file binding, if the field has one.
    pub fn file_binding(&self) -> Option<&FileBinding<T>> {
        self.file.as_ref()
    }

    /// The env binding, if the field has one.
    pub fn env_binding(&self) -> Option<&EnvBinding<T>> {
        self.env.as_ref()
    }
}

/// Whether every described field of `target` is still unset.
///
/// Lets a nested aggregate implement [`Unset`](crate::unset::Unset) in one
/// line, so an outer table can treat it like any other field:
///
/// ```rust
/// # use hup_config::schema::{aggregate_is_unset, FieldSpec, Settings};
/// # use hup_config::unset::Unset;
/// # #[derive(Debug, Default)]
/// # struct Tls { cert: String }
/// # impl Settings for Tls {
/// #     fn fields() -> &'static [FieldSpec<Self>] {
/// #         const FIELDS: &[FieldSpec<Tls>] =
/// #             &[FieldSpec::new("cert", |s| s.cert.is_unset())];
/// #         FIELDS
/// #     }
/// # }
/// impl Unset for Tls {
///     fn is_unset(&self) -> bool {
///         aggregate_is_unset(self)
///     }
/// }
/// ```
pub fn aggregate_is_unset<T: Settings>(target: &T) -> bool {
    T::fields().iter().all(|field| field.is_unset(target))
}

/// Apply helpers for field bindings.
///
/// Each helper bridges one decoding style to a `&mut` field slot so the
/// per-field closures in a descriptor table stay one line.
pub mod field {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::DeserializeOwned;

    use crate::error::ValueError;

    /// Deserialize a parsed document value into the field slot.
    pub fn assign<F: DeserializeOwned>(
        slot: &mut F,
        value: serde_yaml::Value,
    ) -> Result<(), ValueError> {
        *slot = serde_yaml::from_value(value).map_err(|err| ValueError(err.to_string()))?;
        Ok(())
    }

    /// Parse a raw environment string into the field slot.
    pub fn parse<F>(slot: &mut F, raw: &str) -> Result<(), ValueError>
    where
        F: FromStr,
        F::Err: Display,
    {
        *slot = raw.parse().map_err(|err: F::Err| ValueError(err.to_string()))?;
        Ok(())
    }

    /// Parse a raw environment string into an optional field slot.
    pub fn parse_opt<F>(slot: &mut Option<F>, raw: &str) -> Result<(), ValueError>
    where
        F: FromStr,
        F::Err: Display,
    {
        *slot = Some(raw.parse().map_err(|err: F::Err| ValueError(err.to_string()))?);
        Ok(())
    }
}
