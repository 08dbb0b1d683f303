//! Default-state inspection for settings fields.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

/// Whether a value is still in its type's default, unset state.
///
/// Required-field validation calls this on the post-merge value: a field the
/// decoders never touched reports `true`. `Option` deliberately reports any
/// `Some` as set, even when the payload is itself a default: an explicit
/// empty value is a decision, not an omission. Wrap a field in `Option` when
/// "present but empty" must be distinguishable from "never set".
pub trait Unset {
    /// `true` iff the value is indistinguishable from its unset default.
    fn is_unset(&self) -> bool;
}

macro_rules! zero_is_unset {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Unset for $ty {
                fn is_unset(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

zero_is_unset! {
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    f32 => 0.0, f64 => 0.0,
    bool => false,
    char => '\0',
    Duration => Duration::ZERO,
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for PathBuf {
    fn is_unset(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl<T> Unset for Option<T> {
    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

impl<T> Unset for Vec<T> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Unset for HashMap<K, V, S> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Unset for BTreeMap<K, V> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Unset, const N: usize> Unset for [T; N] {
    fn is_unset(&self) -> bool {
        self.iter().all(Unset::is_unset)
    }
}
