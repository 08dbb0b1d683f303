//! Core engine types: the guarded handle, the load cycle and validation.

mod handle;
mod loader;
mod validation;

pub use handle::ConfigHandle;
pub use loader::Loader;
pub use validation::{missing_required, validate_required};
