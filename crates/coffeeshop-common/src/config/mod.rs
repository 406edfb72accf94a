//! Configuration loading contracts shared across crates

mod validation;

pub use validation::{require_absolute_url, require_host_label, require_present};

use crate::ConfigurationError;
use std::path::{Path, PathBuf};

/// Loads a configuration record from layered sources.
///
/// Implementors merge compiled-in defaults, an optional file and environment
/// overrides, then validate the result before handing it out.
pub trait ConfigLoader<T> {
    /// Load from the given file, or the implementor's default location
    fn load(path: Option<PathBuf>) -> Result<T, ConfigurationError>;

    /// Load from a specific file which must exist
    fn load_from_file(path: &Path) -> Result<T, ConfigurationError>;
}
