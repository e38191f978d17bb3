//! TOML settings files

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Parse the TOML file at `path`, or `None` when no such file exists.
///
/// A file that exists but does not deserialize into `T` is a
/// [`Error::ConfigParse`]; callers decide whether that is fatal.
pub fn read_toml_optional<T: DeserializeOwned>(path: &NormalizedPath) -> Result<Option<T>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = io::read_text(path)?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })
}
