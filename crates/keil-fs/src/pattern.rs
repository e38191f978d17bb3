//! Pattern validation for group-name and include-path filters

use regex::Regex;

use crate::{Error, Result};

/// Compile a user-supplied pattern.
///
/// Patterns are unanchored regular expressions: they match anywhere in the
/// candidate string unless the caller writes `^`/`$` themselves.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}
