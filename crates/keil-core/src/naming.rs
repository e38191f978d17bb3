//! Group naming rules
//!
//! Groups created from a folder are named either by the folder's absolute
//! path, or by that path with the scan root swapped for a prefix. Refresh
//! and rebuild name sub-groups by the folder's path relative to the root.

use keil_fs::NormalizedPath;

use crate::{Error, Result};

/// Name for a group built from `folder` during `create_group`.
///
/// Without a prefix (or with an empty one) the folder path itself is the
/// name. With one, the leading `root` is replaced by `prefix`, so `root/app`
/// becomes `prefix/app` and `root` becomes `prefix`.
pub fn prefixed_group_name(
    folder: &NormalizedPath,
    root: &NormalizedPath,
    prefix: Option<&str>,
) -> Result<String> {
    let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
        return Ok(folder.as_str().to_string());
    };

    match folder.strip_prefix(root) {
        Some("") => Ok(prefix.to_string()),
        Some(rest) => Ok(format!("{prefix}/{rest}")),
        None => Err(Error::GroupPrefixMismatch {
            root: root.as_str().to_string(),
            folder: folder.as_str().to_string(),
        }),
    }
}

/// Name for the sub-group holding `folder` under `group` rooted at `root`.
///
/// The root folder itself maps to `group`.
pub fn sub_group_name(group: &str, folder: &NormalizedPath, root: &NormalizedPath) -> String {
    let relative = folder.relative_to(root);
    if relative == "." {
        group.to_string()
    } else {
        format!("{group}/{relative}")
    }
}
