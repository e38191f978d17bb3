//! Project descriptor model for keil-sync
//!
//! Wraps the parsed `.uvprojx` tree behind typed accessors: groups and their
//! files, and the `;`-joined include-path field. Raw element paths never
//! leave this crate.
//!
//! ```ignore
//! use keil_project::DescriptorDocument;
//!
//! let mut doc = DescriptorDocument::load(&path)?;
//! let mut group = doc.get_or_create_group("Project/drivers")?;
//! group.add_file(&found_file);
//! doc.save()?;
//! ```

pub mod document;
pub mod error;
pub mod group;
pub mod include_paths;
mod markup;
mod persist;
mod tree;

pub use document::DescriptorDocument;
pub use error::{Error, Result};
pub use group::{FileEntry, Group, GroupMut};
pub use include_paths::IncludePathList;
