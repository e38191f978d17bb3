//! Shared test utilities for the keil-sync workspace.
//!
//! Dev-dependency only, never published. Deliberately independent of the
//! other workspace crates so any of them can use it in their tests.
//!
//! # Modules
//!
//! - [`descriptor`] - descriptor fixture text
//! - [`project`] - [`TestProject`](project::TestProject) builder for a descriptor plus source tree

pub mod descriptor;
pub mod project;

pub use descriptor::MINIMAL_DESCRIPTOR;
pub use project::TestProject;
