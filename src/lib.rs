//! # eldeps
//!
//! Dependency extraction for a directory of Emacs packages.
//!
//! Each subdirectory of a repository is one package. The `Package-Requires:`
//! header of its main `.el` file lists what it needs; eldeps collects those
//! lists into a package → dependencies map.
//!
//! ## Outputs
//!
//! - **Text**: one line per package
//! - **JSON**: an object of package name to dependency array
//! - **Graph**: a Graphviz diagram grouped by category, builtins shaded

pub mod core;
pub mod error;
pub mod formatters;
pub mod metadata;
pub mod parsers;
pub mod render;

pub use crate::core::{build_graph, DependencyMap, PackageGraph, PackageScanner};
pub use crate::error::{MetadataError, RenderError, ScanError};
pub use crate::metadata::Metadata;
