//! Core types for svgview.
//!
//! This crate provides the data model shared by the scanner, the tree
//! materializer and the render boundary: image descriptors, browsing tree
//! nodes, the fixed asset allow-list and the directory exclusion rule.

mod asset;
mod error;
mod node;
mod rules;

pub use asset::{AssetKind, IMAGE_EXTENSIONS, ImageFile, is_supported_asset};
pub use error::ScanError;
pub use node::{ExpandState, NodeKind, TreeNode, WorkspaceFolder};
pub use rules::{DEPENDENCY_DIR, HIDDEN_PREFIX, is_excluded_dir};
