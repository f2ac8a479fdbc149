//! Recursive image asset scanning for svgview.
//!
//! Two walks are exposed, and callers pick one by intent:
//!
//! - [`scan_directory`] feeds the full viewer. It has no exclusions and
//!   fails on the first directory it cannot read.
//! - [`scan_for_tree`] feeds the browsing tree. It skips hidden and
//!   dependency directories, and an unreadable branch simply contributes
//!   nothing, so one bad folder never breaks browsing of the rest.
//!
//! Both walks are serial and synchronous and do not follow symlinks.
//!
//! # Example
//!
//! ```rust,no_run
//! use svgview_scan::{count_images, scan_directory};
//!
//! let images = scan_directory("/path/to/assets").unwrap();
//! println!("{} images", images.len());
//! println!("{} shown in the tree", count_images("/path/to/assets"));
//! ```

mod scanner;

pub use scanner::{count_images, scan_directory, scan_for_tree};

// Re-export core types for convenience
pub use svgview_core::{AssetKind, ImageFile, ScanError, is_excluded_dir, is_supported_asset};
