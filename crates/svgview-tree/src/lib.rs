//! Lazily materialized image browsing tree for svgview.
//!
//! [`ImageTreeProvider`] hands out one level of [`TreeNode`]s at a time. Every
//! folder it visits is scanned with the browsing walk, and the result is kept
//! in a [`FolderImageCache`] owned by the provider. The cache only changes
//! through listing and [`ImageTreeProvider::refresh`].
//!
//! ```rust,no_run
//! use svgview_tree::{ImageTreeProvider, WorkspaceFolder};
//!
//! let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new("/work/site")]);
//! for root in provider.children(None) {
//!     println!("{} ({:?})", root.label(), root.aggregate_count());
//!     for child in provider.children(Some(&root)) {
//!         println!("  {}", child.label());
//!     }
//! }
//! ```

mod cache;
mod provider;

pub use cache::FolderImageCache;
pub use provider::{ImageTreeProvider, TreeChange};

// Re-export core types for convenience
pub use svgview_core::{ExpandState, ImageFile, NodeKind, TreeNode, WorkspaceFolder};
