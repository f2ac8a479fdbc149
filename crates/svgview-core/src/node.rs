//! Browsing tree node types.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Expansion state of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpandState {
    /// Leaf, cannot be expanded.
    #[default]
    None,
    /// Expandable, currently closed.
    Collapsed,
    /// Expandable, currently open.
    Expanded,
}

/// Type of tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NodeKind {
    /// Directory with at least one asset below it.
    Folder,
    /// A single asset.
    #[serde(rename = "imageFile")]
    #[strum(serialize = "imageFile")]
    File,
}

/// One folder or file in the browsing tree.
///
/// Nodes are plain records built on demand when their parent is expanded.
/// Only folders carry an aggregate count; the constructors enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    label: CompactString,
    expand_state: ExpandState,
    node_path: PathBuf,
    node_kind: NodeKind,
    aggregate_count: Option<usize>,
}

impl TreeNode {
    /// Create a folder node with its aggregate asset count.
    pub fn folder(
        label: impl Into<CompactString>,
        node_path: impl Into<PathBuf>,
        expand_state: ExpandState,
        aggregate_count: usize,
    ) -> Self {
        Self {
            label: label.into(),
            expand_state,
            node_path: node_path.into(),
            node_kind: NodeKind::Folder,
            aggregate_count: Some(aggregate_count),
        }
    }

    /// Create a leaf node for an asset.
    pub fn file(label: impl Into<CompactString>, node_path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            expand_state: ExpandState::None,
            node_path: node_path.into(),
            node_kind: NodeKind::File,
            aggregate_count: None,
        }
    }

    /// Display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Expansion state.
    pub fn expand_state(&self) -> ExpandState {
        self.expand_state
    }

    /// Absolute path, the identity of the node.
    pub fn node_path(&self) -> &Path {
        &self.node_path
    }

    /// Folder or file.
    pub fn node_kind(&self) -> NodeKind {
        self.node_kind
    }

    /// Number of assets below a folder. Always `None` for files.
    pub fn aggregate_count(&self) -> Option<usize> {
        self.aggregate_count
    }

    /// Check if this is a folder node.
    pub fn is_folder(&self) -> bool {
        self.node_kind == NodeKind::Folder
    }
}

/// A root of the browsing tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    /// Display name.
    pub name: CompactString,
    /// Absolute folder path.
    pub path: PathBuf,
}

impl WorkspaceFolder {
    /// Create a workspace folder named after the last path component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| CompactString::from(n.to_string_lossy()))
            .unwrap_or_else(|| CompactString::from(path.to_string_lossy()));
        Self { name, path }
    }

    /// Create a workspace folder with an explicit display name.
    pub fn named(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_node() {
        let node = TreeNode::folder("icons", "/ws/icons", ExpandState::Collapsed, 3);
        assert!(node.is_folder());
        assert_eq!(node.aggregate_count(), Some(3));
        assert_eq!(node.expand_state(), ExpandState::Collapsed);
    }

    #[test]
    fn test_file_node_has_no_count() {
        let node = TreeNode::file("a.svg", "/ws/a.svg");
        assert!(!node.is_folder());
        assert_eq!(node.aggregate_count(), None);
        assert_eq!(node.expand_state(), ExpandState::None);
    }

    #[test]
    fn test_workspace_folder_name() {
        let folder = WorkspaceFolder::new("/home/user/project");
        assert_eq!(folder.name, "project");

        let root = WorkspaceFolder::new("/");
        assert_eq!(root.name, "/");
    }
}
