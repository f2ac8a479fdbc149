//! Application state types.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use svgview_core::{ExpandState, TreeNode};
use svgview_tree::ImageTreeProvider;

use crate::ui::TreeRow;

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    Quit,
}

/// One-line message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// The levels of the browsing tree fetched so far.
///
/// Levels are requested from the provider only when a folder is expanded,
/// and kept until the next refresh.
#[derive(Debug, Default)]
pub struct TreeModel {
    roots: Vec<TreeNode>,
    children: HashMap<PathBuf, Vec<TreeNode>>,
    expanded: HashSet<PathBuf>,
}

impl TreeModel {
    /// Load the root level and open the folders the provider marks expanded.
    pub fn load(provider: &mut ImageTreeProvider) -> Self {
        let mut model = Self::default();
        model.roots = provider.children(None);
        let open = model
            .roots
            .iter()
            .filter(|node| node.expand_state() == ExpandState::Expanded)
            .map(|node| node.node_path().to_path_buf())
            .collect();
        model.reopen(provider, open);
        model
    }

    /// Request every level again, keeping open the folders that still exist.
    pub fn reload(&mut self, provider: &mut ImageTreeProvider) {
        let open = std::mem::take(&mut self.expanded);
        self.children.clear();
        self.roots = provider.children(None);
        self.reopen(provider, open);
    }

    fn reopen(&mut self, provider: &mut ImageTreeProvider, open: HashSet<PathBuf>) {
        let mut pending = self.roots.clone();
        while let Some(node) = pending.pop() {
            if node.is_folder() && open.contains(node.node_path()) {
                self.expand(provider, &node);
                if let Some(children) = self.children.get(node.node_path()) {
                    pending.extend(children.iter().cloned());
                }
            }
        }
    }

    /// Open a folder, fetching its level on first use.
    pub fn expand(&mut self, provider: &mut ImageTreeProvider, node: &TreeNode) {
        if !node.is_folder() {
            return;
        }
        let path = node.node_path().to_path_buf();
        if !self.children.contains_key(&path) {
            let children = provider.children(Some(node));
            self.children.insert(path.clone(), children);
        }
        self.expanded.insert(path);
    }

    /// Close a folder. Its fetched level is kept.
    pub fn collapse(&mut self, path: &Path) {
        self.expanded.remove(path);
    }

    /// Check if a folder is open.
    pub fn is_expanded(&self, path: &Path) -> bool {
        self.expanded.contains(path)
    }

    /// Root level nodes.
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Flatten the open part of the tree in display order.
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let count = self.roots.len();
        for (i, node) in self.roots.iter().enumerate() {
            self.push_rows(node, 0, i + 1 == count, Vec::new(), &mut rows);
        }
        rows
    }

    fn push_rows(
        &self,
        node: &TreeNode,
        depth: usize,
        is_last: bool,
        parent_lasts: Vec<bool>,
        rows: &mut Vec<TreeRow>,
    ) {
        let expanded = self.is_expanded(node.node_path());
        rows.push(TreeRow {
            node: node.clone(),
            depth,
            expanded,
            is_last_sibling: is_last,
            parent_last_siblings: parent_lasts.clone(),
        });

        if !expanded {
            return;
        }
        let Some(children) = self.children.get(node.node_path()) else {
            return;
        };
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let mut child_lasts = parent_lasts.clone();
            if depth > 0 {
                child_lasts.push(is_last);
            }
            self.push_rows(child, depth + 1, i + 1 == count, child_lasts, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use svgview_core::WorkspaceFolder;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("icons/brand")).unwrap();
        fs::write(temp.path().join("icons/brand/logo.svg"), "<svg/>").unwrap();
        fs::write(temp.path().join("icons/a.png"), "png").unwrap();
        fs::write(temp.path().join("top.svg"), "<svg/>").unwrap();
        temp
    }

    fn labels(model: &TreeModel) -> Vec<(usize, String)> {
        model
            .rows()
            .into_iter()
            .map(|row| (row.depth, row.node.label().to_string()))
            .collect()
    }

    #[test]
    fn test_load_opens_roots() {
        let temp = workspace();
        let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::named("ws", temp.path())]);
        let model = TreeModel::load(&mut provider);

        assert_eq!(
            labels(&model),
            vec![
                (0, "ws".to_string()),
                (1, "icons".to_string()),
                (1, "top.svg".to_string()),
            ]
        );
    }

    #[test]
    fn test_expand_and_collapse() {
        let temp = workspace();
        let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::named("ws", temp.path())]);
        let mut model = TreeModel::load(&mut provider);

        let icons = model.rows()[1].node.clone();
        model.expand(&mut provider, &icons);
        assert_eq!(model.rows().len(), 5);
        assert_eq!(model.rows()[2].node.label(), "brand");
        assert_eq!(model.rows()[2].depth, 2);

        model.collapse(icons.node_path());
        assert_eq!(model.rows().len(), 3);
    }

    #[test]
    fn test_reload_keeps_open_folders() {
        let temp = workspace();
        let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::named("ws", temp.path())]);
        let mut model = TreeModel::load(&mut provider);
        let icons = model.rows()[1].node.clone();
        model.expand(&mut provider, &icons);

        fs::write(temp.path().join("icons/b.gif"), "gif").unwrap();
        provider.refresh();
        model.reload(&mut provider);

        let names: Vec<_> = labels(&model).into_iter().map(|(_, n)| n).collect();
        assert!(names.contains(&"b.gif".to_string()));
        assert!(model.is_expanded(icons.node_path()));
    }

    #[test]
    fn test_empty_workspace_has_no_rows() {
        let temp = TempDir::new().unwrap();
        let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(temp.path())]);
        let model = TreeModel::load(&mut provider);
        assert!(model.roots().is_empty());
        assert!(model.rows().is_empty());
    }
}
