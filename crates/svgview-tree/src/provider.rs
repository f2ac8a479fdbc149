//! Tree data provider over the workspace folders.

use std::fs;
use std::path::{Path, PathBuf};

use itertools::{Either, Itertools};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use svgview_core::{ExpandState, ImageFile, TreeNode, WorkspaceFolder, is_excluded_dir};
use svgview_scan::scan_for_tree;

use crate::cache::FolderImageCache;

/// Capacity of the change notification channel.
const CHANGE_CHANNEL_SIZE: usize = 16;

/// Notification that previously listed levels are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeChange {
    /// The whole tree must be requested again from the root.
    All,
}

/// Supplies one level of the browsing tree at a time.
pub struct ImageTreeProvider {
    workspace_folders: Vec<WorkspaceFolder>,
    cache: FolderImageCache,
    change_tx: broadcast::Sender<TreeChange>,
}

impl ImageTreeProvider {
    /// Create a provider rooted at the given workspace folders.
    pub fn new(workspace_folders: Vec<WorkspaceFolder>) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_SIZE);
        Self {
            workspace_folders,
            cache: FolderImageCache::new(),
            change_tx,
        }
    }

    /// Subscribe to tree change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<TreeChange> {
        self.change_tx.subscribe()
    }

    /// Workspace folders this provider lists at the root.
    pub fn workspace_folders(&self) -> &[WorkspaceFolder] {
        &self.workspace_folders
    }

    /// List the children of `parent`, or the root level when `parent` is `None`.
    ///
    /// Folders with no assets below them are omitted. File nodes have no
    /// children.
    pub fn children(&mut self, parent: Option<&TreeNode>) -> Vec<TreeNode> {
        match parent {
            None => self.root_children(),
            Some(node) if node.is_folder() => self.folder_children(node.node_path()),
            Some(_) => Vec::new(),
        }
    }

    /// Clear the cache and tell subscribers to re-request the tree.
    ///
    /// Nothing is rescanned here; levels are recomputed as they are asked for.
    pub fn refresh(&mut self) {
        self.cache.clear();
        // No subscribers is fine.
        let _ = self.change_tx.send(TreeChange::All);
        debug!("tree cache cleared");
    }

    /// Assets cached for `folder`, empty if it was not visited since the last refresh.
    pub fn images_for_path(&self, folder: &Path) -> &[ImageFile] {
        self.cache.get(folder)
    }

    /// Read access to the cache.
    pub fn cache(&self) -> &FolderImageCache {
        &self.cache
    }

    fn root_children(&mut self) -> Vec<TreeNode> {
        let mut nodes = Vec::new();

        for folder in &self.workspace_folders {
            let images = scan_for_tree(&folder.path);
            if images.is_empty() {
                continue;
            }
            nodes.push(TreeNode::folder(
                folder.name.clone(),
                folder.path.clone(),
                ExpandState::Expanded,
                images.len(),
            ));
            self.cache.insert(folder.path.clone(), images);
        }

        debug!(roots = nodes.len(), "listed workspace roots");
        nodes
    }

    fn folder_children(&mut self, folder: &Path) -> Vec<TreeNode> {
        let (dirs, files) = read_level(folder);

        let mut nodes = Vec::with_capacity(dirs.len() + files.len());
        let mut folder_images = Vec::new();

        for (name, path) in dirs {
            if is_excluded_dir(&name) {
                continue;
            }
            let images = scan_for_tree(&path);
            if images.is_empty() {
                continue;
            }
            nodes.push(TreeNode::folder(
                name,
                path.clone(),
                ExpandState::Collapsed,
                images.len(),
            ));
            folder_images.extend(images.iter().cloned());
            self.cache.insert(path, images);
        }

        for (name, path) in files {
            if let Some(image) = ImageFile::from_path(&path) {
                nodes.push(TreeNode::file(name, path));
                folder_images.push(image);
            }
        }

        debug!(folder = %folder.display(), nodes = nodes.len(), "listed folder");
        self.cache.insert(folder, folder_images);
        nodes
    }
}

/// Entry names and paths of one directory, split into (directories, files)
/// and sorted by name. Unreadable directories list as empty.
fn read_level(folder: &Path) -> (Vec<(String, PathBuf)>, Vec<(String, PathBuf)>) {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(err) => {
            trace!(folder = %folder.display(), error = %err, "folder unreadable, listing as empty");
            return (Vec::new(), Vec::new());
        }
    };

    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let file_type = entry.file_type().ok()?;
            let is_dir = file_type.is_dir();
            (is_dir || file_type.is_file()).then(|| {
                (entry.file_name().to_string_lossy().into_owned(), entry.path(), is_dir)
            })
        })
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .partition_map(|(name, path, is_dir)| {
            if is_dir {
                Either::Left((name, path))
            } else {
                Either::Right((name, path))
            }
        })
}
