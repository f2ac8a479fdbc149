use std::fs;
use std::path::Path;

use svgview_scan::scan_for_tree;
use svgview_tree::{ExpandState, ImageTreeProvider, NodeKind, TreeNode, WorkspaceFolder};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"x").unwrap();
}

fn labels(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(TreeNode::label).collect()
}

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "a.svg");
    touch(root, "sub/b.png");
    touch(root, "sub/.hidden/c.svg");
    touch(root, "node_modules/d.svg");
    touch(root, "docs/readme.md");
    touch(root, "docs/deep/notes.txt");
    touch(root, ".git/logo.png");
    temp
}

#[test]
fn test_root_level_omits_folders_without_assets() {
    let with_images = fixture();
    let without_images = TempDir::new().unwrap();
    touch(without_images.path(), "only/text.txt");

    let mut provider = ImageTreeProvider::new(vec![
        WorkspaceFolder::named("assets", with_images.path()),
        WorkspaceFolder::named("empty", without_images.path()),
    ]);

    let roots = provider.children(None);
    assert_eq!(labels(&roots), vec!["assets"]);
    assert_eq!(roots[0].expand_state(), ExpandState::Expanded);
    assert_eq!(roots[0].aggregate_count(), Some(2));
}

#[test]
fn test_no_workspace_folders_lists_nothing() {
    let mut provider = ImageTreeProvider::new(Vec::new());
    assert!(provider.children(None).is_empty());
}

#[test]
fn test_folder_level_applies_exclusions_and_omits_empty() {
    let temp = fixture();
    let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(temp.path())]);

    let roots = provider.children(None);
    let children = provider.children(Some(&roots[0]));

    // `docs` has no assets, `.git` and `node_modules` are excluded.
    assert_eq!(labels(&children), vec!["sub", "a.svg"]);

    let sub = &children[0];
    assert_eq!(sub.node_kind(), NodeKind::Folder);
    assert_eq!(sub.expand_state(), ExpandState::Collapsed);
    assert_eq!(sub.aggregate_count(), Some(1));

    let file = &children[1];
    assert_eq!(file.node_kind(), NodeKind::File);
    assert_eq!(file.aggregate_count(), None);
    assert_eq!(file.expand_state(), ExpandState::None);

    let grandchildren = provider.children(Some(sub));
    assert_eq!(labels(&grandchildren), vec!["b.png"]);
}

#[test]
fn test_aggregate_count_equals_tree_scan() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "icons/a.svg");
    touch(root, "icons/b.svg");
    touch(root, "icons/set/c.png");
    touch(root, "icons/.thumbs/d.png");
    touch(root, "photos/e.jpg");

    let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(root)]);
    let roots = provider.children(None);
    assert_eq!(roots[0].aggregate_count(), Some(scan_for_tree(root).len()));

    for child in provider.children(Some(&roots[0])) {
        if child.is_folder() {
            assert_eq!(
                child.aggregate_count(),
                Some(scan_for_tree(child.node_path()).len()),
                "count mismatch for {}",
                child.label()
            );
        }
    }
}

#[test]
fn test_listing_populates_cache() {
    let temp = fixture();
    let root = temp.path();
    let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(root)]);

    assert!(provider.images_for_path(root).is_empty());

    let roots = provider.children(None);
    assert_eq!(provider.images_for_path(root).len(), 2);
    assert!(provider.images_for_path(&root.join("sub")).is_empty());

    provider.children(Some(&roots[0]));
    let sub_images = provider.images_for_path(&root.join("sub"));
    assert_eq!(sub_images.len(), 1);
    assert_eq!(sub_images[0].name, "b.png");

    // Listing a folder rewrites its own entry with the same set the scan finds.
    let mut cached: Vec<_> = provider
        .images_for_path(root)
        .iter()
        .map(|i| i.path.clone())
        .collect();
    let mut scanned: Vec<_> = scan_for_tree(root).into_iter().map(|i| i.path).collect();
    cached.sort();
    scanned.sort();
    assert_eq!(cached, scanned);
}

#[test]
fn test_refresh_clears_until_revisited() {
    let temp = fixture();
    let root = temp.path();
    let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(root)]);

    let roots = provider.children(None);
    provider.children(Some(&roots[0]));
    assert!(!provider.images_for_path(&root.join("sub")).is_empty());

    provider.refresh();
    assert!(provider.images_for_path(root).is_empty());
    assert!(provider.images_for_path(&root.join("sub")).is_empty());

    let roots = provider.children(None);
    assert_eq!(provider.images_for_path(root).len(), 2);
    assert!(provider.images_for_path(&root.join("sub")).is_empty());

    provider.children(Some(&roots[0]));
    assert_eq!(provider.images_for_path(&root.join("sub")).len(), 1);
}

#[test]
fn test_rescan_after_filesystem_change_needs_refresh() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "a.svg");

    let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(root)]);
    let roots = provider.children(None);
    assert_eq!(roots[0].aggregate_count(), Some(1));

    touch(root, "b.svg");
    assert_eq!(provider.images_for_path(root).len(), 1);

    provider.refresh();
    let roots = provider.children(None);
    assert_eq!(roots[0].aggregate_count(), Some(2));
}

#[test]
fn test_missing_folder_lists_as_empty() {
    let temp = TempDir::new().unwrap();
    let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(temp.path())]);

    let gone = TreeNode::folder("gone", temp.path().join("gone"), ExpandState::Collapsed, 3);
    assert!(provider.children(Some(&gone)).is_empty());
    assert!(provider.images_for_path(&temp.path().join("gone")).is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_child_folder_does_not_hide_siblings() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "a.svg");
    touch(root, "ok/fine.png");
    touch(root, "locked/secret.svg");

    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        eprintln!("skipping: permission bits are not enforced for this user");
        return;
    }

    let mut provider = ImageTreeProvider::new(vec![WorkspaceFolder::new(root)]);
    let roots = provider.children(None);
    let children = provider.children(Some(&roots[0]));
    let locked_children = provider.children(Some(&TreeNode::folder(
        "locked",
        locked.clone(),
        ExpandState::Collapsed,
        1,
    )));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(roots[0].aggregate_count(), Some(2));
    assert_eq!(labels(&children), vec!["ok", "a.svg"]);
    assert_eq!(children[0].aggregate_count(), Some(1));
    assert!(locked_children.is_empty());
}
