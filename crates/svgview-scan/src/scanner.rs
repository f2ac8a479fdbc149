//! JWalk-based serial directory scanner.

use std::path::Path;

use jwalk::{DirEntry, Parallelism, WalkDir};
use tracing::{debug, trace};

use svgview_core::{ImageFile, ScanError, is_excluded_dir};

/// Collect every asset below `root`, at any depth, with no exclusions.
///
/// Hidden and dependency directories are walked like any other. The first
/// directory that cannot be read, including a missing root, aborts the scan.
/// If `root` is itself an asset file, it is the only result.
pub fn scan_directory(root: impl AsRef<Path>) -> Result<Vec<ImageFile>, ScanError> {
    let root = root.as_ref();
    let metadata = std::fs::metadata(root).map_err(|e| ScanError::io(root, e))?;

    if !metadata.is_dir() {
        return Ok(ImageFile::from_path(root).into_iter().collect());
    }

    let images = collect_strict(root, walker(root))?;
    debug!(root = %root.display(), matches = images.len(), "flat scan complete");
    Ok(images)
}

/// Drain `walker`, failing on the first entry or directory listing that errors.
///
/// jwalk reports a directory it could not list on that directory's own
/// entry rather than as an `Err` item, so both have to be checked.
fn collect_strict(root: &Path, walker: WalkDir) -> Result<Vec<ImageFile>, ScanError> {
    let mut images = Vec::new();
    for entry_result in walker {
        let mut entry = entry_result.map_err(|err| walk_error(root, err))?;
        if let Some(err) = entry.read_children_error.take() {
            return Err(walk_error(root, err));
        }
        if let Some(image) = asset_from_entry(&entry) {
            images.push(image);
        }
    }
    Ok(images)
}

/// Collect the assets shown in the browsing tree below `root`.
///
/// Directories excluded by [`is_excluded_dir`] are not entered. Read
/// failures anywhere, the root included, are swallowed: that branch
/// contributes zero assets.
pub fn scan_for_tree(root: impl AsRef<Path>) -> Vec<ImageFile> {
    let root = root.as_ref();

    let walker = walker(root).process_read_dir(|depth, _path, _state, children| {
        // The root itself arrives with no depth and is always walked.
        if depth.is_none() {
            return;
        }
        children.retain(|entry| match entry {
            Ok(entry) => {
                !(entry.file_type().is_dir() && is_excluded_dir(&entry.file_name().to_string_lossy()))
            }
            Err(_) => true,
        });
    });

    let mut images = Vec::new();
    for entry_result in walker {
        match entry_result {
            Ok(mut entry) => {
                if let Some(err) = entry.read_children_error.take() {
                    trace!(path = %entry.path().display(), error = %err, "skipping unreadable folder");
                }
                if let Some(image) = asset_from_entry(&entry) {
                    images.push(image);
                }
            }
            Err(err) => {
                trace!(root = %root.display(), error = %err, "skipping unreadable branch");
            }
        }
    }

    debug!(root = %root.display(), matches = images.len(), "tree scan complete");
    images
}

/// Number of assets the browsing tree shows below `folder`.
pub fn count_images(folder: impl AsRef<Path>) -> usize {
    scan_for_tree(folder).len()
}

/// Serial, sorted, symlink-agnostic walker shared by both scans.
fn walker(root: &Path) -> WalkDir {
    WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
}

fn asset_from_entry(entry: &DirEntry<((), ())>) -> Option<ImageFile> {
    if entry.file_type().is_file() {
        ImageFile::from_path(entry.path())
    } else {
        None
    }
}

fn walk_error(root: &Path, err: jwalk::Error) -> ScanError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    match err.io_error() {
        Some(io) => ScanError::io(path, std::io::Error::new(io.kind(), io.to_string())),
        None => ScanError::Other {
            path,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("sub/.hidden")).unwrap();
        fs::create_dir_all(root.join("node_modules")).unwrap();

        fs::write(root.join("a.svg"), "<svg/>").unwrap();
        fs::write(root.join("sub/b.png"), "png").unwrap();
        fs::write(root.join("sub/.hidden/c.svg"), "<svg/>").unwrap();
        fs::write(root.join("node_modules/d.svg"), "<svg/>").unwrap();
        fs::write(root.join("readme.md"), "docs").unwrap();

        temp
    }

    fn names(images: &[ImageFile]) -> Vec<String> {
        let mut names: Vec<String> = images.iter().map(|i| i.name.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_flat_scan_has_no_exclusions() {
        let temp = create_test_tree();
        let images = scan_directory(temp.path()).unwrap();
        assert_eq!(names(&images), vec!["a.svg", "b.png", "c.svg", "d.svg"]);
    }

    #[test]
    fn test_tree_scan_skips_hidden_and_dependency_dirs() {
        let temp = create_test_tree();
        let images = scan_for_tree(temp.path());
        assert_eq!(names(&images), vec!["a.svg", "b.png"]);
    }

    #[test]
    fn test_tree_scan_keeps_hidden_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".badge.png"), "png").unwrap();
        assert_eq!(names(&scan_for_tree(temp.path())), vec![".badge.png"]);
    }

    #[test]
    fn test_count_matches_tree_scan() {
        let temp = create_test_tree();
        assert_eq!(count_images(temp.path()), 2);
        assert_eq!(count_images(temp.path().join("sub")), 1);
        assert_eq!(count_images(temp.path().join("node_modules")), 1);
    }

    #[test]
    fn test_flat_scan_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let err = scan_directory(temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_tree_scan_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(scan_for_tree(temp.path().join("missing")).is_empty());
    }

    /// Walker that deletes `sub` after the root is listed, before jwalk descends into it.
    fn walker_losing_sub(root: &Path) -> WalkDir {
        walker(root).process_read_dir(|depth, path, _state, _children| {
            if depth == Some(0) {
                let _ = fs::remove_dir_all(path.join("sub"));
            }
        })
    }

    #[test]
    fn test_strict_walk_fails_on_unlistable_folder() {
        let temp = create_test_tree();
        let err = collect_strict(temp.path(), walker_losing_sub(temp.path())).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
        assert_eq!(err.path(), temp.path().join("sub"));
    }

    #[test]
    fn test_strict_walk_succeeds_when_all_listable() {
        let temp = create_test_tree();
        let images = collect_strict(temp.path(), walker(temp.path())).unwrap();
        assert_eq!(images.len(), 4);
    }

    #[test]
    fn test_flat_scan_of_single_file() {
        let temp = create_test_tree();
        let images = scan_directory(temp.path().join("a.svg")).unwrap();
        assert_eq!(names(&images), vec!["a.svg"]);

        let none = scan_directory(temp.path().join("readme.md")).unwrap();
        assert!(none.is_empty());
    }
}
