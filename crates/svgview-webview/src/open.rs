//! Choosing what the full viewer shows.

use std::path::{Path, PathBuf};

use thiserror::Error;

use svgview_core::{ImageFile, ScanError, WorkspaceFolder};
use svgview_scan::scan_directory;

/// Reasons the full viewer has nothing to show.
#[derive(Debug, Error)]
pub enum OpenError {
    /// No explicit target, no active document and no workspace folder.
    #[error("No file or folder selected")]
    NoSelection,

    /// The target was scanned but holds no assets.
    #[error("No images found in the selected location: {}", path.display())]
    NoMatches { path: PathBuf },

    /// The flat scan could not read the target.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl OpenError {
    /// Check if this should be shown as information rather than as an error.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NoSelection | Self::NoMatches { .. })
    }
}

/// Pick the viewer target: explicit path, then active document, then the
/// first workspace folder.
pub fn resolve_target(
    explicit: Option<&Path>,
    active_document: Option<&Path>,
    workspace_folders: &[WorkspaceFolder],
) -> Result<PathBuf, OpenError> {
    explicit
        .or(active_document)
        .map(Path::to_path_buf)
        .or_else(|| workspace_folders.first().map(|folder| folder.path.clone()))
        .ok_or(OpenError::NoSelection)
}

/// Assets to show for `target`: the flat scan of a directory, or the file
/// itself if it is an asset.
pub fn collect_images(target: &Path) -> Result<Vec<ImageFile>, OpenError> {
    let images = scan_directory(target)?;
    if images.is_empty() {
        return Err(OpenError::NoMatches {
            path: target.to_path_buf(),
        });
    }
    Ok(images)
}

/// Display name of a viewer target.
pub fn panel_title(target: &Path) -> String {
    target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        let folders = vec![WorkspaceFolder::new("/ws")];
        let explicit = Path::new("/ws/icons");
        let active = Path::new("/ws/doc.svg");

        assert_eq!(
            resolve_target(Some(explicit), Some(active), &folders).unwrap(),
            PathBuf::from("/ws/icons")
        );
        assert_eq!(
            resolve_target(None, Some(active), &folders).unwrap(),
            PathBuf::from("/ws/doc.svg")
        );
        assert_eq!(resolve_target(None, None, &folders).unwrap(), PathBuf::from("/ws"));
    }

    #[test]
    fn test_no_selection() {
        let err = resolve_target(None, None, &[]).unwrap_err();
        assert!(matches!(err, OpenError::NoSelection));
        assert!(err.is_informational());
    }

    #[test]
    fn test_panel_title() {
        assert_eq!(panel_title(Path::new("/ws/icons")), "icons");
        assert_eq!(panel_title(Path::new("/")), "/");
    }
}
