//! Path to locator conversion for the gallery surface.

use std::path::{Path, PathBuf};

use tracing::warn;
use url::Url;

use svgview_core::ImageFile;

/// The surface that displays the gallery.
pub trait RenderBoundary {
    /// Convert a local path into a locator the gallery may load.
    fn to_addressable_uri(&self, path: &Path) -> String;

    /// Source expression the content-security policy grants to local resources.
    fn csp_source(&self) -> String;
}

/// Rewrite `uri` of every descriptor through `boundary`.
///
/// Only `uri` changes; name, path, kind and extension are carried over as is.
pub fn with_render_uris<B>(images: &[ImageFile], boundary: &B) -> Vec<ImageFile>
where
    B: RenderBoundary + ?Sized,
{
    images
        .iter()
        .map(|image| image.with_uri(boundary.to_addressable_uri(&image.path)))
        .collect()
}

/// Boundary serving `file://` locators from an allow-list of local roots.
#[derive(Debug, Clone, Default)]
pub struct LocalResourceBoundary {
    roots: Vec<PathBuf>,
}

impl LocalResourceBoundary {
    /// Create a boundary allowing the given roots.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut boundary = Self::default();
        for root in roots {
            boundary.add_root(root);
        }
        boundary
    }

    /// Allow another root. Relative roots resolve against the working
    /// directory, and duplicates are ignored.
    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        let root = absolute(&root.into());
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    /// Allowed local resource roots.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Check if `path` lies under one of the allowed roots.
    pub fn allows(&self, path: &Path) -> bool {
        let path = absolute(path);
        self.roots.iter().any(|root| path.starts_with(root))
    }
}

/// Resolve `path` against the working directory without touching the filesystem.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl RenderBoundary for LocalResourceBoundary {
    fn to_addressable_uri(&self, path: &Path) -> String {
        let path = absolute(path);
        if !self.allows(&path) {
            warn!(path = %path.display(), "resource outside the allowed roots");
        }
        // The empty authority keeps the first path segment from reading as a host.
        Url::from_file_path(&path).map(String::from).unwrap_or_else(|()| {
            format!("file:///{}", path.to_string_lossy().trim_start_matches('/'))
        })
    }

    fn csp_source(&self) -> String {
        "file:".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url() {
        let boundary = LocalResourceBoundary::new(["/ws"]);
        assert_eq!(
            boundary.to_addressable_uri(Path::new("/ws/my icons/a.svg")),
            "file:///ws/my%20icons/a.svg"
        );
    }

    #[test]
    fn test_relative_path_resolves_against_working_dir() {
        let boundary = LocalResourceBoundary::new(["rel"]);
        let uri = boundary.to_addressable_uri(Path::new("rel/a.png"));

        let expected = std::env::current_dir().unwrap().join("rel/a.png");
        assert_eq!(uri, Url::from_file_path(&expected).unwrap().as_str());
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("/rel/a.png"));
        assert!(boundary.allows(&expected));
    }

    #[test]
    fn test_allows() {
        let mut boundary = LocalResourceBoundary::new(["/opt/svgview"]);
        assert!(!boundary.allows(Path::new("/ws/a.svg")));

        boundary.add_root("/ws");
        boundary.add_root("/ws");
        assert_eq!(boundary.roots().len(), 2);
        assert!(boundary.allows(Path::new("/ws/a.svg")));
        assert!(!boundary.allows(Path::new("/wsx/a.svg")));
    }

    #[test]
    fn test_rewrite_preserves_other_fields() {
        let images = vec![
            ImageFile::from_path("/ws/a.svg").unwrap(),
            ImageFile::from_path("/ws/b.png").unwrap(),
        ];
        let boundary = LocalResourceBoundary::new(["/ws"]);
        let rewritten = with_render_uris(&images, &boundary);

        for (before, after) in images.iter().zip(&rewritten) {
            assert_eq!(after.name, before.name);
            assert_eq!(after.path, before.path);
            assert_eq!(after.kind, before.kind);
            assert_eq!(after.extension, before.extension);
            assert!(after.uri.starts_with("file:///ws/"));
        }
    }
}
