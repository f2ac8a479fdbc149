//! Long-lived gallery panel.

use std::path::{Path, PathBuf};

use svgview_core::ImageFile;

use crate::boundary::LocalResourceBoundary;
use crate::document::GalleryDocument;
use crate::open::panel_title;

/// A gallery surface that is re-rendered whenever its image set changes.
///
/// The asset directory is always an allowed resource root. Every browsed
/// root passed to [`GalleryPanel::update_images`] is added as well.
#[derive(Debug, Clone)]
pub struct GalleryPanel {
    document: GalleryDocument,
    boundary: LocalResourceBoundary,
    images: Vec<ImageFile>,
    title: String,
    html: String,
}

impl GalleryPanel {
    /// Create an empty panel.
    pub fn new(document: GalleryDocument, workspace_roots: &[PathBuf]) -> Self {
        let mut boundary = LocalResourceBoundary::new([document.asset_dir.clone()]);
        for root in workspace_roots {
            boundary.add_root(root.clone());
        }

        let mut panel = Self {
            document,
            boundary,
            images: Vec::new(),
            title: String::new(),
            html: String::new(),
        };
        panel.render();
        panel
    }

    /// Show `images` browsed from `root`.
    pub fn update_images(&mut self, images: Vec<ImageFile>, root: &Path) {
        self.boundary.add_root(root);
        self.images = images;
        self.title = panel_title(root);
        self.render();
    }

    /// Current image set.
    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    /// Current page.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Boundary the page was rendered against.
    pub fn boundary(&self) -> &LocalResourceBoundary {
        &self.boundary
    }

    fn render(&mut self) {
        self.html = self.document.render(&self.boundary, &self.images, &self.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> GalleryDocument {
        GalleryDocument::builder().asset_dir("/opt/svgview").build().unwrap()
    }

    #[test]
    fn test_new_panel_is_empty() {
        let panel = GalleryPanel::new(document(), &[PathBuf::from("/ws")]);
        assert!(panel.images().is_empty());
        assert!(panel.html().contains("window.__IMAGES__ = [];"));
        assert!(panel.boundary().allows(Path::new("/opt/svgview/webview/index.js")));
        assert!(panel.boundary().allows(Path::new("/ws/a.svg")));
    }

    #[test]
    fn test_update_images_adds_root() {
        let mut panel = GalleryPanel::new(document(), &[]);
        let images = vec![ImageFile::from_path("/elsewhere/x.png").unwrap()];

        panel.update_images(images, Path::new("/elsewhere"));

        assert_eq!(panel.images().len(), 1);
        assert!(panel.boundary().allows(Path::new("/elsewhere/x.png")));
        assert!(panel.html().contains("file:///elsewhere/x.png"));
        assert!(panel.html().contains("<title>Image Viewer - elsewhere</title>"));
    }
}
