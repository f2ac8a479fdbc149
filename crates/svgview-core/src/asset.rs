//! Image asset descriptors and the extension allow-list.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// File extensions recognized as graphic assets (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "gif", "webp", "ico", "bmp"];

/// Extension that marks an asset as vector.
const VECTOR_EXTENSION: &str = "svg";

/// Check whether a path names a supported graphic asset.
///
/// The comparison is case-insensitive on the final extension only, so
/// `logo.SVG` matches and `archive.png.bak` does not.
pub fn is_supported_asset(path: &Path) -> bool {
    asset_extension(path).is_some()
}

/// Lowercased extension of `path` if it is on the allow-list.
fn asset_extension(path: &Path) -> Option<CompactString> {
    let ext = path.extension().and_then(OsStr::to_str)?.to_lowercase();
    IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then(|| CompactString::from(ext))
}

/// Kind of graphic asset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum AssetKind {
    /// Scalable vector graphic (`.svg`).
    #[serde(rename = "svg")]
    #[strum(serialize = "svg")]
    Vector,
    /// Any other supported bitmap format.
    #[serde(rename = "image")]
    #[strum(serialize = "image")]
    Raster,
}

impl AssetKind {
    /// Classify a lowercase extension.
    pub fn from_extension(extension: &str) -> Self {
        if extension == VECTOR_EXTENSION {
            Self::Vector
        } else {
            Self::Raster
        }
    }

    /// Check if this is a vector asset.
    pub fn is_vector(self) -> bool {
        self == Self::Vector
    }
}

/// One discovered graphic asset.
///
/// Descriptors are built from a path and never updated in place; a rescan
/// produces new instances. The JSON shape is the payload the gallery bundle
/// reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Base file name.
    pub name: CompactString,
    /// Absolute path, the identity of the asset.
    pub path: PathBuf,
    /// Locator handed to the render boundary. Equal to `path` until rewritten.
    pub uri: String,
    /// Vector or raster.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Lowercase extension without the leading dot.
    pub extension: CompactString,
}

impl ImageFile {
    /// Build a descriptor for `path`, or `None` if it is not a supported asset.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let extension = asset_extension(&path)?;
        let name = path
            .file_name()
            .map(|n| CompactString::from(n.to_string_lossy()))
            .unwrap_or_default();

        Some(Self {
            name,
            uri: path.to_string_lossy().into_owned(),
            kind: AssetKind::from_extension(&extension),
            extension,
            path,
        })
    }

    /// Return a copy with `uri` replaced, all other fields untouched.
    pub fn with_uri(&self, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..self.clone()
        }
    }

    /// Check if this is a vector asset.
    pub fn is_vector(&self) -> bool {
        self.kind.is_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_any_case() {
        for ext in IMAGE_EXTENSIONS {
            assert!(is_supported_asset(Path::new(&format!("/a/b.{ext}"))));
            let upper = ext.to_uppercase();
            assert!(is_supported_asset(Path::new(&format!("/a/b.{upper}"))));
        }
    }

    #[test]
    fn test_unsupported_extensions() {
        assert!(!is_supported_asset(Path::new("/a/readme.md")));
        assert!(!is_supported_asset(Path::new("/a/photo.tiff")));
        assert!(!is_supported_asset(Path::new("/a/icon.png.bak")));
        assert!(!is_supported_asset(Path::new("/a/Makefile")));
        assert!(!is_supported_asset(Path::new("/a/.png")));
    }

    #[test]
    fn test_descriptor_from_path() {
        let image = ImageFile::from_path("/assets/Logo.SVG").unwrap();
        assert_eq!(image.name, "Logo.SVG");
        assert_eq!(image.extension, "svg");
        assert_eq!(image.kind, AssetKind::Vector);
        assert_eq!(image.uri, "/assets/Logo.SVG");
        assert_eq!(image.path, PathBuf::from("/assets/Logo.SVG"));
    }

    #[test]
    fn test_raster_kind() {
        let image = ImageFile::from_path("/assets/photo.jpeg").unwrap();
        assert_eq!(image.kind, AssetKind::Raster);
        assert!(!image.is_vector());
    }

    #[test]
    fn test_non_asset_has_no_descriptor() {
        assert!(ImageFile::from_path("/assets/notes.txt").is_none());
    }

    #[test]
    fn test_with_uri_only_touches_uri() {
        let image = ImageFile::from_path("/assets/a.png").unwrap();
        let rewritten = image.with_uri("file:///assets/a.png");
        assert_eq!(rewritten.uri, "file:///assets/a.png");
        assert_eq!(rewritten.name, image.name);
        assert_eq!(rewritten.path, image.path);
        assert_eq!(rewritten.kind, image.kind);
        assert_eq!(rewritten.extension, image.extension);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AssetKind::Vector.to_string(), "svg");
        assert_eq!(AssetKind::Raster.as_ref(), "image");
    }
}
