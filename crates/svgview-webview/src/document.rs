//! Gallery HTML document.

use std::fmt::Write as _;
use std::path::PathBuf;

use derive_builder::Builder;
use rand::Rng;
use rand::distributions::Alphanumeric;

use svgview_core::ImageFile;

use crate::boundary::{RenderBoundary, with_render_uris};

/// Length of the per-render script nonce.
pub const NONCE_LEN: usize = 32;

/// Generate a fresh nonce of [`NONCE_LEN`] ASCII letters and digits.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Settings for rendering the gallery page.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GalleryDocument {
    /// Directory holding the gallery bundle (`webview/index.js`, `webview/index.css`).
    pub asset_dir: PathBuf,

    /// Locale handed to the bundle.
    #[builder(default = "\"en\".to_string()")]
    pub locale: String,
}

impl GalleryDocumentBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.asset_dir {
            Some(dir) if dir.as_os_str().is_empty() => {
                Err("Asset directory cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Asset directory is required".to_string()),
        }
    }
}

impl GalleryDocument {
    /// Create a new document builder.
    pub fn builder() -> GalleryDocumentBuilder {
        GalleryDocumentBuilder::default()
    }

    /// Path of the bundle script.
    pub fn script_path(&self) -> PathBuf {
        self.asset_dir.join("webview").join("index.js")
    }

    /// Path of the bundle stylesheet.
    pub fn style_path(&self) -> PathBuf {
        self.asset_dir.join("webview").join("index.css")
    }

    /// Render the page for `images` with a fresh nonce.
    pub fn render<B>(&self, boundary: &B, images: &[ImageFile], target_name: &str) -> String
    where
        B: RenderBoundary + ?Sized,
    {
        self.render_with_nonce(boundary, images, target_name, &generate_nonce())
    }

    /// Render the page with a caller-supplied nonce.
    pub fn render_with_nonce<B>(
        &self,
        boundary: &B,
        images: &[ImageFile],
        target_name: &str,
        nonce: &str,
    ) -> String
    where
        B: RenderBoundary + ?Sized,
    {
        let payload = with_render_uris(images, boundary);
        let csp = boundary.csp_source();
        let script_uri = boundary.to_addressable_uri(&self.script_path());
        let style_uri = boundary.to_addressable_uri(&self.style_path());

        // Serializing plain strings and descriptors cannot fail.
        let images_json = serde_json::to_string(&payload).unwrap_or_else(|_| "[]".to_string());
        let locale_json =
            serde_json::to_string(&self.locale).unwrap_or_else(|_| "\"en\"".to_string());

        let mut html = String::with_capacity(2048 + payload.len() * 256);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(
            html,
            "  <meta http-equiv=\"Content-Security-Policy\" content=\"{}\">",
            escape_html(&content_security_policy(&csp, nonce))
        );
        let _ = writeln!(html, "  <link rel=\"stylesheet\" href=\"{}\">", escape_html(&style_uri));
        let _ = writeln!(html, "  <title>Image Viewer - {}</title>", escape_html(target_name));
        html.push_str("</head>\n<body>\n  <div id=\"root\">\n");

        for image in &payload {
            let _ = writeln!(
                html,
                "    <figure class=\"svgview-card\" data-kind=\"{kind}\"><img src=\"{src}\" alt=\"{name}\" loading=\"lazy\"><figcaption>{name}</figcaption></figure>",
                kind = image.kind,
                src = escape_html(&image.uri),
                name = escape_html(&image.name),
            );
        }

        html.push_str("  </div>\n");
        let _ = writeln!(html, "  <script nonce=\"{nonce}\">");
        let _ = writeln!(html, "    window.__IMAGES__ = {};", escape_script(&images_json));
        let _ = writeln!(html, "    window.__LOCALE__ = {};", escape_script(&locale_json));
        html.push_str("  </script>\n");
        let _ = writeln!(
            html,
            "  <script nonce=\"{nonce}\" src=\"{}\"></script>",
            escape_html(&script_uri)
        );
        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Policy allowing only boundary resources, image schemes and nonce-gated scripts.
fn content_security_policy(csp_source: &str, nonce: &str) -> String {
    format!(
        "default-src 'none'; style-src {csp_source} 'unsafe-inline'; script-src 'nonce-{nonce}'; img-src {csp_source} data: https:; font-src {csp_source};"
    )
}

/// Keep embedded JSON from closing the script element or ending a
/// statement early in engines that treat line separators as newlines.
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
