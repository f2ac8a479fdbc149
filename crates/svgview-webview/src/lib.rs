//! Render boundary for svgview.
//!
//! This crate sits between the core and whatever surface displays the
//! gallery:
//!
//! - **Addressable URIs** - [`RenderBoundary`] turns local paths into
//!   locators the sandboxed gallery may load, and [`with_render_uris`]
//!   rewrites a descriptor set with them.
//! - **Gallery document** - [`GalleryDocument`] renders the HTML page under a
//!   content-security policy gated by a fresh nonce.
//! - **Action messages** - [`WebviewMessage`] is the closed set of commands
//!   the gallery sends back, and [`dispatch`] routes them to a
//!   [`HostActions`] implementation.
//! - **Open flow** - [`resolve_target`] and [`collect_images`] pick what to
//!   show and report "no selection" and "no matches" distinctly.
//!
//! ```rust,no_run
//! use svgview_webview::{GalleryDocument, LocalResourceBoundary, collect_images};
//!
//! let images = collect_images("/work/site/icons".as_ref()).unwrap();
//! let boundary = LocalResourceBoundary::new(["/opt/svgview", "/work/site/icons"]);
//! let document = GalleryDocument::builder().asset_dir("/opt/svgview").build().unwrap();
//! let html = document.render(&boundary, &images, "icons");
//! ```

mod boundary;
mod document;
mod message;
mod open;
mod panel;

pub use boundary::{LocalResourceBoundary, RenderBoundary, with_render_uris};
pub use document::{GalleryDocument, GalleryDocumentBuilder, NONCE_LEN, generate_nonce};
pub use message::{ActionError, Dispatch, HostActions, WebviewMessage, dispatch, handle_raw};
pub use open::{OpenError, collect_images, panel_title, resolve_target};
pub use panel::GalleryPanel;
