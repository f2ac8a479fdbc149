//! Terminal image browser for svgview.
//!
//! Shows the workspace folders as a lazily expanded tree of the image and
//! SVG assets they contain, with a side panel listing the images of the
//! selected folder. Files open in the user's editor, and the full gallery
//! page is rendered to disk and opened in the browser.
//!
//! # Usage
//!
//! ```rust,no_run
//! use svgview_core::WorkspaceFolder;
//! use svgview_tui::{TuiConfig, UserSettings};
//!
//! let config = TuiConfig::new(UserSettings::load());
//! svgview_tui::run(vec![WorkspaceFolder::new("/path/to/site")], config).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `h`/`l` - Collapse/expand folders
//! - `Enter` - Open file or toggle folder
//! - `r` - Reveal in file browser
//! - `p` - Open gallery page
//! - `R` - Refresh
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod host;
mod settings;
mod theme;
mod ui;

use std::path::PathBuf;

pub use app::{App, AppResult};
pub use host::SystemHost;
pub use settings::{UserSettings, cache_dir};
pub use theme::Theme;
pub use ui::ItemPresentation;

use svgview_core::WorkspaceFolder;

/// Configuration for the TUI.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    pub settings: UserSettings,
    /// Directory the gallery page is written to.
    pub gallery_dir: PathBuf,
}

impl TuiConfig {
    /// Config writing galleries to the cache directory.
    pub fn new(settings: UserSettings) -> Self {
        Self {
            settings,
            gallery_dir: cache_dir(),
        }
    }
}

/// Run the TUI application.
pub fn run(folders: Vec<WorkspaceFolder>, config: TuiConfig) -> AppResult<()> {
    let app = App::new(folders, config)?;

    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
