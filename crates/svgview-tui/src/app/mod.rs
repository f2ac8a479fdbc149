//! Main application state and logic.

mod render;
pub mod state;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};
use url::Url;

use svgview_core::{ImageFile, WorkspaceFolder};
use svgview_tree::{ImageTreeProvider, TreeChange};
use svgview_webview::{
    GalleryDocument, GalleryPanel, WebviewMessage, collect_images, dispatch,
    resolve_target,
};

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::host::SystemHost;
use crate::theme::Theme;
use crate::ui::{FileInfo, GallerySelection, ItemPresentation, TreeRow, TreeState};

use self::render::render_app;
use self::state::{AppMode, Notice, TreeModel};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Rows moved by page up/down.
const PAGE_SIZE: usize = 10;

/// Redraw interval when idle.
const TICK_INTERVAL_MS: u64 = 250;

/// File name of the rendered gallery page.
const GALLERY_FILE: &str = "gallery.html";

/// Main application state.
pub struct App {
    mode: AppMode,
    theme: Theme,
    provider: ImageTreeProvider,
    changes: broadcast::Receiver<TreeChange>,
    model: TreeModel,
    rows: Vec<TreeRow>,
    tree_state: TreeState,
    host: SystemHost,
    panel: GalleryPanel,
    gallery_dir: PathBuf,
    notice: Option<Notice>,
    needs_redraw: bool,
}

impl App {
    /// Create the application and load the root level of the tree.
    pub fn new(folders: Vec<WorkspaceFolder>, config: TuiConfig) -> AppResult<Self> {
        let document = GalleryDocument::builder()
            .asset_dir(config.settings.resolved_asset_dir())
            .locale(config.settings.locale.clone())
            .build()?;
        let roots: Vec<PathBuf> = folders.iter().map(|f| f.path.clone()).collect();

        let mut provider = ImageTreeProvider::new(folders);
        let changes = provider.subscribe();
        let model = TreeModel::load(&mut provider);
        let rows = model.rows();

        let notice = rows
            .is_empty()
            .then(|| Notice::Info("No images found in the workspace".to_string()));

        Ok(Self {
            mode: AppMode::Normal,
            theme: Theme::default(),
            provider,
            changes,
            model,
            rows,
            tree_state: TreeState::default(),
            host: SystemHost::deferred(config.settings.editor.clone()),
            panel: GalleryPanel::new(document, &roots),
            gallery_dir: config.gallery_dir,
            notice,
            needs_redraw: true,
        })
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    match event {
                        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                            self.handle_action(KeyAction::from_key_event(key_event));
                        }
                        Event::Resize(..) => {}
                        _ => continue,
                    }
                    self.needs_redraw = true;
                }

                change = self.changes.recv() => {
                    match change {
                        Ok(TreeChange::All) | Err(RecvError::Lagged(_)) => self.reload_tree(),
                        Err(RecvError::Closed) => {}
                    }
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {}
            }

            // Terminal editors need the terminal back while they run.
            if let Some(mut cmd) = self.host.take_pending() {
                ratatui::restore();
                let status = cmd.status();
                terminal = ratatui::init();

                match status {
                    Ok(status) if !status.success() => {
                        self.notice = Some(Notice::Error(format!("Editor exited with {status}")));
                    }
                    Err(e) => {
                        self.notice = Some(Notice::Error(format!("Unable to start editor: {e}")));
                    }
                    Ok(_) => {}
                }
                self.needs_redraw = true;
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let selection = self.gallery_selection();
        render_app(
            render::RenderContext {
                mode: self.mode,
                theme: &self.theme,
                rows: &self.rows,
                selected: self.tree_state.selected,
                total_images: self.total_images(),
                selection: selection.as_ref(),
                notice: self.notice.as_ref(),
            },
            &mut self.tree_state,
            frame.area(),
            frame.buffer_mut(),
        );
    }

    fn handle_action(&mut self, action: KeyAction) {
        if self.mode == AppMode::Help {
            if matches!(
                action,
                KeyAction::ToggleHelp | KeyAction::Cancel | KeyAction::Quit
            ) {
                self.mode = AppMode::Normal;
            } else if action == KeyAction::ForceQuit {
                self.mode = AppMode::Quit;
            }
            return;
        }

        let len = self.rows.len();
        match action {
            KeyAction::MoveUp => self.tree_state.move_up(1),
            KeyAction::MoveDown => self.tree_state.move_down(1, len),
            KeyAction::JumpToTop => self.tree_state.selected = 0,
            KeyAction::JumpToBottom => self.tree_state.jump_to_bottom(len),
            KeyAction::PageUp => self.tree_state.move_up(PAGE_SIZE),
            KeyAction::PageDown => self.tree_state.move_down(PAGE_SIZE, len),
            KeyAction::Expand => self.expand_selected(),
            KeyAction::Collapse => self.collapse_selected(),
            KeyAction::Activate => self.activate_selected(),
            KeyAction::Reveal => {
                if let Some(row) = self.selected_row() {
                    let path = row.node.node_path().to_path_buf();
                    self.send(WebviewMessage::Reveal { path });
                }
            }
            KeyAction::OpenGallery => self.open_gallery(),
            KeyAction::Refresh => {
                self.notice = Some(Notice::Info("Refreshing".to_string()));
                self.provider.refresh();
            }
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::Cancel => self.notice = None,
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::None => {}
        }
    }

    fn selected_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.tree_state.selected)
    }

    fn sync_rows(&mut self) {
        self.rows = self.model.rows();
        self.tree_state.clamp(self.rows.len());
    }

    fn reload_tree(&mut self) {
        debug!("reloading tree");
        self.model.reload(&mut self.provider);
        self.sync_rows();
        self.notice = None;
    }

    fn expand_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if !row.node.is_folder() {
            return;
        }
        if row.expanded {
            // Step onto the first child.
            self.tree_state.move_down(1, self.rows.len());
            return;
        }
        let node = row.node.clone();
        self.model.expand(&mut self.provider, &node);
        self.sync_rows();
    }

    fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.node.is_folder() && row.expanded {
            let path = row.node.node_path().to_path_buf();
            self.model.collapse(&path);
            self.sync_rows();
            return;
        }

        // Otherwise jump to the parent folder.
        let depth = row.depth;
        if depth == 0 {
            return;
        }
        if let Some(parent) = self.rows[..self.tree_state.selected]
            .iter()
            .rposition(|r| r.depth + 1 == depth)
        {
            self.tree_state.selected = parent;
        }
    }

    fn activate_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let path = row.node.node_path().to_path_buf();
        if ItemPresentation::from_node(&row.node).opens_document {
            self.send(WebviewMessage::OpenDocument { path });
        } else if row.expanded {
            self.model.collapse(&path);
            self.sync_rows();
        } else {
            self.expand_selected();
        }
    }

    /// Run a gallery action against the host and report failures.
    fn send(&mut self, message: WebviewMessage) {
        if let Err(e) = dispatch(&mut self.host, &message) {
            warn!(error = %e, "host action failed");
            self.notice = Some(Notice::Error(e.to_string()));
        }
    }

    /// Render the full gallery for the selection and open it in the browser.
    fn open_gallery(&mut self) {
        let selected = self
            .selected_row()
            .map(|row| row.node.node_path().to_path_buf());
        let result = resolve_target(selected.as_deref(), None, self.provider.workspace_folders())
            .and_then(|target| collect_images(&target).map(|images| (target, images)));

        let (target, images) = match result {
            Ok(found) => found,
            Err(e) => {
                self.notice = Some(if e.is_informational() {
                    Notice::Info(e.to_string())
                } else {
                    Notice::Error(e.to_string())
                });
                return;
            }
        };

        let count = images.len();
        self.panel.update_images(images, &target);

        let page = match self.write_gallery() {
            Ok(page) => page,
            Err(e) => {
                self.notice = Some(Notice::Error(format!("Unable to write gallery: {e}")));
                return;
            }
        };

        match Url::from_file_path(&page) {
            Ok(url) => {
                self.notice = Some(Notice::Info(format!("Opened gallery with {count} images")));
                self.send(WebviewMessage::OpenExternal {
                    url: url.to_string(),
                });
            }
            Err(()) => {
                self.notice = Some(Notice::Error(format!(
                    "Unable to address {}",
                    page.display()
                )));
            }
        }
    }

    fn write_gallery(&self) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.gallery_dir)?;
        let page = self.gallery_dir.join(GALLERY_FILE);
        std::fs::write(&page, self.panel.html())?;
        debug!(page = %page.display(), images = self.panel.images().len(), "wrote gallery");
        Ok(page)
    }

    /// Images shown in the side panel for the selected row.
    fn gallery_selection(&self) -> Option<GallerySelection> {
        let node = &self.selected_row()?.node;
        let path = node.node_path();

        let (folder, file) = if node.is_folder() {
            (path.to_path_buf(), None)
        } else {
            let info = FileInfo {
                image: ImageFile::from_path(path)?,
                size: std::fs::metadata(path).ok().map(|m| m.len()),
            };
            (path.parent().map(Path::to_path_buf)?, Some(info))
        };

        let images = self.provider.images_for_path(&folder).to_vec();
        Some(GallerySelection {
            folder,
            images,
            file,
        })
    }

    fn total_images(&self) -> usize {
        self.model
            .roots()
            .iter()
            .filter_map(|node| node.aggregate_count())
            .sum()
    }
}
