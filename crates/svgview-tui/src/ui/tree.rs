//! Image tree widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};

use svgview_core::{AssetKind, NodeKind, TreeNode};

use crate::theme::Theme;

/// How a tree node is shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPresentation {
    pub label: String,
    /// "N images" for folders, the uppercase extension for files.
    pub description: String,
    pub tooltip: String,
    pub icon: &'static str,
    /// Asset kind of a file, `None` for folders.
    pub kind: Option<AssetKind>,
    /// Whether activating the item opens it as a document.
    pub opens_document: bool,
}

impl ItemPresentation {
    /// Describe `node` for display.
    pub fn from_node(node: &TreeNode) -> Self {
        let path = node.node_path();
        let tooltip = path.display().to_string();
        let label = node.label().to_string();

        match node.node_kind() {
            NodeKind::Folder => Self {
                label,
                description: match node.aggregate_count() {
                    Some(count) if count > 0 => format!("{count} images"),
                    _ => String::new(),
                },
                tooltip,
                icon: "▣",
                kind: None,
                opens_document: false,
            },
            NodeKind::File => {
                let extension = path
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                let kind = AssetKind::from_extension(&extension);
                let icon = if kind.is_vector() { "◇" } else { "▪" };
                Self {
                    label,
                    description: extension.to_uppercase(),
                    tooltip,
                    icon,
                    kind: Some(kind),
                    opens_document: true,
                }
            }
        }
    }
}

/// A flattened visible row of the tree.
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub node: TreeNode,
    pub depth: usize,
    pub expanded: bool,
    pub is_last_sibling: bool,
    pub parent_last_siblings: Vec<bool>,
}

/// Selection and scroll state for the tree view.
#[derive(Debug, Default, Clone)]
pub struct TreeState {
    /// Currently selected row.
    pub selected: usize,
    /// Scroll offset.
    pub offset: usize,
}

impl TreeState {
    /// Move selection up.
    pub fn move_up(&mut self, count: usize) {
        self.selected = self.selected.saturating_sub(count);
    }

    /// Move selection down.
    pub fn move_down(&mut self, count: usize, max: usize) {
        self.selected = (self.selected + count).min(max.saturating_sub(1));
    }

    /// Jump to bottom.
    pub fn jump_to_bottom(&mut self, max: usize) {
        self.selected = max.saturating_sub(1);
    }

    /// Keep the selection inside `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Ensure selected item is visible, adjusting offset if needed.
    pub fn ensure_visible(&mut self, viewport_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + viewport_height {
            self.offset = self.selected - viewport_height + 1;
        }
    }
}

/// Tree view widget.
pub struct TreeView<'a> {
    rows: &'a [TreeRow],
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> TreeView<'a> {
    /// Create a new tree view.
    pub fn new(rows: &'a [TreeRow], theme: &'a Theme) -> Self {
        Self {
            rows,
            theme,
            block: None,
        }
    }

    /// Set the block (border) for the widget.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn row_line(&self, row: &TreeRow) -> Line<'static> {
        let presentation = ItemPresentation::from_node(&row.node);

        let mut prefix = String::new();
        for &parent_is_last in &row.parent_last_siblings {
            prefix.push_str(if parent_is_last { "  " } else { "│ " });
        }
        if row.depth > 0 {
            prefix.push_str(if row.is_last_sibling { "└─" } else { "├─" });
        }

        let expand_indicator = match (row.node.is_folder(), row.expanded) {
            (true, true) => "▼ ",
            (true, false) => "▶ ",
            (false, _) => "  ",
        };

        let name_style = match presentation.kind {
            None => self.theme.folder,
            Some(AssetKind::Vector) => self.theme.vector,
            Some(AssetKind::Raster) => self.theme.raster,
        };

        Line::from(vec![
            Span::styled(prefix, Style::default().fg(self.theme.muted)),
            Span::styled(expand_indicator, Style::default().fg(self.theme.muted)),
            Span::styled(format!("{} ", presentation.icon), name_style),
            Span::styled(presentation.label, name_style),
            Span::styled(format!("  {}", presentation.description), self.theme.description),
        ])
    }
}

impl StatefulWidget for TreeView<'_> {
    type State = TreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let viewport_height = inner_area.height as usize;
        state.ensure_visible(viewport_height);

        let start = state.offset;
        let end = (start + viewport_height).min(self.rows.len());

        for (row_idx, item_idx) in (start..end).enumerate() {
            let row = &self.rows[item_idx];
            let y = inner_area.y + row_idx as u16;

            let line = self.row_line(row);
            let line = if item_idx == state.selected {
                line.style(self.theme.selected)
            } else {
                line
            };

            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }
    }
}
