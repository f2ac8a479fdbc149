//! Gallery side panel.

use std::path::PathBuf;

use itertools::Itertools;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use svgview_core::{AssetKind, ImageFile};

use crate::theme::Theme;
use crate::ui::format_size;

/// Details of the selected asset file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub image: ImageFile,
    /// Size on disk, if it could be read.
    pub size: Option<u64>,
}

/// What the side panel shows for the current selection.
#[derive(Debug, Clone)]
pub struct GallerySelection {
    /// Folder whose images are listed.
    pub folder: PathBuf,
    pub images: Vec<ImageFile>,
    pub file: Option<FileInfo>,
}

/// Side panel listing the images of the selected folder.
pub struct GalleryView<'a> {
    selection: Option<&'a GallerySelection>,
    theme: &'a Theme,
}

impl<'a> GalleryView<'a> {
    pub fn new(selection: Option<&'a GallerySelection>, theme: &'a Theme) -> Self {
        Self { selection, theme }
    }

    fn field(&self, name: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{name:<6}"), Style::default().fg(self.theme.muted)),
            Span::styled(value, Style::default().fg(self.theme.foreground)),
        ])
    }

    fn lines(&self, selection: &GallerySelection) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(info) = &selection.file {
            lines.push(Line::from(Span::styled(
                info.image.name.to_string(),
                self.theme.title,
            )));
            lines.push(self.field("Kind", info.image.kind.to_string()));
            lines.push(self.field("Type", info.image.extension.to_uppercase().to_string()));
            lines.push(self.field(
                "Size",
                info.size.map(format_size).unwrap_or_else(|| "-".to_string()),
            ));
            lines.push(self.field("Path", info.image.path.display().to_string()));
            lines.push(Line::default());
        }

        let counts = selection.images.iter().counts_by(|image| image.kind);
        let vectors = counts.get(&AssetKind::Vector).copied().unwrap_or(0);
        let rasters = counts.get(&AssetKind::Raster).copied().unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!("{} images", selection.images.len()),
            Style::default()
                .fg(self.theme.info)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(self.field("svg", vectors.to_string()));
        lines.push(self.field("image", rasters.to_string()));
        lines.push(Line::default());

        for image in &selection.images {
            let style = if image.is_vector() {
                self.theme.vector
            } else {
                self.theme.raster
            };
            let relative = image
                .path
                .strip_prefix(&selection.folder)
                .unwrap_or(&image.path)
                .display()
                .to_string();
            lines.push(Line::from(Span::styled(relative, style)));
        }

        lines
    }
}

impl Widget for GalleryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = self
            .selection
            .and_then(|s| s.folder.file_name())
            .map(|n| format!(" {} ", n.to_string_lossy()))
            .unwrap_or_else(|| " Gallery ".to_string());

        let block = Block::default()
            .title(title)
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let lines = match self.selection {
            Some(selection) => self.lines(selection),
            None => vec![Line::from(Span::styled(
                "Nothing selected",
                Style::default().fg(self.theme.muted),
            ))],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
