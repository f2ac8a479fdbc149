//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};

use crate::theme::Theme;
use crate::ui::{
    AppLayout, GallerySelection, GalleryView, HelpOverlay, ItemPresentation, TreeRow, TreeState,
    TreeView,
};

use super::state::{AppMode, Notice};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub theme: &'a Theme,
    pub rows: &'a [TreeRow],
    /// Index of the selected row.
    pub selected: usize,
    pub total_images: usize,
    pub selection: Option<&'a GallerySelection>,
    pub notice: Option<&'a Notice>,
}

/// Main render function for the application.
pub fn render_app(ctx: RenderContext, tree_state: &mut TreeState, area: Rect, buf: &mut Buffer) {
    let layout = AppLayout::new(area);

    render_header(&ctx, layout.header, buf);

    let block = Block::default()
        .title(" Images ")
        .title_style(ctx.theme.title)
        .borders(Borders::ALL)
        .border_style(ctx.theme.border);

    if ctx.rows.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No images in the workspace",
            Style::default().fg(ctx.theme.muted),
        )))
        .block(block)
        .render(layout.main, buf);
    } else {
        TreeView::new(ctx.rows, ctx.theme)
            .block(block)
            .render(layout.main, buf, tree_state);
    }

    if let Some(details) = layout.details {
        GalleryView::new(ctx.selection, ctx.theme).render(details, buf);
    }

    render_footer(&ctx, layout.footer, buf);

    if ctx.mode == AppMode::Help {
        HelpOverlay::new(ctx.theme).render(area, buf);
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" svgview ", ctx.theme.title.add_modifier(Modifier::BOLD));
    let stats = Span::styled(format!(" {} images ", ctx.total_images), ctx.theme.header);

    let tooltip = ctx
        .rows
        .get(ctx.selected)
        .map(|row| {
            Span::styled(
                format!(" {} ", ItemPresentation::from_node(&row.node).tooltip),
                Style::default().fg(ctx.theme.muted),
            )
        })
        .unwrap_or_default();

    Paragraph::new(Line::from(vec![title, stats, tooltip]))
        .style(ctx.theme.header)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let line = match ctx.notice {
        Some(Notice::Info(message)) => Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(ctx.theme.success),
        )),
        Some(Notice::Error(message)) => Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(ctx.theme.error),
        )),
        None => {
            let keys = [
                ("j/k", "Nav"),
                ("Enter", "Open"),
                ("r", "Reveal"),
                ("p", "Gallery"),
                ("R", "Refresh"),
                ("?", "Help"),
                ("q", "Quit"),
            ];
            Line::from(
                keys.iter()
                    .flat_map(|(key, desc)| {
                        [
                            Span::styled(format!(" {key} "), ctx.theme.help_key),
                            Span::styled(format!("{desc} "), ctx.theme.help_desc),
                        ]
                    })
                    .collect::<Vec<_>>(),
            )
        }
    };

    Paragraph::new(line).style(ctx.theme.footer).render(area, buf);
}
