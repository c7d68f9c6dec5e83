//! Screen definitions for the parley TUI.

pub mod chat;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::App;
use crate::text::visual_width;
use crate::ui::centered_fixed;

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let help_text = r"
  Composer
    Enter              Send message
    Shift/Alt+Enter    New line
    Ctrl+O             Attach image or video
    Ctrl+X             Remove attachment

  Messages
    Up/Down            Scroll
    PgUp/PgDn          Scroll a page

  Ctrl+C / Ctrl+Q      Quit
  F1                   Toggle this help

  [Press any key to close]
";

    let width = 48.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(app.theme.title_style())
        .borders(Borders::ALL)
        .border_set(app.borders.overlay())
        .border_style(Style::default().fg(app.theme.border_focused).bg(app.theme.base))
        .style(app.theme.text_style());

    Paragraph::new(help_text)
        .block(block)
        .style(app.theme.text_style())
        .render(overlay_area, buf);
}

/// Render the file path prompt used to pick an attachment.
#[allow(clippy::cast_possible_truncation)]
pub fn render_attach_prompt(app: &App, area: Rect, buf: &mut Buffer) {
    let width = 64.min(area.width.saturating_sub(4));
    let height = 7.min(area.height);
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(format!(" {} Attach image or video ", app.icons.attach()))
        .title_style(app.theme.title_style())
        .borders(Borders::ALL)
        .border_set(app.borders.overlay())
        .border_style(Style::default().fg(app.theme.border_focused).bg(app.theme.base))
        .style(app.theme.text_style());
    let inner = block.inner(overlay_area);
    block.render(overlay_area, buf);

    let (before, after) = app.attach_input.split_at_cursor();
    let mut after_chars = after.chars();
    let cursor = after_chars.next().map_or_else(|| " ".to_string(), String::from);
    let input_line = Line::from(vec![
        Span::styled(" Path: ", app.theme.muted_style()),
        Span::styled(before.to_string(), app.theme.text_style()),
        Span::styled(cursor, app.theme.text_style().add_modifier(Modifier::REVERSED)),
        Span::styled(after_chars.as_str().to_string(), app.theme.text_style()),
    ]);

    let status_line = match &app.attach_error {
        Some(error) => Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(app.theme.error).bg(app.theme.base),
        )),
        None => Line::from(Span::styled(
            " Images and videos only",
            app.theme.muted_style(),
        )),
    };

    // Keep the cursor visible on long paths
    let used = visual_width(" Path: ") + visual_width(before) + 1;
    let scroll = used.saturating_sub(inner.width as usize) as u16;
    if inner.height > 1 {
        let input_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        Paragraph::new(input_line)
            .scroll((0, scroll))
            .render(input_area, buf);
    }
    if inner.height > 2 {
        let rest_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);
        Paragraph::new(vec![
            status_line,
            Line::from(""),
            Line::from(Span::styled(" Enter attach   Esc cancel", app.theme.muted_style())),
        ])
        .style(app.theme.text_style())
        .render(rest_area, buf);
    }
}
