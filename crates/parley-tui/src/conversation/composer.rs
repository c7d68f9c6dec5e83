//! Message composer: attach button, staged preview, draft text, send button.
//!
//! ```text
//! ──────────────────────────────────────────
//!  [▣ cat.png ✕]
//!  ⊕  Add a caption to your uploaded media  ↑
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use parley_engine::{DraftAttachment, MediaKind};

use crate::text::{truncate_to_width, visual_width};
use crate::theme::{BorderSet, IconSet, Theme};
use crate::ui::widgets::TextInputState;

/// Tallest the draft area grows before it scrolls.
pub const MAX_COMPOSER_LINES: u16 = 5;

/// Rows needed for the composer, including its top rule.
#[allow(clippy::cast_possible_truncation)]
pub fn composer_height(draft: &str, has_staged: bool) -> u16 {
    let lines = draft.split('\n').count().min(MAX_COMPOSER_LINES as usize) as u16;
    1 + u16::from(has_staged) + lines.max(1)
}

/// Composer widget.
pub struct Composer<'a> {
    input: &'a TextInputState,
    staged: Option<&'a DraftAttachment>,
    hint: Option<&'a str>,
    can_send: bool,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    focused: bool,
}

impl<'a> Composer<'a> {
    pub fn new(
        input: &'a TextInputState,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            input,
            staged: None,
            hint: None,
            can_send: false,
            theme,
            icons,
            borders,
            focused: true,
        }
    }

    #[must_use]
    pub fn staged(mut self, staged: Option<&'a DraftAttachment>) -> Self {
        self.staged = staged;
        self
    }

    #[must_use]
    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    #[must_use]
    pub fn can_send(mut self, can_send: bool) -> Self {
        self.can_send = can_send;
        self
    }

    /// Whether to draw the cursor.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn render_preview(&self, staged: &DraftAttachment, x: u16, y: u16, width: u16, buf: &mut Buffer) {
        let icon = match staged.kind() {
            MediaKind::Image => self.icons.image(),
            MediaKind::Video => self.icons.video(),
        };
        let remove = self.icons.remove();
        // "[" icon " " name " " remove "]"
        let frame = visual_width(icon) + visual_width(remove) + 4;
        let name = truncate_to_width(
            staged.source().name(),
            (width as usize).saturating_sub(frame + 1),
        );
        let chip = format!("[{icon} {name} {remove}]");
        buf.set_stringn(x + 1, y, chip, width.saturating_sub(1) as usize, self.theme.badge_style());
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_draft(&self, area: Rect, buf: &mut Buffer) {
        let text_style = self.theme.text_style();

        if let Some(hint) = self.hint {
            buf.set_stringn(area.x, area.y, hint, area.width as usize, self.theme.muted_style());
            if self.focused {
                if let Some(cell) = buf.cell_mut((area.x, area.y)) {
                    cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
                }
            }
            return;
        }

        let (before, _) = self.input.split_at_cursor();
        let cursor_row = before.matches('\n').count();
        let cursor_col = before.rsplit('\n').next().map_or(0, visual_width);

        let rows = area.height as usize;
        let first_row = cursor_row.saturating_sub(rows.saturating_sub(1));

        for (i, line) in self.input.content().split('\n').skip(first_row).take(rows).enumerate() {
            buf.set_stringn(area.x, area.y + i as u16, line, area.width as usize, text_style);
        }

        if self.focused {
            let row = (cursor_row - first_row) as u16;
            let col = cursor_col.min(area.width.saturating_sub(1) as usize) as u16;
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }
    }
}

impl Widget for Composer<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_set(self.borders.overlay())
            .border_style(self.theme.border_style())
            .style(self.theme.text_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 6 || inner.height == 0 {
            return;
        }

        let mut y = inner.y;
        if let Some(staged) = self.staged {
            self.render_preview(staged, inner.x, y, inner.width, buf);
            y += 1;
        }
        if y >= inner.y + inner.height {
            return;
        }

        let attach = self.icons.attach();
        let send = self.icons.send();
        let attach_width = visual_width(attach) as u16;
        let send_width = visual_width(send) as u16;

        let accent = Style::default().fg(self.theme.primary).bg(self.theme.base);
        buf.set_string(inner.x + 1, y, attach, accent);

        let send_style = if self.can_send {
            accent.add_modifier(Modifier::BOLD)
        } else {
            self.theme.muted_style().add_modifier(Modifier::DIM)
        };
        let send_x = (inner.x + inner.width).saturating_sub(send_width + 1);
        buf.set_string(send_x, y, send, send_style);

        let text_x = inner.x + 1 + attach_width + 2;
        let text_area = Rect::new(
            text_x,
            y,
            send_x.saturating_sub(text_x + 1),
            inner.y + inner.height - y,
        );
        if text_area.width > 0 {
            self.render_draft(text_area, buf);
        }
    }
}
