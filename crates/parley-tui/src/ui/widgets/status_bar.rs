//! Key hint bar shown under the composer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::text::visual_width;
use crate::theme::Theme;

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Single-line bar of key hints with optional right-aligned notice.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    hints: Vec<KeyHint>,
    notice: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            hints: Vec::new(),
            notice: None,
            theme,
        }
    }

    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    /// Set right-aligned text.
    #[must_use]
    pub fn notice(mut self, text: Option<&'a str>) -> Self {
        self.notice = text;
        self
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let background = Style::default().fg(self.theme.subtext).bg(self.theme.surface);
        for x in area.x..area.x.saturating_add(area.width) {
            buf[(x, area.y)].set_char(' ').set_style(background);
        }

        let key_style = Style::default()
            .fg(self.theme.base)
            .bg(self.theme.primary)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for hint in &self.hints {
            spans.push(Span::styled(format!(" {} ", hint.key), key_style));
            spans.push(Span::styled(format!(" {} ", hint.label), background));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        if let Some(text) = self.notice {
            let text_width = visual_width(text) as u16;
            if text_width < area.width {
                let x = area.x + area.width - text_width - 1;
                buf.set_string(x, area.y, text, background);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_renders_hints_and_notice() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        StatusBar::new(&theme)
            .hints(vec![KeyHint::new("Enter", "send")])
            .notice(Some("Attached cat.png"))
            .render(area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.starts_with(" Enter  send"));
        assert!(text.ends_with("Attached cat.png"));
    }
}
