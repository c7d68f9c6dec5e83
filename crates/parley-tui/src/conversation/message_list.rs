//! Scrolling list of message cards.
//!
//! Each message renders as right-aligned shaded cards next to the sender's
//! avatar:
//!
//! ```text
//!                    Today 11:00PM
//!        ▒ ▣ image blob:1          ▒
//!
//!        ▒ Creating something      ▒ (MT)
//!                      🔥 12  👍 12
//! ```

use std::cell::Cell;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use parley_engine::{Media, MediaKind, Message};

use crate::text::{find_urls, pad_to_width, truncate_to_width, visual_width, wrap_text};
use crate::theme::{IconSet, Theme};

/// Widest a card may grow, in cells.
pub const MAX_CARD_WIDTH: usize = 48;

/// Lines scrolled per mouse wheel tick or arrow key.
pub const SCROLL_STEP: usize = 3;

/// Scroll position of the message list, counted in lines up from the
/// newest message.
#[derive(Debug, Default)]
pub struct MessageListState {
    offset_from_bottom: usize,
    /// Largest useful offset seen at the last render.
    max_offset: Cell<usize>,
}

impl MessageListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset_from_bottom
    }

    /// Whether the newest message is in view.
    pub fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.max_offset.get();
        self.offset_from_bottom = (self.offset_from_bottom + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    pub fn scroll_to_latest(&mut self) {
        self.offset_from_bottom = 0;
    }

    fn record_max_offset(&self, max: usize) {
        self.max_offset.set(max);
    }
}

/// Message list widget.
pub struct MessageList<'a> {
    messages: &'a [Message],
    state: &'a MessageListState,
    theme: &'a Theme,
    icons: &'a IconSet,
    initials: &'a str,
}

impl<'a> MessageList<'a> {
    pub fn new(
        messages: &'a [Message],
        state: &'a MessageListState,
        theme: &'a Theme,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            messages,
            state,
            theme,
            icons,
            initials: "",
        }
    }

    /// Initials drawn in the avatar badge.
    #[must_use]
    pub fn initials(mut self, initials: &'a str) -> Self {
        self.initials = initials;
        self
    }

    fn avatar(&self) -> String {
        format!("({})", self.initials)
    }

    /// Space reserved right of the cards for the avatar.
    fn gutter_width(&self) -> usize {
        visual_width(&self.avatar()) + 2
    }

    /// Lay out every message for the given width.
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let card_width = width
            .saturating_sub(self.gutter_width())
            .min(MAX_CARD_WIDTH);
        // One cell of padding on each side of the card text
        let inner = card_width.saturating_sub(2).max(1);

        let mut lines = Vec::new();
        for message in self.messages {
            if let Some(date) = message.date() {
                lines.push(
                    Line::from(Span::styled(date.to_string(), self.theme.muted_style()))
                        .alignment(Alignment::Center),
                );
            }
            lines.extend(self.message_block(message, inner));
            lines.push(self.reaction_row(message));
            lines.push(Line::from(""));
        }
        lines
    }

    /// Card rows for one message, with the avatar on the last row.
    fn message_block(&self, message: &Message, inner: usize) -> Vec<Line<'static>> {
        let mut cards: Vec<Vec<Vec<Span<'static>>>> = Vec::new();

        if let Some(media) = message.media() {
            cards.push(self.media_card(media, inner));
        }
        if let Some(text) = message.visible_text() {
            cards.push(self.text_card(text, message.has_link(), inner));
        }

        let avatar = self.avatar();
        let blank_avatar = " ".repeat(visual_width(&avatar));
        let card_count = cards.len();
        let mut lines = Vec::new();

        for (card_index, card) in cards.into_iter().enumerate() {
            let row_count = card.len();
            let card_width = card
                .iter()
                .map(|row| row.iter().map(|s| visual_width(&s.content)).sum::<usize>())
                .max()
                .unwrap_or(0);

            for (row_index, mut row) in card.into_iter().enumerate() {
                let row_width: usize = row.iter().map(|s| visual_width(&s.content)).sum();
                let mut spans = vec![Span::styled(" ", self.theme.card_style())];
                spans.append(&mut row);
                spans.push(Span::styled(
                    " ".repeat(card_width - row_width + 1),
                    self.theme.card_style(),
                ));

                let last_row = card_index + 1 == card_count && row_index + 1 == row_count;
                spans.push(Span::raw(" "));
                if last_row {
                    spans.push(Span::styled(avatar.clone(), self.avatar_style()));
                } else {
                    spans.push(Span::raw(blank_avatar.clone()));
                }
                spans.push(Span::raw(" "));
                lines.push(Line::from(spans).alignment(Alignment::Right));
            }

            if card_index + 1 < card_count {
                lines.push(Line::from(""));
            }
        }
        lines
    }

    fn avatar_style(&self) -> Style {
        Style::default().fg(self.theme.primary).bg(self.theme.base)
    }

    fn media_label(&self, media: &Media, width: usize) -> String {
        let icon = match media.kind {
            MediaKind::Image => self.icons.image(),
            MediaKind::Video => self.icons.video(),
        };
        let label = format!("{icon} {} {}", media.kind.label(), media.url);
        truncate_to_width(&label, width)
    }

    /// A single item fills the card; several items form a two-column grid.
    fn media_card(&self, media: &[Media], inner: usize) -> Vec<Vec<Span<'static>>> {
        if media.len() == 1 {
            let label = self.media_label(&media[0], inner);
            return vec![vec![Span::styled(label, self.theme.card_style())]];
        }

        let column = inner.saturating_sub(1) / 2;
        media
            .chunks(2)
            .map(|pair| {
                let cells: Vec<String> = pair
                    .iter()
                    .map(|m| pad_to_width(&self.media_label(m, column), column))
                    .collect();
                vec![Span::styled(cells.join(" "), self.theme.card_style())]
            })
            .collect()
    }

    fn text_card(&self, text: &str, has_link: bool, inner: usize) -> Vec<Vec<Span<'static>>> {
        let urls = if has_link { find_urls(text) } else { Vec::new() };
        wrap_text(text, inner)
            .into_iter()
            .map(|row| {
                if urls.is_empty() {
                    return vec![Span::styled(row, self.theme.card_style())];
                }
                let mut spans = Vec::new();
                for (i, word) in row.split(' ').enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(" ", self.theme.card_style()));
                    }
                    // Long URLs may be split across rows
                    let is_link = urls
                        .iter()
                        .any(|url| *url == word || (word.len() >= 8 && url.contains(word)));
                    let style = if is_link {
                        self.theme.link_style()
                    } else {
                        self.theme.card_style()
                    };
                    spans.push(Span::styled(word.to_string(), style));
                }
                spans
            })
            .collect()
    }

    /// Reaction badges, or the add-reaction affordance when there are none.
    fn reaction_row(&self, message: &Message) -> Line<'static> {
        let mut spans = Vec::new();
        if message.reactions().is_empty() {
            spans.push(Span::styled(
                format!(" {} ", self.icons.add_reaction()),
                self.theme.muted_style(),
            ));
        } else {
            for (i, reaction) in message.reactions().iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                let badge = match reaction.count {
                    Some(count) => format!(" {} {count} ", reaction.emoji),
                    None => format!(" {} ", reaction.emoji),
                };
                spans.push(Span::styled(badge, self.theme.badge_style()));
            }
        }
        spans.push(Span::raw(" ".repeat(self.gutter_width())));
        Line::from(spans).alignment(Alignment::Right)
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.lines(area.width as usize);
        let height = area.height as usize;
        let max_offset = lines.len().saturating_sub(height);
        self.state.record_max_offset(max_offset);

        let offset = self.state.offset().min(max_offset);
        let end = lines.len() - offset;
        let start = end.saturating_sub(height);
        let visible: Vec<Line<'static>> = lines[start..end].to_vec();

        Paragraph::new(visible)
            .style(self.theme.text_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use parley_engine::{default_conversation, MediaUrl};

    fn render(messages: &[Message], state: &MessageListState, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let icons = IconSet::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        MessageList::new(messages, state, &theme, &icons)
            .initials("MT")
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    fn image(url: &str) -> Media {
        Media::new(MediaUrl::new(url), MediaKind::Image)
    }

    #[test]
    fn test_text_card_with_avatar_and_affordance() {
        let messages = vec![Message::builder("1").text("hello there").build().unwrap()];
        let state = MessageListState::new();
        let out = render(&messages, &state, 40, 6);

        let card_line = out.lines().find(|l| l.contains("hello there")).unwrap();
        assert!(card_line.trim_end().ends_with("(MT)"));
        assert!(out.contains("☺+"));
    }

    #[test]
    fn test_date_separator_and_reactions() {
        let messages = vec![Message::builder("1")
            .text("hi")
            .date("Today 11:00PM")
            .reaction("🔥", Some(12))
            .reaction("👍", None)
            .build()
            .unwrap()];
        let state = MessageListState::new();
        let out = render(&messages, &state, 40, 8);

        assert!(out.contains("Today 11:00PM"));
        assert!(out.contains("🔥 12"));
        assert!(out.contains("👍"));
        assert!(!out.contains("☺+"));
    }

    #[test]
    fn test_media_then_text_cards() {
        let messages = vec![Message::builder("m1")
            .media(image("blob:1"))
            .text("caption")
            .build()
            .unwrap()];
        let state = MessageListState::new();
        let out = render(&messages, &state, 50, 8);

        let media_row = out.lines().position(|l| l.contains("image blob:1")).unwrap();
        let text_row = out.lines().position(|l| l.contains("caption")).unwrap();
        assert!(media_row < text_row);
        // Avatar only on the last card row
        assert!(!out.lines().nth(media_row).unwrap().contains("(MT)"));
        assert!(out.lines().nth(text_row).unwrap().contains("(MT)"));
    }

    #[test]
    fn test_media_only_message() {
        let messages = vec![Message::builder("m1")
            .media(Media::new(MediaUrl::new("blob:7"), MediaKind::Video))
            .build()
            .unwrap()];
        let state = MessageListState::new();
        let out = render(&messages, &state, 50, 5);
        assert!(out.contains("▶ video blob:7"));
    }

    #[test]
    fn test_media_grid_two_per_row() {
        let messages = vec![Message::builder("m1")
            .media(image("blob:1"))
            .media(image("blob:2"))
            .media(image("blob:3"))
            .build()
            .unwrap()];
        let state = MessageListState::new();
        let out = render(&messages, &state, 60, 8);

        let first = out.lines().find(|l| l.contains("blob:1")).unwrap();
        assert!(first.contains("blob:2"));
        let second = out.lines().find(|l| l.contains("blob:3")).unwrap();
        assert!(!second.contains("blob:1"));
    }

    #[test]
    fn test_link_card_styles_url() {
        let theme = Theme::default();
        let icons = IconSet::default();
        let state = MessageListState::new();
        let messages = vec![Message::builder("6")
            .text("Shop Zara http://rstyle.me/x")
            .link()
            .build()
            .unwrap()];
        let list = MessageList::new(&messages, &state, &theme, &icons).initials("MT");

        let lines = list.lines(60);
        let url_span = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content == "http://rstyle.me/x")
            .unwrap();
        assert_eq!(url_span.style, theme.link_style());
        let shop_span = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content == "Shop")
            .unwrap();
        assert_eq!(shop_span.style, theme.card_style());
    }

    #[test]
    fn test_follows_latest_and_scrolls_back() {
        let messages = default_conversation().unwrap();
        let mut state = MessageListState::new();

        let bottom = render(&messages, &state, 60, 10);
        assert!(bottom.contains("Shop this link"));
        assert!(state.is_following());

        state.scroll_up(1000);
        let top = render(&messages, &state, 60, 10);
        assert!(top.contains("Jan 21 11:00PM"));
        assert!(!top.contains("Shop this link"));

        state.scroll_to_latest();
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn test_scroll_up_is_clamped_after_render() {
        let messages = default_conversation().unwrap();
        let mut state = MessageListState::new();
        render(&messages, &state, 60, 10);

        state.scroll_up(100_000);
        let clamped = state.offset();
        state.scroll_up(5);
        assert_eq!(state.offset(), clamped);
        state.scroll_down(clamped + 10);
        assert!(state.is_following());
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let messages = default_conversation().unwrap();
        let state = MessageListState::new();
        render(&messages, &state, 4, 2);
        render(&messages, &state, 1, 1);
    }
}
