//! Layout helpers for the parley TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Areas of the chat screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub header: Rect,
    pub messages: Rect,
    pub composer: Rect,
    pub hints: Rect,
}

/// Height of the header including its bottom rule.
pub const HEADER_HEIGHT: u16 = 2;

/// Split the screen into header, message list, composer, and hint bar.
pub fn chat_layout(area: Rect, composer_height: u16) -> ChatLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(composer_height),
            Constraint::Length(1),
        ])
        .split(area);
    ChatLayout {
        header: chunks[0],
        messages: chunks[1],
        composer: chunks[2],
        hints: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(20, 7, 40, 10));
        // Larger than the parent is clamped
        assert_eq!(centered_fixed(100, 30, area), Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn test_chat_layout_stacks_areas() {
        let layout = chat_layout(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.composer.height, 3);
        assert_eq!(layout.hints.height, 1);
        assert_eq!(layout.messages.height, 24 - HEADER_HEIGHT - 3 - 1);
        assert_eq!(layout.hints.y, 23);
    }
}
