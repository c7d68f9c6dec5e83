//! Direct-message screen: header, message list, composer, key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::{App, Mode};
use crate::conversation::{composer_height, Composer, MessageList};
use crate::screens::Screen;
use crate::text::visual_width;
use crate::ui::widgets::{KeyHint, StatusBar};
use crate::ui::{chat_layout, HEADER_HEIGHT};

/// The chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, app.theme.text_style());

        let height = composer_height(app.input.content(), app.store.staged().is_some());
        let layout = chat_layout(area, height);

        render_header(app, layout.header, buf);

        MessageList::new(app.store.messages(), &app.list, &app.theme, &app.icons)
            .initials(&app.config.contact_initials)
            .render(layout.messages, buf);

        Composer::new(&app.input, &app.theme, &app.icons, &app.borders)
            .staged(app.store.staged())
            .hint(app.composer_hint())
            .can_send(app.store.can_send())
            .focused(app.mode == Mode::Compose)
            .render(layout.composer, buf);

        StatusBar::new(&app.theme)
            .hints(hints(app))
            .notice(app.notice.as_deref())
            .render(layout.hints, buf);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let accent = Style::default().fg(app.theme.primary).bg(app.theme.base);
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.icons.back()), accent),
        Span::styled(format!("({})", app.config.contact_initials), accent),
        Span::raw(" "),
        Span::styled(app.config.contact_name.clone(), app.theme.title_style()),
    ]);
    buf.set_line(area.x, area.y, &line, area.width);

    let help = format!("{} F1 ", app.icons.help());
    let help_width = visual_width(&help) as u16;
    if help_width < area.width {
        buf.set_string(
            area.x + area.width - help_width,
            area.y,
            help,
            app.theme.muted_style(),
        );
    }

    if area.height >= HEADER_HEIGHT {
        let rule = app.borders.rule().repeat(area.width as usize);
        buf.set_stringn(
            area.x,
            area.y + 1,
            rule,
            area.width as usize,
            app.theme.border_style(),
        );
    }
}

fn hints(app: &App) -> Vec<KeyHint> {
    match app.mode {
        Mode::Compose => {
            let mut hints = vec![
                KeyHint::new("Enter", "Send"),
                KeyHint::new("S-Enter", "Newline"),
                KeyHint::new("^O", "Attach"),
            ];
            if app.store.staged().is_some() {
                hints.push(KeyHint::new("^X", "Remove"));
            }
            hints.push(KeyHint::new("^C", "Quit"));
            hints
        }
        Mode::AttachPrompt => vec![
            KeyHint::new("Enter", "Attach"),
            KeyHint::new("Esc", "Cancel"),
        ],
        Mode::Help => vec![KeyHint::new("any key", "Close")],
    }
}
