//! Application state and update logic for the parley TUI.

use std::path::Path;
use std::time::{Duration, Instant};

use parley_engine::{
    AnimatedPlaceholder, AttachOutcome, BlobRegistry, Config, ConversationStore, Message,
    PlaceholderCycler, PlaceholderError, SelectedFile,
};
use tracing::{debug, info};

use crate::conversation::{composer_hint, MessageListState, SCROLL_STEP};
use crate::event::Action;
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::ui::widgets::TextInputState;

/// Lines moved by Page Up / Page Down.
const PAGE_STEP: usize = SCROLL_STEP * 4;

/// UI configuration read from the environment.
#[derive(Debug, Clone, Default)]
pub struct UiConfig {
    /// Icon mode (Nerd, Unicode, or ASCII).
    pub icons: IconMode,
    /// Color palette.
    pub theme: Theme,
}

impl UiConfig {
    /// Create config from environment.
    ///
    /// `PARLEY_ICONS` and `PARLEY_THEME` pick the icon mode and palette;
    /// `NO_COLOR` forces ASCII icons.
    pub fn from_env() -> Self {
        let icons = if std::env::var("NO_COLOR").is_ok() {
            IconMode::Ascii
        } else {
            std::env::var("PARLEY_ICONS")
                .ok()
                .and_then(|name| IconMode::from_name(&name))
                .unwrap_or_default()
        };
        let theme = std::env::var("PARLEY_THEME")
            .ok()
            .and_then(|name| Theme::from_name(&name))
            .unwrap_or_default();
        Self { icons, theme }
    }
}

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Typing into the composer.
    #[default]
    Compose,
    /// Typing a file path to attach.
    AttachPrompt,
    /// Help overlay.
    Help,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Current input mode.
    pub mode: Mode,

    /// Loaded configuration.
    pub config: Config,

    /// Message log, draft, and staged attachment.
    pub store: ConversationStore<BlobRegistry>,

    /// Typewriter hint for the empty composer.
    pub placeholder: AnimatedPlaceholder,

    /// Composer text buffer. Mirrored into the store after every edit.
    pub input: TextInputState,

    /// Path typed into the attach prompt.
    pub attach_input: TextInputState,

    /// Why the last attach attempt failed.
    pub attach_error: Option<String>,

    /// Message list scroll position.
    pub list: MessageListState,

    /// When to jump to the newest message after a send.
    pub pending_scroll: Option<Instant>,

    /// Transient message for the hint bar.
    pub notice: Option<String>,

    pub theme: Theme,
    pub icons: IconSet,
    pub borders: BorderSet,
}

impl App {
    /// Create a new app showing `messages`, styled from the environment.
    pub fn new(config: Config, messages: Vec<Message>) -> Result<Self, PlaceholderError> {
        let store = ConversationStore::in_memory().with_messages(messages);
        Self::with_store(config, store, UiConfig::from_env(), Instant::now())
    }

    /// Create a new app around an existing store, starting the placeholder
    /// animation at `now`.
    pub fn with_store(
        config: Config,
        store: ConversationStore<BlobRegistry>,
        ui: UiConfig,
        now: Instant,
    ) -> Result<Self, PlaceholderError> {
        let mut placeholder = AnimatedPlaceholder::new(PlaceholderCycler::new(&config.placeholder)?);
        placeholder.start(now);

        Ok(Self {
            should_quit: false,
            mode: Mode::Compose,
            config,
            store,
            placeholder,
            input: TextInputState::new(),
            attach_input: TextInputState::new(),
            attach_error: None,
            list: MessageListState::new(),
            pending_scroll: None,
            notice: None,
            theme: ui.theme,
            icons: IconSet::new(ui.icons),
            borders: BorderSet::new(ui.icons),
        })
    }

    /// Create an app for tests: seed conversation, default config,
    /// deterministic ids and clock, Unicode icons.
    #[cfg(test)]
    pub fn new_for_test(now: Instant) -> Self {
        let store = ConversationStore::in_memory()
            .with_messages(parley_engine::default_conversation().unwrap())
            .with_ids(parley_engine::SequentialIds::new("m"))
            .with_clock(parley_engine::FixedClock(1_700_000_000_000));
        Self::with_store(Config::default(), store, UiConfig::default(), now).unwrap()
    }

    /// Hint shown in the composer, if any.
    pub fn composer_hint(&self) -> Option<&str> {
        composer_hint(
            self.input.content(),
            self.store.staged().is_some(),
            self.placeholder.display(),
        )
    }

    /// Handle an action, using the current time for any deadlines.
    pub fn handle_action(&mut self, action: Action) {
        self.handle_action_at(action, Instant::now());
    }

    /// Handle an action at a given instant.
    pub fn handle_action_at(&mut self, action: Action, now: Instant) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Compose => self.handle_compose_action(action, now),
            Mode::AttachPrompt => self.handle_attach_action(action),
            Mode::Help => {
                if action != Action::None {
                    self.mode = Mode::Compose;
                }
            }
        }
    }

    fn handle_compose_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Send => self.send(now),
            Action::Newline => {
                self.input.insert('\n');
                self.sync_draft();
            }
            Action::Insert(c) => {
                self.input.insert(c);
                self.sync_draft();
            }
            Action::Backspace => {
                self.input.backspace();
                self.sync_draft();
            }
            Action::Delete => {
                self.input.delete();
                self.sync_draft();
            }
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            Action::ScrollUp => self.list.scroll_up(SCROLL_STEP),
            Action::ScrollDown => self.list.scroll_down(SCROLL_STEP),
            Action::PageUp => self.list.scroll_up(PAGE_STEP),
            Action::PageDown => self.list.scroll_down(PAGE_STEP),
            Action::Attach => {
                self.attach_input.clear();
                self.attach_error = None;
                self.mode = Mode::AttachPrompt;
            }
            Action::RemoveAttachment => {
                if self.store.remove_attachment() {
                    self.notice = Some("Attachment removed".into());
                }
            }
            Action::Help => self.mode = Mode::Help,
            Action::Back | Action::Quit | Action::None => {}
        }
    }

    fn handle_attach_action(&mut self, action: Action) {
        match action {
            Action::Send => self.confirm_attachment(),
            Action::Back => self.mode = Mode::Compose,
            Action::Insert(c) => self.attach_input.insert(c),
            Action::Backspace => self.attach_input.backspace(),
            Action::Delete => self.attach_input.delete(),
            Action::Left => self.attach_input.move_left(),
            Action::Right => self.attach_input.move_right(),
            Action::Home => self.attach_input.move_home(),
            Action::End => self.attach_input.move_end(),
            _ => {}
        }
    }

    fn confirm_attachment(&mut self) {
        let path = self.attach_input.content().trim().to_string();
        if path.is_empty() {
            self.mode = Mode::Compose;
            return;
        }

        let result = SelectedFile::from_path(Path::new(&path))
            .and_then(|file| self.store.select_attachment(Some(file)));
        match result {
            Ok(outcome) => {
                let name = self
                    .store
                    .staged()
                    .map(|staged| staged.source().name().to_string())
                    .unwrap_or_default();
                self.notice = match outcome {
                    AttachOutcome::Staged => Some(format!("Attached {name}")),
                    AttachOutcome::Replaced { .. } => Some(format!("Replaced attachment with {name}")),
                    AttachOutcome::Ignored => None,
                };
                self.attach_error = None;
                self.attach_input.clear();
                self.mode = Mode::Compose;
            }
            Err(e) => {
                debug!(path = %path, error = %e, "Attachment rejected");
                self.attach_error = Some(e.to_string());
            }
        }
    }

    fn sync_draft(&mut self) {
        self.store.update_draft_text(self.input.content());
    }

    fn send(&mut self, now: Instant) {
        let Some(message) = self.store.send() else {
            return;
        };
        info!(id = %message.id(), "Message sent");
        self.input.clear();
        self.notice = None;
        self.pending_scroll = Some(now + Duration::from_millis(self.config.scroll_delay_ms));
    }

    /// Advance timers: placeholder animation and the deferred scroll.
    pub fn tick(&mut self, now: Instant) {
        self.placeholder.poll(now);

        if let Some(at) = self.pending_scroll {
            if at <= now {
                self.pending_scroll = None;
                if self.store.take_scroll_request() {
                    self.list.scroll_to_latest();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_terminal_sized, TEST_HEIGHT, TEST_WIDTH};
    use parley_engine::{MediaKind, MediaUrl};
    use tempfile::TempDir;

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_action_at(Action::Insert(c), now);
        }
    }

    #[test]
    fn test_typing_mirrors_draft() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        type_text(&mut app, "hi", now);
        assert_eq!(app.store.draft_text(), "hi");

        app.handle_action_at(Action::Backspace, now);
        assert_eq!(app.store.draft_text(), "h");
    }

    #[test]
    fn test_send_trims_and_clears() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        let before = app.store.len();

        type_text(&mut app, "  hello  ", now);
        app.handle_action_at(Action::Send, now);

        assert_eq!(app.store.len(), before + 1);
        let last = app.store.messages().last().unwrap();
        assert_eq!(last.text(), Some("hello"));
        assert!(last.media().is_none());
        assert_eq!(last.timestamp(), Some(1_700_000_000_000));
        assert!(app.input.is_empty());
        assert_eq!(app.store.draft_text(), "");
    }

    #[test]
    fn test_newline_never_sends() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        let before = app.store.len();

        type_text(&mut app, "line", now);
        app.handle_action_at(Action::Newline, now);
        type_text(&mut app, "two", now);

        assert_eq!(app.store.len(), before);
        assert_eq!(app.store.draft_text(), "line\ntwo");
    }

    #[test]
    fn test_blank_send_is_noop() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        let before = app.store.len();

        type_text(&mut app, "   ", now);
        app.handle_action_at(Action::Send, now);

        assert_eq!(app.store.len(), before);
        assert_eq!(app.input.content(), "   ");
        assert!(app.pending_scroll.is_none());
    }

    fn draw(app: &App) {
        let mut terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        terminal
            .draw(|frame| crate::render_app(app, frame.area(), frame.buffer_mut()))
            .unwrap();
    }

    #[test]
    fn test_scroll_fires_after_delay() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        draw(&app);
        app.handle_action_at(Action::PageUp, now);
        let scrolled = app.list.offset();
        assert!(scrolled > 0);

        type_text(&mut app, "hey", now);
        app.handle_action_at(Action::Send, now);
        assert_eq!(app.pending_scroll, Some(now + Duration::from_millis(100)));
        draw(&app);

        app.tick(now + Duration::from_millis(50));
        assert!(app.pending_scroll.is_some());
        assert_eq!(app.list.offset(), scrolled);

        app.tick(now + Duration::from_millis(100));
        assert!(app.pending_scroll.is_none());
        assert_eq!(app.list.offset(), 0);
        assert!(!app.store.take_scroll_request());
    }

    #[test]
    fn test_quit_before_scroll_drops_it() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        draw(&app);
        app.handle_action_at(Action::PageUp, now);
        let scrolled = app.list.offset();
        assert!(scrolled > 0);

        type_text(&mut app, "bye", now);
        app.handle_action_at(Action::Send, now);
        app.handle_action_at(Action::Quit, now + Duration::from_millis(10));

        assert!(app.should_quit);
        assert_eq!(app.list.offset(), scrolled);
        assert!(app.pending_scroll.is_some());
        drop(app);
    }

    #[test]
    fn test_attach_prompt_stages_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, b"png").unwrap();

        let now = Instant::now();
        let mut app = App::new_for_test(now);
        app.handle_action_at(Action::Attach, now);
        assert_eq!(app.mode, Mode::AttachPrompt);

        type_text(&mut app, &path.display().to_string(), now);
        app.handle_action_at(Action::Send, now);

        assert_eq!(app.mode, Mode::Compose);
        let staged = app.store.staged().unwrap();
        assert_eq!(staged.url(), &MediaUrl::new("blob:1"));
        assert_eq!(staged.kind(), MediaKind::Image);
        assert_eq!(app.notice.as_deref(), Some("Attached cat.png"));
        assert_eq!(app.composer_hint(), Some("Add a caption to your uploaded media"));
    }

    #[test]
    fn test_attach_prompt_reports_errors() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"text").unwrap();

        let now = Instant::now();
        let mut app = App::new_for_test(now);

        app.handle_action_at(Action::Attach, now);
        type_text(&mut app, &notes.display().to_string(), now);
        app.handle_action_at(Action::Send, now);
        assert_eq!(app.mode, Mode::AttachPrompt);
        assert!(app.attach_error.is_some());
        assert!(app.store.staged().is_none());

        app.attach_input.clear();
        type_text(&mut app, &dir.path().join("missing.png").display().to_string(), now);
        app.handle_action_at(Action::Send, now);
        assert!(app.attach_error.is_some());

        app.handle_action_at(Action::Back, now);
        assert_eq!(app.mode, Mode::Compose);
        assert!(app.store.staged().is_none());
    }

    #[test]
    fn test_cancelled_prompt_keeps_staged_attachment() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        app.store
            .select_attachment(Some(SelectedFile::new("x.png", "image/png")))
            .unwrap();

        app.handle_action_at(Action::Attach, now);
        app.handle_action_at(Action::Back, now);
        assert_eq!(app.mode, Mode::Compose);

        app.handle_action_at(Action::Attach, now);
        app.handle_action_at(Action::Send, now);
        assert_eq!(app.mode, Mode::Compose);

        assert_eq!(app.store.staged().unwrap().url(), &MediaUrl::new("blob:1"));
        assert_eq!(app.store.resolver().live_count(), 1);
        assert!(app.store.resolver().released().is_empty());
    }

    #[test]
    fn test_replacing_attachment_releases_previous() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.png");
        let second = dir.path().join("b.mp4");
        std::fs::write(&first, b"a").unwrap();
        std::fs::write(&second, b"b").unwrap();

        let now = Instant::now();
        let mut app = App::new_for_test(now);
        for path in [&first, &second] {
            app.handle_action_at(Action::Attach, now);
            type_text(&mut app, &path.display().to_string(), now);
            app.handle_action_at(Action::Send, now);
        }

        assert_eq!(app.notice.as_deref(), Some("Replaced attachment with b.mp4"));
        assert_eq!(app.store.resolver().live_count(), 1);
        assert_eq!(app.store.resolver().released(), &[MediaUrl::new("blob:1")]);
        assert_eq!(app.store.staged().unwrap().kind(), MediaKind::Video);
    }

    #[test]
    fn test_send_staged_media_without_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mov");
        std::fs::write(&path, b"mov").unwrap();

        let now = Instant::now();
        let mut app = App::new_for_test(now);
        app.handle_action_at(Action::Attach, now);
        type_text(&mut app, &path.display().to_string(), now);
        app.handle_action_at(Action::Send, now);
        app.handle_action_at(Action::Send, now);

        let last = app.store.messages().last().unwrap();
        assert_eq!(last.text(), Some(""));
        assert_eq!(last.media().unwrap()[0].url, MediaUrl::new("blob:1"));
        assert!(app.store.staged().is_none());
        assert!(app.store.resolver().is_live(&MediaUrl::new("blob:1")));
    }

    #[test]
    fn test_remove_attachment() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        app.handle_action_at(Action::RemoveAttachment, now);
        assert!(app.notice.is_none());

        app.store
            .select_attachment(Some(SelectedFile::new("x.png", "image/png")))
            .unwrap();
        app.handle_action_at(Action::RemoveAttachment, now);
        assert!(app.store.staged().is_none());
        assert_eq!(app.notice.as_deref(), Some("Attachment removed"));
    }

    #[test]
    fn test_placeholder_animates_on_tick() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);
        assert_eq!(app.composer_hint(), Some(""));

        app.tick(now + Duration::from_millis(50));
        assert_eq!(app.composer_hint(), Some("C"));

        type_text(&mut app, "x", now);
        assert_eq!(app.composer_hint(), None);
    }

    #[test]
    fn test_help_and_quit() {
        let now = Instant::now();
        let mut app = App::new_for_test(now);

        app.handle_action_at(Action::Help, now);
        assert_eq!(app.mode, Mode::Help);
        app.handle_action_at(Action::Insert('a'), now);
        assert_eq!(app.mode, Mode::Compose);
        assert!(app.input.is_empty());

        app.handle_action_at(Action::Quit, now);
        assert!(app.should_quit);
    }
}
