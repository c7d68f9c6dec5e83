//! Conversation log and composer draft.
//!
//! [`ConversationStore`] owns the append-only message log, the draft text,
//! and the single staged attachment. Only [`select_attachment`],
//! [`remove_attachment`] and [`send`] touch the staged slot.
//!
//! Media URLs are resolved once per selection and released at most once:
//! on replacement, on removal, or when the store is dropped. Sending moves
//! the staged URL into the new message without releasing it.
//!
//! [`select_attachment`]: ConversationStore::select_attachment
//! [`remove_attachment`]: ConversationStore::remove_attachment
//! [`send`]: ConversationStore::send

use tracing::{debug, warn};

use crate::attachment::{AttachmentError, BlobRegistry, DraftAttachment, MediaResolver, SelectedFile};
use crate::ids::{Clock, IdGenerator, SystemClock, UuidIds};
use crate::message::{MediaUrl, Message};

/// Result of a [`ConversationStore::select_attachment`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// No file was given; nothing changed.
    Ignored,
    /// The file is now staged.
    Staged,
    /// The file is now staged and the previous attachment was released.
    Replaced { previous: MediaUrl },
}

/// Message log plus the in-progress draft for one chat screen.
pub struct ConversationStore<R: MediaResolver = BlobRegistry> {
    messages: Vec<Message>,
    draft: String,
    staged: Option<DraftAttachment>,
    /// URLs handed over to sent messages; released when the store goes away.
    transferred: Vec<MediaUrl>,
    resolver: R,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    scroll_requested: bool,
}

impl ConversationStore<BlobRegistry> {
    /// Empty store backed by an in-memory [`BlobRegistry`].
    pub fn in_memory() -> Self {
        Self::new(BlobRegistry::new())
    }
}

impl<R: MediaResolver> ConversationStore<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            messages: Vec::new(),
            draft: String::new(),
            staged: None,
            transferred: Vec::new(),
            resolver,
            ids: Box::new(UuidIds),
            clock: Box::new(SystemClock),
            scroll_requested: false,
        }
    }

    /// Seed the log with historical messages.
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    #[must_use]
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn draft_text(&self) -> &str {
        &self.draft
    }

    pub fn staged(&self) -> Option<&DraftAttachment> {
        self.staged.as_ref()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Stage a selected file, replacing any attachment already staged.
    ///
    /// The previous attachment is released before the new file is resolved.
    /// If resolving fails, the slot is left empty.
    pub fn select_attachment(
        &mut self,
        file: Option<SelectedFile>,
    ) -> Result<AttachOutcome, AttachmentError> {
        let Some(file) = file else {
            return Ok(AttachOutcome::Ignored);
        };

        let previous = self.staged.take().map(|old| {
            let url = old.url().clone();
            self.release(&url);
            debug!(previous = %url, replacement = file.name(), "Replacing staged attachment");
            url
        });

        let url = self.resolver.resolve(&file)?;
        debug!(url = %url, file = file.name(), "Staged attachment");
        self.staged = Some(DraftAttachment::new(url, file));

        Ok(match previous {
            Some(previous) => AttachOutcome::Replaced { previous },
            None => AttachOutcome::Staged,
        })
    }

    /// Release and clear the staged attachment. Returns `false` if nothing
    /// was staged.
    pub fn remove_attachment(&mut self) -> bool {
        match self.staged.take() {
            Some(old) => {
                self.release(old.url());
                true
            }
            None => false,
        }
    }

    /// Replace the draft text verbatim.
    pub fn update_draft_text(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether [`send`](Self::send) would append a message.
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty() || self.staged.is_some()
    }

    /// Commit the draft as a new message.
    ///
    /// Returns `None` and changes nothing when there is nothing to send.
    pub fn send(&mut self) -> Option<&Message> {
        if !self.can_send() {
            return None;
        }

        let media = self.staged.as_ref().map(DraftAttachment::to_media);
        let message = match Message::compose(
            self.ids.next_id(),
            self.draft.trim().to_string(),
            media,
            self.clock.now_millis(),
        ) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Draft could not be turned into a message");
                return None;
            }
        };

        // The URL now belongs to the message; do not release it
        if let Some(sent) = self.staged.take() {
            self.transferred.push(sent.url().clone());
        }
        self.draft.clear();
        self.scroll_requested = true;

        debug!(id = %message.id(), "Sent message");
        self.messages.push(message);
        self.messages.last()
    }

    /// Consume the scroll-to-latest signal raised by a successful send.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    fn release(&mut self, url: &MediaUrl) {
        if let Err(e) = self.resolver.release(url) {
            warn!(url = %url, error = %e, "Failed to release media");
        }
    }
}

impl<R: MediaResolver> Drop for ConversationStore<R> {
    fn drop(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.release(staged.url());
        }
        for url in std::mem::take(&mut self.transferred) {
            self.release(&url);
        }
    }
}

impl<R: MediaResolver> std::fmt::Debug for ConversationStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("messages", &self.messages.len())
            .field("draft", &self.draft)
            .field("staged", &self.staged)
            .field("scroll_requested", &self.scroll_requested)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{FixedClock, SequentialIds};
    use crate::message::{Media, MediaKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Resolver that records every call in a log shared with the test.
    #[derive(Default, Clone)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
        inner: Rc<RefCell<BlobRegistry>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn released(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| c.strip_prefix("release ").map(str::to_string))
                .collect()
        }

        fn live_count(&self) -> usize {
            self.inner.borrow().live_count()
        }
    }

    impl MediaResolver for Recorder {
        fn resolve(&mut self, file: &SelectedFile) -> Result<MediaUrl, AttachmentError> {
            let url = self.inner.borrow_mut().resolve(file)?;
            self.calls.borrow_mut().push(format!("resolve {url}"));
            Ok(url)
        }

        fn release(&mut self, url: &MediaUrl) -> Result<(), AttachmentError> {
            self.calls.borrow_mut().push(format!("release {url}"));
            self.inner.borrow_mut().release(url)
        }
    }

    fn png() -> Option<SelectedFile> {
        Some(SelectedFile::new("photo.png", "image/png"))
    }

    fn mp4() -> Option<SelectedFile> {
        Some(SelectedFile::new("clip.mp4", "video/mp4"))
    }

    fn store() -> (ConversationStore<Recorder>, Recorder) {
        let recorder = Recorder::default();
        let store = ConversationStore::new(recorder.clone())
            .with_ids(SequentialIds::new("m"))
            .with_clock(FixedClock(1_700_000_000_000));
        (store, recorder)
    }

    #[test]
    fn test_send_trims_text() {
        let (mut store, _) = store();
        store.update_draft_text("  hello  ");

        let sent = store.send().unwrap().clone();
        assert_eq!(sent.text(), Some("hello"));
        assert!(sent.media().is_none());
        assert_eq!(sent.timestamp(), Some(1_700_000_000_000));
        assert_eq!(sent.id().as_str(), "m1");
        assert_eq!(store.draft_text(), "");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_send_media_only_transfers_url() {
        let (mut store, recorder) = store();
        assert_eq!(store.select_attachment(png()).unwrap(), AttachOutcome::Staged);
        assert_eq!(store.staged().unwrap().url().as_str(), "blob:1");

        let sent = store.send().unwrap().clone();
        assert_eq!(sent.text(), Some(""));
        assert_eq!(
            sent.media().unwrap(),
            &[Media::new(MediaUrl::new("blob:1"), MediaKind::Image)]
        );
        assert!(store.staged().is_none());
        assert!(recorder.released().is_empty());
        assert_eq!(recorder.live_count(), 1);
    }

    #[test]
    fn test_send_is_inert_without_content() {
        let (mut store, _) = store();
        assert!(!store.can_send());
        assert!(store.send().is_none());

        store.update_draft_text(" \n\t ");
        assert!(!store.can_send());
        assert!(store.send().is_none());
        assert_eq!(store.len(), 0);
        // Whitespace draft is left untouched by an inert send
        assert_eq!(store.draft_text(), " \n\t ");
        assert!(!store.take_scroll_request());
    }

    #[test]
    fn test_can_send_with_attachment_and_blank_text() {
        let (mut store, _) = store();
        store.update_draft_text("   ");
        store.select_attachment(mp4()).unwrap();
        assert!(store.can_send());

        let sent = store.send().unwrap();
        assert_eq!(sent.text(), Some(""));
        assert_eq!(sent.media().unwrap()[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_send_text_and_media_clears_both() {
        let (mut store, _) = store();
        store.update_draft_text("look");
        store.select_attachment(png()).unwrap();

        let before = store.len();
        store.send().unwrap();
        assert_eq!(store.len(), before + 1);
        assert_eq!(store.draft_text(), "");
        assert!(store.staged().is_none());
        let last = store.messages().last().unwrap();
        assert_eq!(last.text(), Some("look"));
        assert_eq!(last.media().unwrap().len(), 1);
    }

    #[test]
    fn test_select_absent_file_is_noop() {
        let (mut store, recorder) = store();
        store.select_attachment(png()).unwrap();

        assert_eq!(store.select_attachment(None).unwrap(), AttachOutcome::Ignored);
        assert_eq!(store.staged().unwrap().url().as_str(), "blob:1");
        assert_eq!(recorder.calls(), ["resolve blob:1"]);
    }

    #[test]
    fn test_replacement_releases_old_before_resolving_new() {
        let (mut store, recorder) = store();
        store.select_attachment(png()).unwrap();

        let outcome = store.select_attachment(mp4()).unwrap();
        assert_eq!(
            outcome,
            AttachOutcome::Replaced {
                previous: MediaUrl::new("blob:1")
            }
        );
        assert_eq!(
            recorder.calls(),
            ["resolve blob:1", "release blob:1", "resolve blob:2"]
        );
        assert_eq!(store.staged().unwrap().kind(), MediaKind::Video);
        assert_eq!(recorder.live_count(), 1);
    }

    #[test]
    fn test_many_selections_keep_one_live_handle() {
        let (mut store, recorder) = store();
        for i in 0..10 {
            let file = if i % 2 == 0 { png() } else { mp4() };
            store.select_attachment(file).unwrap();
            assert_eq!(recorder.live_count(), 1);
        }

        let released = recorder.released();
        assert_eq!(released.len(), 9);
        let unique: std::collections::HashSet<_> = released.iter().collect();
        assert_eq!(unique.len(), 9, "no URL may be released twice");
    }

    #[test]
    fn test_remove_attachment() {
        let (mut store, recorder) = store();
        assert!(!store.remove_attachment());

        store.select_attachment(png()).unwrap();
        assert!(store.remove_attachment());
        assert!(store.staged().is_none());
        assert_eq!(recorder.released(), ["blob:1"]);

        assert!(!store.remove_attachment());
        assert_eq!(recorder.released(), ["blob:1"]);
    }

    #[test]
    fn test_update_draft_is_verbatim() {
        let (mut store, _) = store();
        store.update_draft_text("  keep  spaces ");
        assert_eq!(store.draft_text(), "  keep  spaces ");
    }

    #[test]
    fn test_log_is_append_only_in_send_order() {
        let seeded = Message::builder("1").text("seed").build().unwrap();
        let (store, _) = store();
        let mut store = store.with_messages(vec![seeded.clone()]);

        for text in ["one", "two", "three"] {
            store.update_draft_text(text);
            store.send().unwrap();
        }

        let texts: Vec<_> = store.messages().iter().filter_map(Message::text).collect();
        assert_eq!(texts, ["seed", "one", "two", "three"]);
        assert_eq!(store.messages()[0], seeded);
        let ids: Vec<_> = store.messages().iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, ["1", "m1", "m2", "m3"]);
    }

    #[test]
    fn test_scroll_request_raised_once_per_send() {
        let (mut store, _) = store();
        store.update_draft_text("hi");
        store.send();

        assert!(store.take_scroll_request());
        assert!(!store.take_scroll_request());
    }

    #[test]
    fn test_drop_releases_staged_and_sent_media() {
        let (mut store, recorder) = store();
        store.select_attachment(png()).unwrap();
        store.send();
        store.select_attachment(mp4()).unwrap();
        assert!(recorder.released().is_empty());

        drop(store);
        let mut released = recorder.released();
        released.sort();
        assert_eq!(released, ["blob:1", "blob:2"]);
        assert_eq!(recorder.live_count(), 0);
    }

    #[test]
    fn test_in_memory_store_uses_blob_registry() {
        let mut store = ConversationStore::in_memory();
        store.select_attachment(png()).unwrap();
        assert_eq!(store.resolver().live_count(), 1);
        assert!(store.remove_attachment());
        assert_eq!(store.resolver().live_count(), 0);
    }
}
