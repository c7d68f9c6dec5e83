//! Message model for the conversation log.
//!
//! A [`Message`] is immutable once built. Every message carries non-empty
//! text or at least one media item, and reaction emoji are unique per
//! message. Both rules are checked at construction time, including when
//! messages are deserialized from a seed file.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a message would break the log's invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("message id must not be empty")]
    MissingId,

    #[error("message {0} has neither text nor media")]
    Empty(String),

    #[error("message {0} has an empty media list")]
    EmptyMedia(String),

    #[error("message {id} repeats reaction {emoji}")]
    DuplicateReaction { id: String, emoji: String },
}

/// Kind of media attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Derive the kind from a declared content type.
    ///
    /// `image/*` maps to [`MediaKind::Image`]; everything else is treated as
    /// video.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
        {
            Self::Image
        } else {
            Self::Video
        }
    }

    /// Short label used when rendering media in a terminal.
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// A locally resolvable reference to attached media bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaUrl(String);

impl MediaUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One media item referenced by a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: MediaUrl,
    pub kind: MediaKind,
}

impl Media {
    pub fn new(url: MediaUrl, kind: MediaKind) -> Self {
        Self { url, kind }
    }
}

/// An emoji reaction shown under a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl Reaction {
    pub fn new(emoji: impl Into<String>, count: Option<u32>) -> Self {
        Self {
            emoji: emoji.into(),
            count,
        }
    }
}

/// Unique message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMessage")]
pub struct Message {
    id: MessageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<Vec<Media>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reactions: Vec<Reaction>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    has_link: bool,
}

impl Message {
    /// Start building a message with the given id.
    pub fn builder(id: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(MessageId::new(id))
    }

    /// Build a user-composed message at send time.
    ///
    /// `text` is stored as given (already trimmed by the caller) and may be
    /// empty only when `media` is present.
    pub fn compose(
        id: MessageId,
        text: String,
        media: Option<Media>,
        timestamp: i64,
    ) -> Result<Self, MessageError> {
        MessageBuilder {
            id,
            text: Some(text),
            media: media.map(|m| vec![m]),
            date: None,
            timestamp: Some(timestamp),
            reactions: Vec::new(),
            has_link: false,
        }
        .build()
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn media(&self) -> Option<&[Media]> {
        self.media.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn has_link(&self) -> bool {
        self.has_link
    }

    /// Text to display, treating an empty string as absent.
    pub fn visible_text(&self) -> Option<&str> {
        self.text().filter(|t| !t.is_empty())
    }
}

/// Builder for [`Message`]; validation happens in [`MessageBuilder::build`].
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    id: MessageId,
    text: Option<String>,
    media: Option<Vec<Media>>,
    date: Option<String>,
    timestamp: Option<i64>,
    reactions: Vec<Reaction>,
    has_link: bool,
}

impl MessageBuilder {
    fn new(id: MessageId) -> Self {
        Self {
            id,
            text: None,
            media: None,
            date: None,
            timestamp: None,
            reactions: Vec::new(),
            has_link: false,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn media(mut self, media: Media) -> Self {
        self.media.get_or_insert_with(Vec::new).push(media);
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, millis: i64) -> Self {
        self.timestamp = Some(millis);
        self
    }

    #[must_use]
    pub fn reaction(mut self, emoji: impl Into<String>, count: Option<u32>) -> Self {
        self.reactions.push(Reaction::new(emoji, count));
        self
    }

    #[must_use]
    pub fn link(mut self) -> Self {
        self.has_link = true;
        self
    }

    pub fn build(self) -> Result<Message, MessageError> {
        if self.id.as_str().is_empty() {
            return Err(MessageError::MissingId);
        }

        if matches!(&self.media, Some(media) if media.is_empty()) {
            return Err(MessageError::EmptyMedia(self.id.to_string()));
        }

        let has_text = self.text.as_deref().is_some_and(|t| !t.is_empty());
        if !has_text && self.media.is_none() {
            return Err(MessageError::Empty(self.id.to_string()));
        }

        let mut seen = HashSet::new();
        for reaction in &self.reactions {
            if !seen.insert(reaction.emoji.as_str()) {
                return Err(MessageError::DuplicateReaction {
                    id: self.id.to_string(),
                    emoji: reaction.emoji.clone(),
                });
            }
        }

        Ok(Message {
            id: self.id,
            text: self.text,
            media: self.media,
            date: self.date,
            timestamp: self.timestamp,
            reactions: self.reactions,
            has_link: self.has_link,
        })
    }
}

/// Unvalidated wire shape of a message.
#[derive(Deserialize)]
struct RawMessage {
    id: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    media: Option<Vec<Media>>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    reactions: Vec<Reaction>,
    #[serde(default, alias = "hasLink")]
    has_link: bool,
}

impl TryFrom<RawMessage> for Message {
    type Error = MessageError;

    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        MessageBuilder {
            id: MessageId::new(raw.id),
            text: raw.text,
            media: raw.media,
            date: raw.date,
            timestamp: raw.timestamp,
            reactions: raw.reactions,
            has_link: raw.has_link,
        }
        .build()
    }
}
