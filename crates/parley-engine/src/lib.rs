//! parley-engine: Headless core for the parley direct-message screen
//!
//! This crate holds everything that does not need a terminal:
//! - Message model and its invariants
//! - Composer placeholder animation
//! - Conversation log, draft text, and the staged attachment
//! - Configuration and the seed conversation

pub mod attachment;
pub mod config;
pub mod ids;
pub mod message;
pub mod placeholder;
pub mod seed;
pub mod store;

// Re-export commonly used types
pub use attachment::{
    guess_content_type, AttachmentError, BlobRegistry, DraftAttachment, MediaResolver,
    SelectedFile,
};
pub use config::{Config, ConfigError};
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIds};
pub use message::{Media, MediaKind, MediaUrl, Message, MessageError, MessageId, Reaction};
pub use placeholder::{
    AnimatedPlaceholder, PlaceholderConfig, PlaceholderCycler, PlaceholderError,
    PlaceholderPhase, PlaceholderTimer, CAPTION_PROMPT, DEFAULT_PROMPTS,
};
pub use seed::{default_conversation, load_seed, SeedError};
pub use store::{AttachOutcome, ConversationStore};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
