//! Conversation pane: the message list and the composer under it.

mod composer;
mod message_list;
mod placeholder;

pub use composer::{composer_height, Composer, MAX_COMPOSER_LINES};
pub use message_list::{MessageList, MessageListState, MAX_CARD_WIDTH, SCROLL_STEP};
pub use placeholder::composer_hint;
