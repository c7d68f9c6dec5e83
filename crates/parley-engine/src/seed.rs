//! Historical messages the conversation starts with.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::message::{Message, MessageError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid message: {0}")]
    Message(#[from] MessageError),

    #[error("Duplicate message id: {0}")]
    DuplicateId(String),
}

/// The built-in conversation.
pub fn default_conversation() -> Result<Vec<Message>, SeedError> {
    let messages = vec![
        Message::builder("1")
            .text(
                "Different topic - this is a wonderful reminder that \"overnight success stories\" \
                 rarely (never?) exist. I had no idea Varley, one of my favorite brands, has been \
                 around for 10 years. Love seeing them grow ❤",
            )
            .date("Jan 21 11:00PM")
            .build()?,
        Message::builder("2")
            .text(
                "You know, it's funny how we often think success happens overnight. It's a great \
                 reminder that it usually takes years of hard work behind the scenes. I just found \
                 out that Varley, one of my go-to brands, has been hustling for a whole decade! \
                 It's so inspiring to watch their journey unfold ❤",
            )
            .reaction("🔥", Some(12))
            .build()?,
        Message::builder("3")
            .text(
                "Isn't it fascinating how we often overlook the hurdles that creators face on their \
                 journey? It's a crucial reminder that true success is built on perseverance and \
                 hard work. I'm here to support you with tips and insights to navigate these \
                 challenges and thrive in your creative endeavors!",
            )
            .date("Yesterday 11:00PM")
            .reaction("👍", Some(12))
            .reaction("😊", Some(12))
            .reaction("🔥", Some(12))
            .build()?,
        Message::builder("4")
            .text(
                "Creating something special takes time and effort. If you're looking for some \
                 great finds, check out my Amazon link: someproduct.amazon.com. You never know \
                 what inspiration you might discover!",
            )
            .date("Today 11:00PM")
            .build()?,
        Message::builder("5")
            .text(
                "Let's talk about the creative process! It's all about experimenting and finding \
                 your unique style. Speaking of style, check out this cool piece I found at Zara: \
                 http://rstyle.me/+CnhzlmtS5lhipvCxGecF_w",
            )
            .build()?,
        Message::builder("6")
            .text("Shop this link from Zara http://rstyle.me/+CnhzlmtS5lhipvCxGecF_w")
            .date("Today 12:00AM")
            .link()
            .build()?,
    ];
    Ok(messages)
}

/// Load a seed conversation from a JSON array of messages.
pub fn load_seed(path: &Path) -> Result<Vec<Message>, SeedError> {
    let content = std::fs::read_to_string(path)?;
    let messages: Vec<Message> = serde_json::from_str(&content)?;

    let mut ids = HashSet::new();
    for message in &messages {
        if !ids.insert(message.id().as_str()) {
            return Err(SeedError::DuplicateId(message.id().to_string()));
        }
    }
    Ok(messages)
}
