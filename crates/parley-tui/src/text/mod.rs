//! Text measurement and wrapping for message cards.

mod width;
mod wrap;

pub use width::{pad_to_width, truncate_to_width, visual_width};
pub use wrap::{find_urls, wrap_text};
