//! UI module for the parley TUI.

pub mod layout;
pub mod widgets;

pub use layout::*;
pub use widgets::*;
