//! Hint text shown in the empty composer.

use parley_engine::CAPTION_PROMPT;

/// Pick the composer hint.
///
/// No hint once the user has typed anything. With media staged the hint asks
/// for a caption; otherwise it shows the animated prompt.
#[must_use]
pub fn composer_hint<'a>(draft: &str, has_staged: bool, animated: &'a str) -> Option<&'a str> {
    if !draft.is_empty() {
        None
    } else if has_staged {
        Some(CAPTION_PROMPT)
    } else {
        Some(animated)
    }
}
