//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons (richest, needs a patched font).
    Nerd,
    /// Standard Unicode symbols (wide compatibility).
    #[default]
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Parse a mode name (`nerd`, `unicode`, `ascii`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nerd" => Some(Self::Nerd),
            "unicode" => Some(Self::Unicode),
            "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    // === Header ===

    pub fn back(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰅁",
            IconMode::Unicode => "‹",
            IconMode::Ascii => "<",
        }
    }

    // === Composer ===

    pub fn attach(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰏢",
            IconMode::Unicode => "⊕",
            IconMode::Ascii => "[+]",
        }
    }

    pub fn send(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰁝",
            IconMode::Unicode => "↑",
            IconMode::Ascii => "[^]",
        }
    }

    pub fn remove(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰅖",
            IconMode::Unicode => "✕",
            IconMode::Ascii => "[x]",
        }
    }

    // === Messages ===

    pub fn image(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰋩",
            IconMode::Unicode => "▣",
            IconMode::Ascii => "[img]",
        }
    }

    pub fn video(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰕧",
            IconMode::Unicode => "▶",
            IconMode::Ascii => "[vid]",
        }
    }

    pub fn add_reaction(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰱱",
            IconMode::Unicode => "☺+",
            IconMode::Ascii => ":)+",
        }
    }

    pub fn help(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰋖",
            IconMode::Unicode => "?",
            IconMode::Ascii => "?",
        }
    }
}
