//! Catppuccin color palettes for the chat screen.

use ratatui::style::{Color, Modifier, Style};

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub link: Color,
    pub reaction: Color,

    // Semantic
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244
            overlay: Color::Rgb(69, 71, 90),    // #45475a

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(180, 190, 254),  // #b4befe (lavender)
            link: Color::Rgb(137, 180, 250),     // #89b4fa (blue)
            reaction: Color::Rgb(245, 194, 231), // #f5c2e7 (pink)

            error: Color::Rgb(243, 139, 168), // #f38ba8 (red)

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(230, 233, 239), // #e6e9ef
            overlay: Color::Rgb(220, 224, 232), // #dce0e8

            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            primary: Color::Rgb(114, 135, 253),  // #7287fd (lavender)
            link: Color::Rgb(30, 102, 245),      // #1e66f5 (blue)
            reaction: Color::Rgb(234, 118, 203), // #ea76cb (pink)

            error: Color::Rgb(210, 15, 57), // #d20f39 (red)

            border: Color::Rgb(188, 192, 204),         // #bcc0cc
            border_focused: Color::Rgb(114, 135, 253), // #7287fd (lavender)
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),
            overlay: Color::Rgb(40, 40, 40),

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,
            link: Color::LightBlue,
            reaction: Color::Magenta,

            error: Color::Red,

            border: Color::White,
            border_focused: Color::Cyan,
        }
    }

    /// Look up a theme by name (`mocha`, `latte`, `high-contrast`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mocha" | "dark" => Some(Self::mocha()),
            "latte" | "light" => Some(Self::latte()),
            "high-contrast" | "high_contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    // === Derived styles ===

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.base)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted).bg(self.base)
    }

    /// Message card body.
    pub fn card_style(&self) -> Style {
        Style::default().fg(self.subtext).bg(self.surface)
    }

    /// URL inside a link card.
    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link)
            .bg(self.surface)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Reaction badge.
    pub fn badge_style(&self) -> Style {
        Style::default().fg(self.reaction).bg(self.overlay)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.base)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border).bg(self.base)
    }
}
