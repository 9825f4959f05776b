//! Speaker styling

use std::collections::HashMap;

use crossterm::style::Color;

/// Colour used for speakers without an explicit style
pub const DEFAULT_SPEAKER_COLOR: Color = Color::Grey;

/// Display style for one speaker's prompt name and dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerStyle {
    pub color: Color,
    pub bold: bool,
}

impl SpeakerStyle {
    pub const fn new(color: Color) -> Self {
        Self { color, bold: true }
    }
}

impl Default for SpeakerStyle {
    fn default() -> Self {
        Self::new(DEFAULT_SPEAKER_COLOR)
    }
}

/// Speaker name to style lookup with a fallback
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    styles: HashMap<String, SpeakerStyle>,
    fallback: SpeakerStyle,
}

impl Palette {
    /// A palette with no named speakers
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
            fallback: SpeakerStyle::default(),
        }
    }

    /// Assign a colour to a speaker, replacing any previous one
    pub fn insert(&mut self, speaker: &str, color: Color) {
        self.styles
            .insert(speaker.to_string(), SpeakerStyle::new(color));
    }

    /// Style for `speaker`, falling back to the default style
    pub fn style_for(&self, speaker: &str) -> SpeakerStyle {
        self.styles.get(speaker).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> SpeakerStyle {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut palette = Self::empty();
        palette.insert("ArgoCD", Color::DarkCyan);
        palette.insert("Teleport", Color::DarkMagenta);
        palette.insert(crate::transcript::UNKNOWN_SPEAKER, DEFAULT_SPEAKER_COLOR);
        palette
    }
}

/// Parse a colour name such as `cyan`, `dark_magenta` or `grey`
pub fn parse_color(name: &str) -> Option<Color> {
    let normalized = name.trim().to_lowercase().replace(['-', ' '], "_");
    Color::try_from(normalized.as_str()).ok()
}
