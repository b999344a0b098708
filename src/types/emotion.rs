//! Emotion category definitions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of emotion labels a message can carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// Happy
    Senang,
    /// Motivated
    Semangat,
    /// Angry
    Marah,
    /// Sad
    Sedih,
    /// Afraid
    Takut,
    /// Surprised
    Terkejut,
    /// Neutral, also the fallback when nothing scores
    #[default]
    Netral,
}

impl Emotion {
    /// Number of categories
    pub const COUNT: usize = 7;

    /// All categories in declaration order (scoring and tie-break order)
    pub const ALL: [Emotion; Emotion::COUNT] = [
        Emotion::Senang,
        Emotion::Semangat,
        Emotion::Marah,
        Emotion::Sedih,
        Emotion::Takut,
        Emotion::Terkejut,
        Emotion::Netral,
    ];

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Wire / storage label
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Senang => "senang",
            Emotion::Semangat => "semangat",
            Emotion::Marah => "marah",
            Emotion::Sedih => "sedih",
            Emotion::Takut => "takut",
            Emotion::Terkejut => "terkejut",
            Emotion::Netral => "netral",
        }
    }

    /// Parse a stored label; exact lowercase match only
    pub fn from_label(label: &str) -> Option<Emotion> {
        Emotion::ALL.iter().copied().find(|e| e.label() == label)
    }

    /// Default display glyph
    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Senang => "😊",
            Emotion::Semangat => "💪",
            Emotion::Marah => "😠",
            Emotion::Sedih => "😢",
            Emotion::Takut => "😰",
            Emotion::Terkejut => "😲",
            Emotion::Netral => "😐",
        }
    }

    /// Label with the first letter upper-cased, for reports
    pub fn title(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// senang / semangat
    pub fn is_positive(&self) -> bool {
        matches!(self, Emotion::Senang | Emotion::Semangat)
    }

    /// marah / sedih / takut
    pub fn is_negative(&self) -> bool {
        matches!(self, Emotion::Marah | Emotion::Sedih | Emotion::Takut)
    }

    /// Terminal colour for CLI output
    pub fn terminal_color(&self) -> colored::Color {
        use colored::Color;
        match self {
            Emotion::Senang => Color::Green,
            Emotion::Semangat => Color::Blue,
            Emotion::Marah => Color::Red,
            Emotion::Sedih => Color::Magenta,
            Emotion::Takut => Color::Yellow,
            Emotion::Terkejut => Color::BrightMagenta,
            Emotion::Netral => Color::BrightBlack,
        }
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::from_label(s).ok_or_else(|| format!("unknown emotion: {}", s))
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
