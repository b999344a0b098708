//! Classification result attached to every message

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::Emotion;
use crate::KEYWORD_DELIMITER;

/// Output of one classification call; immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    /// Winning category
    pub emotion: Emotion,
    /// Glyph copied from the winning table entry
    pub emoji: String,
    /// 0.3-0.9 for analysed text, 0.5 for empty input; 2 decimals
    pub confidence: f64,
    /// Table keywords that contributed to the winner (empty if negated)
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl EmotionResult {
    /// Create a new result
    pub fn new(
        emotion: Emotion,
        emoji: impl Into<String>,
        confidence: f64,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            emotion,
            emoji: emoji.into(),
            confidence,
            keywords,
        }
    }

    /// Rebuild a result from loose annotation fields.
    ///
    /// Returns `None` when the annotation cannot be trusted: unknown label,
    /// missing emoji, or a confidence that is not a finite value in [0, 1].
    /// Callers re-classify the raw text in that case.
    pub fn from_annotation(
        emotion: Option<&str>,
        emoji: Option<&str>,
        confidence: Option<f64>,
        keywords: Vec<String>,
    ) -> Option<Self> {
        let emotion = Emotion::from_label(emotion?)?;
        let emoji = emoji.filter(|e| !e.trim().is_empty())?;
        let confidence = confidence.filter(|c| c.is_finite() && (0.0..=1.0).contains(c))?;
        Some(Self::new(emotion, emoji, confidence, keywords))
    }

    /// Keywords as a single delimited column
    pub fn keywords_joined(&self) -> String {
        join_keywords(&self.keywords)
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.emotion.terminal_color();
        format!(
            "{} {} | confidence={:.0}% | keywords=[{}]",
            self.emoji,
            self.emotion.label().color(color).bold(),
            self.confidence * 100.0,
            self.keywords.join(", ")
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "emotion={} | confidence={:.2} | keywords={}",
            self.emotion,
            self.confidence,
            self.keywords_joined()
        )
    }
}

/// Join keywords with the storage delimiter
pub fn join_keywords(keywords: &[String]) -> String {
    let mut buf = [0u8; 4];
    keywords.join(KEYWORD_DELIMITER.encode_utf8(&mut buf))
}

/// Split a stored keyword column back into an ordered list
pub fn split_keywords(joined: &str) -> Vec<String> {
    joined
        .split(KEYWORD_DELIMITER)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_column() {
        let result = EmotionResult::new(
            Emotion::Marah,
            "😠",
            0.8,
            vec!["marah".to_string(), "kesal".to_string()],
        );
        assert_eq!(result.keywords_joined(), "marah,kesal");
        assert_eq!(split_keywords("marah, kesal"), vec!["marah", "kesal"]);
        assert!(split_keywords("").is_empty());
        assert_eq!(split_keywords("terima kasih,,"), vec!["terima kasih"]);
    }

    #[test]
    fn test_from_annotation_accepts_well_formed() {
        let result =
            EmotionResult::from_annotation(Some("sedih"), Some("😢"), Some(0.45), vec![]).unwrap();
        assert_eq!(result.emotion, Emotion::Sedih);
        assert_eq!(result.confidence, 0.45);
    }

    #[test]
    fn test_from_annotation_rejects_malformed() {
        let rejected = |emotion, emoji, confidence| {
            EmotionResult::from_annotation(emotion, emoji, confidence, vec![]).is_none()
        };
        assert!(rejected(None, Some("😢"), Some(0.4)));
        assert!(rejected(Some("bingung"), Some("😢"), Some(0.4)));
        assert!(rejected(Some("sedih"), None, Some(0.4)));
        assert!(rejected(Some("sedih"), Some(" "), Some(0.4)));
        assert!(rejected(Some("sedih"), Some("😢"), None));
        assert!(rejected(Some("sedih"), Some("😢"), Some(f64::NAN)));
        assert!(rejected(Some("sedih"), Some("😢"), Some(1.5)));
    }

    #[test]
    fn test_json_shape() {
        let result = EmotionResult::new(Emotion::Senang, "😊", 0.9, vec!["senang".to_string()]);
        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["emotion"], "senang");
        assert_eq!(json["emoji"], "😊");
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["keywords"][0], "senang");
    }

    #[test]
    fn test_parseable_output() {
        let result = EmotionResult::new(Emotion::Netral, "😐", 0.3, vec![]);
        assert_eq!(result.to_parseable_string(), "emotion=netral | confidence=0.30 | keywords=");
    }
}
