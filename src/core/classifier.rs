//! Emotion classifier: keyword scoring with negation and confidence
//!
//! Every input yields a result; there is no error path.

use std::sync::Arc;
use tracing::trace;

use crate::core::lexicon::KeywordTable;
use crate::types::{Emotion, EmotionResult};
use crate::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR, EMPTY_CONFIDENCE, WORD_DILUTION};

/// Where the classifier's table lives
#[derive(Debug, Clone)]
enum TableRef {
    Static(&'static KeywordTable),
    Shared(Arc<KeywordTable>),
}

/// Keyword-scoring emotion classifier
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    table: TableRef,
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new(KeywordTable::standard())
    }
}

impl EmotionClassifier {
    /// Classifier over a process-wide table
    pub fn new(table: &'static KeywordTable) -> Self {
        Self {
            table: TableRef::Static(table),
        }
    }

    /// Classifier over an owned alternate table
    pub fn with_table(table: Arc<KeywordTable>) -> Self {
        Self {
            table: TableRef::Shared(table),
        }
    }

    /// The table in use
    pub fn table(&self) -> &KeywordTable {
        match &self.table {
            TableRef::Static(table) => *table,
            TableRef::Shared(table) => table.as_ref(),
        }
    }

    /// Classify a piece of text
    pub fn classify(&self, text: &str) -> EmotionResult {
        let table = self.table();

        // Nothing to analyse
        if is_blank(text) {
            return EmotionResult::new(
                Emotion::Netral,
                table.emoji(Emotion::Netral),
                EMPTY_CONFIDENCE,
                Vec::new(),
            );
        }

        let lower = text.to_lowercase();

        // Score every category; one hit per keyword entry, not per occurrence
        let mut winner = Emotion::Netral;
        let mut max_score = 0.0;
        let mut matched: Vec<&str> = Vec::new();

        for entry in table.entries() {
            let mut score = 0.0;
            let mut hits: Vec<&str> = Vec::new();
            for keyword in &entry.keywords {
                if lower.contains(keyword.lowered.as_str()) {
                    score += entry.weight;
                    hits.push(keyword.literal.as_str());
                }
            }
            // Strictly greater: ties keep the earlier category
            if score > max_score {
                max_score = score;
                winner = entry.emotion;
                matched = hits;
            }
        }

        // "tidak marah", "nggak sedih", ... cancel the label but not the score
        let negated = winner != Emotion::Netral
            && !matched.is_empty()
            && table.entries()[winner.index()]
                .keywords
                .iter()
                .filter(|k| matched.contains(&k.literal.as_str()))
                .any(|k| k.negation.is_match(text));

        if negated {
            winner = Emotion::Netral;
            matched.clear();
        }

        let confidence = confidence(max_score, word_count(text));

        trace!(emotion = %winner, confidence, negated, "classified");

        EmotionResult::new(
            winner,
            table.emoji(winner),
            confidence,
            matched.into_iter().map(String::from).collect(),
        )
    }

    /// Quick classify - just return the label
    pub fn quick_classify(&self, text: &str) -> Emotion {
        self.classify(text).emotion
    }
}

/// Classify with the shipped table
pub fn detect_emotion(text: &str) -> EmotionResult {
    EmotionClassifier::default().classify(text)
}

/// Only ECMAScript whitespace: U+FEFF counts, U+0085 does not
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| {
        matches!(
            c,
            '\u{9}'..='\u{d}'
                | ' '
                | '\u{a0}'
                | '\u{1680}'
                | '\u{2000}'..='\u{200a}'
                | '\u{2028}'
                | '\u{2029}'
                | '\u{202f}'
                | '\u{205f}'
                | '\u{3000}'
                | '\u{feff}'
        )
    })
}

/// Segments between single spaces, as counted for dilution
fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// score / max(1, words * 0.5), clamped to [0.3, 0.9], 2 decimals
fn confidence(score: f64, words: usize) -> f64 {
    let raw = score / (words as f64 * WORD_DILUTION).max(1.0);
    let clamped = raw.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);
    (clamped * 100.0).round() / 100.0
}

/// Style token (text + background) for a label; unknown labels get netral's
pub fn color_for_emotion(label: &str) -> &'static str {
    match Emotion::from_label(label).unwrap_or(Emotion::Netral) {
        Emotion::Senang => "text-green-600 bg-green-50",
        Emotion::Semangat => "text-blue-600 bg-blue-50",
        Emotion::Marah => "text-red-600 bg-red-50",
        Emotion::Sedih => "text-purple-600 bg-purple-50",
        Emotion::Takut => "text-yellow-600 bg-yellow-50",
        Emotion::Terkejut => "text-pink-600 bg-pink-50",
        Emotion::Netral => "text-gray-600 bg-gray-50",
    }
}

/// Background gradient token for a label; unknown labels get netral's
pub fn gradient_for_emotion(label: &str) -> &'static str {
    match Emotion::from_label(label).unwrap_or(Emotion::Netral) {
        Emotion::Senang => "from-green-100 to-emerald-50",
        Emotion::Semangat => "from-blue-100 to-cyan-50",
        Emotion::Marah => "from-red-100 to-orange-50",
        Emotion::Sedih => "from-purple-100 to-indigo-50",
        Emotion::Takut => "from-yellow-100 to-amber-50",
        Emotion::Terkejut => "from-pink-100 to-rose-50",
        Emotion::Netral => "from-gray-100 to-slate-50",
    }
}

// =============================================================================
// TESTS
// =============================================================================
