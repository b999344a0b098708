//! Aggregate sentiment statistics
//!
//! Built from already-tagged messages. The classifier is never re-run here;
//! `.emotion` is trusted as computed at ingestion.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::types::{ChatMessage, Emotion};

/// Running tally of emotion labels
#[derive(Debug, Clone, Default)]
pub struct EmotionStats {
    counts: [usize; Emotion::COUNT],
    confidence_sum: f64,
    users: HashSet<String>,
}

impl EmotionStats {
    /// Empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a batch of messages
    pub fn from_messages<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a ChatMessage>,
    {
        let mut stats = Self::new();
        for message in messages {
            stats.record(message);
        }
        stats
    }

    /// Add one message to the tally
    pub fn record(&mut self, message: &ChatMessage) {
        self.counts[message.emotion.emotion.index()] += 1;
        self.confidence_sum += message.emotion.confidence;
        self.users.insert(message.user_id.clone());
    }

    /// Messages tagged with `emotion`
    pub fn count(&self, emotion: Emotion) -> usize {
        self.counts[emotion.index()]
    }

    /// Total messages tallied
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Share of `emotion` as a rounded whole percentage
    pub fn percentage(&self, emotion: Emotion) -> u32 {
        percent(self.count(emotion) as f64, self.total())
    }

    /// Category with the strictly greatest count.
    ///
    /// Scanned in declaration order from `netral` at zero, so ties keep
    /// the earlier category and an empty tally yields `netral`.
    pub fn dominant(&self) -> Emotion {
        let mut dominant = Emotion::Netral;
        let mut best = 0;
        for emotion in Emotion::ALL {
            let count = self.count(emotion);
            if count > best {
                best = count;
                dominant = emotion;
            }
        }
        dominant
    }

    /// senang + semangat share, fraction 0.0-1.0
    pub fn positive_share(&self) -> f64 {
        self.share(|e| e.is_positive())
    }

    /// marah + sedih + takut share, fraction 0.0-1.0
    pub fn negativity_ratio(&self) -> f64 {
        self.share(|e| e.is_negative())
    }

    /// Positive share as a rounded whole percentage
    pub fn positivity_ratio(&self) -> u32 {
        (self.positive_share() * 100.0).round() as u32
    }

    /// Mean confidence as a rounded whole percentage
    pub fn average_confidence(&self) -> u32 {
        percent(self.confidence_sum, self.total())
    }

    /// Distinct senders
    pub fn unique_users(&self) -> usize {
        self.users.len()
    }

    /// Non-zero counts keyed by label
    pub fn counts(&self) -> BTreeMap<String, usize> {
        Emotion::ALL
            .iter()
            .filter(|e| self.count(**e) > 0)
            .map(|e| (e.label().to_string(), self.count(*e)))
            .collect()
    }

    /// Serializable snapshot for the API
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            total: self.total(),
            counts: self.counts(),
            dominant: self.dominant(),
            dominant_emoji: self.dominant().emoji().to_string(),
            positivity_ratio: self.positivity_ratio(),
            average_confidence: self.average_confidence(),
            unique_users: self.unique_users(),
        }
    }

    fn share<F: Fn(&Emotion) -> bool>(&self, pred: F) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let matching: usize = Emotion::ALL
            .iter()
            .filter(|e| pred(e))
            .map(|e| self.count(*e))
            .sum();
        matching as f64 / total as f64
    }
}

fn percent(part: f64, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part / total as f64 * 100.0).round() as u32
}

/// Statistics as served by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
    pub dominant: Emotion,
    pub dominant_emoji: String,
    pub positivity_ratio: u32,
    pub average_confidence: u32,
    pub unique_users: usize,
}
