//! Participant reflections: how the room actually felt vs. what was detected

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Emotion;
use crate::{
    ChatError, REFLECTION_ACCURACY_MAX, REFLECTION_ACCURACY_MIN, REFLECTION_DEFAULT_ACCURACY,
    REFLECTION_MIN_FEEDBACK,
};

/// A submitted reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionData {
    /// What the participant says the discussion really felt like
    pub actual_emotion: Emotion,
    /// 1-10 rating of the detector
    pub perceived_accuracy: u8,
    pub feedback: String,
    pub timestamp: DateTime<Utc>,
}

/// Reflection submission as sent by clients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReflection {
    #[serde(default)]
    pub actual_emotion: Option<String>,
    /// Defaults to the middle of the scale when omitted
    #[serde(default)]
    pub perceived_accuracy: Option<i64>,
    #[serde(default)]
    pub feedback: String,
}

impl NewReflection {
    pub fn new(actual_emotion: &str, perceived_accuracy: i64, feedback: &str) -> Self {
        Self {
            actual_emotion: Some(actual_emotion.to_string()),
            perceived_accuracy: Some(perceived_accuracy),
            feedback: feedback.to_string(),
        }
    }

    /// Check the submission and stamp it
    pub fn validate(self, timestamp: DateTime<Utc>) -> Result<ReflectionData, ChatError> {
        let label = self
            .actual_emotion
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .ok_or_else(|| ChatError::InvalidReflection("an emotion must be chosen".into()))?;
        let actual_emotion = Emotion::from_label(label).ok_or_else(|| {
            ChatError::InvalidReflection(format!("unknown emotion {:?}", label))
        })?;

        let accuracy = self.perceived_accuracy.unwrap_or(REFLECTION_DEFAULT_ACCURACY as i64);
        let perceived_accuracy = u8::try_from(accuracy)
            .ok()
            .filter(|a| (REFLECTION_ACCURACY_MIN..=REFLECTION_ACCURACY_MAX).contains(a))
            .ok_or_else(|| {
                ChatError::InvalidReflection(format!(
                    "perceived accuracy must be {}-{}, got {}",
                    REFLECTION_ACCURACY_MIN, REFLECTION_ACCURACY_MAX, accuracy
                ))
            })?;

        if self.feedback.trim().chars().count() < REFLECTION_MIN_FEEDBACK {
            return Err(ChatError::InvalidReflection(format!(
                "feedback needs at least {} characters",
                REFLECTION_MIN_FEEDBACK
            )));
        }

        Ok(ReflectionData {
            actual_emotion,
            perceived_accuracy,
            feedback: self.feedback,
            timestamp,
        })
    }
}

/// How reflections line up with the detected mood
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectionSummary {
    pub count: usize,
    /// Mean rating, one decimal; 0 when there are none
    pub average_accuracy: f64,
    /// Reflections whose actual emotion equals the dominant detected one
    pub agreements: usize,
    /// `agreements / count` as a rounded whole percentage
    pub agreement_ratio: u32,
}

impl ReflectionSummary {
    pub fn new(reflections: &[ReflectionData], dominant: Emotion) -> Self {
        let count = reflections.len();
        if count == 0 {
            return Self {
                count,
                average_accuracy: 0.0,
                agreements: 0,
                agreement_ratio: 0,
            };
        }

        let rating_sum: u32 = reflections.iter().map(|r| r.perceived_accuracy as u32).sum();
        let average = rating_sum as f64 / count as f64;
        let agreements = reflections.iter().filter(|r| r.actual_emotion == dominant).count();

        Self {
            count,
            average_accuracy: (average * 10.0).round() / 10.0,
            agreements,
            agreement_ratio: (agreements as f64 / count as f64 * 100.0).round() as u32,
        }
    }
}
