//! Bot participant that reacts to the room's mood
//!
//! The bot's replies are classified with the same classifier as user
//! messages, so they carry identical emotion tags.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::core::api::AppState;
use crate::core::EmotionClassifier;
use crate::types::{ChatUser, EmotionResult, EmotionStats, NewMessage};
use crate::{
    BOT_MAX_INTERVAL_MS, BOT_MIN_INTERVAL_MS, BOT_NEGATIVE_RATIO, BOT_POSITIVE_RATIO,
    BOT_QUESTION_CHANCE,
};

/// Which reply pool to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotContext {
    Positive,
    Negative,
    Neutral,
    Question,
}

/// A canned line and how long the bot "types" it
#[derive(Debug, Clone, Copy)]
pub struct CannedReply {
    pub content: &'static str,
    pub delay_ms: u64,
}

const fn reply(content: &'static str, delay_ms: u64) -> CannedReply {
    CannedReply { content, delay_ms }
}

const POSITIVE_REPLIES: &[CannedReply] = &[
    reply("Setuju banget! Ide yang luar biasa!", 2000),
    reply("Iya nih, aku juga excited sama ini!", 1500),
    reply("Mantap! Semangat terus ya tim!", 2500),
    reply("Bagus banget progress kita hari ini", 2000),
];

const NEGATIVE_REPLIES: &[CannedReply] = &[
    reply("Hey, santai aja. Kita bisa selesaikan ini bareng-bareng", 3000),
    reply("Aku paham sih perasaanmu. Gimana kalau kita coba approach lain?", 2500),
    reply("Jangan menyerah dulu. Kita masih bisa kok!", 2000),
    reply("Aku di sini kalau butuh bantuan ya", 1800),
];

const NEUTRAL_REPLIES: &[CannedReply] = &[
    reply("Oke, selanjutnya gimana nih?", 2000),
    reply("Btw, ada update dari project kita gak?", 2500),
    reply("Hmm, interesting point...", 1800),
    reply("Let me think about that", 2200),
];

const QUESTION_REPLIES: &[CannedReply] = &[
    reply(
        "Oh iya, aku ada pertanyaan nih. Gimana kalau kita coba dari sudut pandang yang berbeda?",
        3000,
    ),
    reply("Menurut kalian, apa challenge terbesar kita sekarang?", 2500),
    reply("Ada yang punya ide kreatif gak buat solve masalah ini?", 2800),
];

impl BotContext {
    /// Reply pool for this context
    pub fn replies(&self) -> &'static [CannedReply] {
        match self {
            BotContext::Positive => POSITIVE_REPLIES,
            BotContext::Negative => NEGATIVE_REPLIES,
            BotContext::Neutral => NEUTRAL_REPLIES,
            BotContext::Question => QUESTION_REPLIES,
        }
    }
}

/// Pick a context from the room's stats.
///
/// `roll` is a uniform sample in [0, 1) deciding whether a calm room gets
/// a question.
pub fn determine_context(stats: &EmotionStats, roll: f64) -> BotContext {
    if stats.is_empty() {
        return BotContext::Neutral;
    }
    if stats.positive_share() > BOT_POSITIVE_RATIO {
        return BotContext::Positive;
    }
    if stats.negativity_ratio() > BOT_NEGATIVE_RATIO {
        return BotContext::Negative;
    }
    if roll < BOT_QUESTION_CHANCE {
        return BotContext::Question;
    }
    BotContext::Neutral
}

/// A composed bot message, not yet delivered
#[derive(Debug, Clone)]
pub struct BotReply {
    pub context: BotContext,
    pub message: NewMessage,
    pub emotion: EmotionResult,
    pub delay: Duration,
}

/// Composes bot messages
#[derive(Debug, Clone)]
pub struct BotSimulator {
    user: ChatUser,
    classifier: EmotionClassifier,
}

impl BotSimulator {
    pub fn new(user: ChatUser, classifier: EmotionClassifier) -> Self {
        Self { user, classifier }
    }

    /// Default bot persona
    pub fn with_default_user(classifier: EmotionClassifier) -> Self {
        Self::new(ChatUser::new("bot", "RoiBot", "🤖"), classifier)
    }

    pub fn user(&self) -> &ChatUser {
        &self.user
    }

    /// Compose the next reply for the given room stats
    pub fn compose<R: Rng>(&self, stats: &EmotionStats, rng: &mut R) -> BotReply {
        let context = determine_context(stats, rng.gen::<f64>());
        let pool = context.replies();
        let canned = pool.choose(rng).copied().unwrap_or(pool[0]);

        let message = NewMessage {
            user_id: self.user.id.clone(),
            user_name: self.user.name.clone(),
            avatar: self.user.avatar.clone(),
            content: canned.content.to_string(),
            ..NewMessage::default()
        };

        BotReply {
            context,
            emotion: self.classifier.classify(canned.content),
            message,
            delay: Duration::from_millis(canned.delay_ms),
        }
    }

    /// Pause before the next reply, 5-20 s
    pub fn next_interval<R: Rng>(rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(BOT_MIN_INTERVAL_MS..=BOT_MAX_INTERVAL_MS))
    }

    /// Reply loop; runs until `active` is cleared
    pub async fn run(self, state: Arc<AppState>, active: Arc<AtomicBool>) {
        let mut rng = StdRng::from_entropy();
        info!(bot = %self.user.name, "bot started");

        while active.load(Ordering::SeqCst) {
            tokio::time::sleep(Self::next_interval(&mut rng)).await;
            if !active.load(Ordering::SeqCst) {
                break;
            }

            let stats = state.stats().await;
            let reply = self.compose(&stats, &mut rng);
            debug!(
                context = ?reply.context,
                delay_ms = reply.delay.as_millis() as u64,
                "bot composing"
            );

            tokio::time::sleep(reply.delay).await;
            if active.load(Ordering::SeqCst) {
                state.publish(&reply.message, reply.emotion).await;
            }
        }

        info!(bot = %self.user.name, "bot stopped");
    }
}

/// Running bot task
#[derive(Debug)]
pub struct BotHandle {
    active: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl BotHandle {
    /// Spawn the reply loop on the current runtime
    pub fn spawn(bot: BotSimulator, state: Arc<AppState>) -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let task = tokio::spawn(bot.run(state, active.clone()));
        Self { active, task }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) && !self.task.is_finished()
    }

    /// Stop the loop; pending replies are dropped
    pub fn stop(self) {
        self.active.store(false, Ordering::SeqCst);
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, Emotion};
    use chrono::Utc;
    use rand::rngs::mock::StepRng;

    fn stats_of(emotions: &[Emotion]) -> EmotionStats {
        let messages: Vec<ChatMessage> = emotions
            .iter()
            .map(|e| ChatMessage {
                id: 0,
                user_id: "u".to_string(),
                user_name: "u".to_string(),
                avatar: String::new(),
                content: String::new(),
                timestamp: Utc::now(),
                emotion: EmotionResult::new(*e, e.emoji(), 0.5, vec![]),
            })
            .collect();
        EmotionStats::from_messages(&messages)
    }

    #[test]
    fn test_empty_room_is_neutral() {
        assert_eq!(determine_context(&EmotionStats::new(), 0.0), BotContext::Neutral);
    }

    #[test]
    fn test_positive_room() {
        let stats = stats_of(&[Emotion::Senang, Emotion::Semangat, Emotion::Netral]);
        assert_eq!(determine_context(&stats, 0.9), BotContext::Positive);
    }

    #[test]
    fn test_negative_room() {
        let stats = stats_of(&[Emotion::Marah, Emotion::Netral, Emotion::Netral]);
        assert_eq!(determine_context(&stats, 0.9), BotContext::Negative);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // exactly 40% positive, 20% negative
        let stats = stats_of(&[
            Emotion::Senang,
            Emotion::Senang,
            Emotion::Sedih,
            Emotion::Netral,
            Emotion::Netral,
        ]);
        assert_eq!(determine_context(&stats, 0.5), BotContext::Neutral);
        assert_eq!(determine_context(&stats, 0.1), BotContext::Question);
    }

    #[test]
    fn test_compose_tags_reply() {
        let bot = BotSimulator::with_default_user(EmotionClassifier::default());
        let stats = stats_of(&[Emotion::Senang]);
        let mut rng = StepRng::new(0, 1);
        let reply = bot.compose(&stats, &mut rng);

        assert_eq!(reply.context, BotContext::Positive);
        assert_eq!(reply.message.user_id, "bot");
        assert!(POSITIVE_REPLIES.iter().any(|r| r.content == reply.message.content));
        assert_eq!(reply.emotion, EmotionClassifier::default().classify(&reply.message.content));
        assert!(reply.delay >= Duration::from_millis(1500));
    }

    #[test]
    fn test_interval_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let d = BotSimulator::next_interval(&mut rng);
            assert!(d >= Duration::from_millis(BOT_MIN_INTERVAL_MS));
            assert!(d <= Duration::from_millis(BOT_MAX_INTERVAL_MS));
        }
    }

    #[test]
    fn test_every_reply_is_classifiable() {
        let classifier = EmotionClassifier::default();
        for context in [
            BotContext::Positive,
            BotContext::Negative,
            BotContext::Neutral,
            BotContext::Question,
        ] {
            for reply in context.replies() {
                let result = classifier.classify(reply.content);
                assert!((0.3..=0.9).contains(&result.confidence));
            }
        }
    }
}
