//! Core types for RoiYan

mod emotion;
mod message;
mod reflection;
pub(crate) mod result;
mod stats;

pub use emotion::Emotion;
pub use message::{ChatMessage, ChatUser, MessageRow, NewMessage};
pub use reflection::{NewReflection, ReflectionData, ReflectionSummary};
pub use result::{join_keywords, split_keywords, EmotionResult};
pub use stats::{EmotionStats, StatsSummary};
