//! Core modules for RoiYan

pub mod api;
pub mod bot;
pub mod classifier;
pub mod export;
pub mod lexicon;
pub mod store;

pub use api::{create_router, router_with_state, run_server, AppConfig, AppState, ChatEvent};
pub use bot::{determine_context, BotContext, BotHandle, BotReply, BotSimulator};
pub use classifier::{color_for_emotion, detect_emotion, gradient_for_emotion, EmotionClassifier};
pub use export::{chat_log_txt, emotion_report_txt};
pub use lexicon::{KeywordTable, LexiconEntry};
pub use store::MessageStore;
