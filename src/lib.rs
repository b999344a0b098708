//! RoiYan: team chat with heuristic emotion tagging
//!
//! text → EmotionClassifier → EmotionResult → store / broadcast → EmotionStats

pub mod core;
pub mod error;
pub mod types;

pub use error::ChatError;

// =============================================================================
// CATEGORY WEIGHTS - per-keyword score contribution
// =============================================================================

pub const WEIGHT_SENANG: f64 = 1.0;
pub const WEIGHT_SEMANGAT: f64 = 1.0;
pub const WEIGHT_MARAH: f64 = 1.2; // Highest weight
pub const WEIGHT_SEDIH: f64 = 1.1;
pub const WEIGHT_TAKUT: f64 = 1.0;
pub const WEIGHT_TERKEJUT: f64 = 1.0;
pub const WEIGHT_NETRAL: f64 = 0.5;

// =============================================================================
// CONFIDENCE
// =============================================================================

/// Lower bound for any analysed (non-empty) text
pub const CONFIDENCE_FLOOR: f64 = 0.3;

/// Upper bound, reached by short texts with a strong hit
pub const CONFIDENCE_CEILING: f64 = 0.9;

/// Confidence for empty / whitespace-only input ("nothing to analyse")
pub const EMPTY_CONFIDENCE: f64 = 0.5;

/// Each word dilutes the score by this factor
pub const WORD_DILUTION: f64 = 0.5;

/// Markers that cancel an emotion when they directly precede a keyword
pub const NEGATION_MARKERS: [&str; 5] = ["tidak", "nggak", "gak", "bukan", "tak"];

/// Separator used when keywords are stored as a single column
pub const KEYWORD_DELIMITER: char = ',';

// =============================================================================
// BOT
// =============================================================================

/// Positive share of messages above which the bot cheers along
pub const BOT_POSITIVE_RATIO: f64 = 0.4;

/// Negative share of messages above which the bot comforts
pub const BOT_NEGATIVE_RATIO: f64 = 0.3;

/// Chance of asking a question when the room is neither up nor down
pub const BOT_QUESTION_CHANCE: f64 = 0.2;

/// Pause between bot messages (milliseconds)
pub const BOT_MIN_INTERVAL_MS: u64 = 5000;
pub const BOT_MAX_INTERVAL_MS: u64 = 20000;

// =============================================================================
// REFLECTIONS
// =============================================================================

/// Rating scale for how well detection matched the room
pub const REFLECTION_ACCURACY_MIN: u8 = 1;
pub const REFLECTION_ACCURACY_MAX: u8 = 10;
pub const REFLECTION_DEFAULT_ACCURACY: u8 = 5;

/// Minimum feedback length, in characters after trimming
pub const REFLECTION_MIN_FEEDBACK: usize = 5;

/// Reflections listed by default (most recent)
pub const REFLECTION_RECENT: usize = 3;

// =============================================================================
// SERVER
// =============================================================================

/// Capacity of the live-update broadcast channel
pub const BROADCAST_CAPACITY: usize = 100;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
