//! Keyword table: per-category keywords, emoji and weight
//!
//! The table is read-only once built. The shipped table is constructed on
//! first use and shared for the life of the process; alternate tables
//! (other locales, tests) can be built from entries or loaded from JSON.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::types::Emotion;
use crate::{
    ChatError, KEYWORD_DELIMITER, NEGATION_MARKERS, WEIGHT_MARAH, WEIGHT_NETRAL, WEIGHT_SEDIH,
    WEIGHT_SEMANGAT, WEIGHT_SENANG, WEIGHT_TAKUT, WEIGHT_TERKEJUT,
};

/// One category's row in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub emotion: Emotion,
    /// Matched as case-insensitive substrings, in this order
    pub keywords: Vec<String>,
    pub emoji: String,
    /// Score added per matching keyword
    pub weight: f64,
}

impl LexiconEntry {
    pub fn new(emotion: Emotion, keywords: &[&str], emoji: &str, weight: f64) -> Self {
        Self {
            emotion,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            emoji: emoji.to_string(),
            weight,
        }
    }
}

/// Keyword with its precomputed match forms
#[derive(Debug)]
pub(crate) struct CompiledKeyword {
    /// Table form, reported back in results
    pub literal: String,
    /// Lower-cased form used for substring search
    pub lowered: String,
    /// `<marker> +<keyword>`, case-insensitive
    pub negation: Regex,
}

#[derive(Debug)]
pub(crate) struct CompiledEntry {
    pub emotion: Emotion,
    pub emoji: String,
    pub weight: f64,
    pub keywords: Vec<CompiledKeyword>,
}

/// Immutable category → keywords/emoji/weight mapping
#[derive(Debug)]
pub struct KeywordTable {
    /// Indexed by `Emotion::index()`
    entries: Vec<CompiledEntry>,
}

lazy_static! {
    static ref STANDARD_TABLE: KeywordTable = KeywordTable::new(standard_entries())
        .expect("shipped lexicon is valid");
}

impl KeywordTable {
    /// Build a table from one entry per category.
    ///
    /// Entries may come in any order; they are stored in declaration order.
    pub fn new(entries: Vec<LexiconEntry>) -> Result<Self, ChatError> {
        let mut slots: Vec<Option<CompiledEntry>> = (0..Emotion::COUNT).map(|_| None).collect();

        for entry in entries {
            let slot = &mut slots[entry.emotion.index()];
            if slot.is_some() {
                return Err(ChatError::InvalidLexicon(format!(
                    "category {} listed more than once",
                    entry.emotion
                )));
            }
            *slot = Some(compile_entry(entry)?);
        }

        let entries = slots
            .into_iter()
            .zip(Emotion::ALL)
            .map(|(slot, emotion)| {
                slot.ok_or_else(|| {
                    ChatError::InvalidLexicon(format!("missing category {}", emotion))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// The shipped Indonesian/English table
    pub fn standard() -> &'static KeywordTable {
        &STANDARD_TABLE
    }

    /// Parse a JSON list of entries
    pub fn from_json_str(json: &str) -> Result<Self, ChatError> {
        let entries: Vec<LexiconEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a JSON lexicon file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ChatError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ChatError::LexiconIo {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json_str(&json)?;
        info!(path = %path.display(), keywords = table.keyword_count(), "loaded lexicon");
        Ok(table)
    }

    /// Emoji for a category
    pub fn emoji(&self, emotion: Emotion) -> &str {
        &self.entries[emotion.index()].emoji
    }

    /// Weight for a category
    pub fn weight(&self, emotion: Emotion) -> f64 {
        self.entries[emotion.index()].weight
    }

    /// Keywords for a category, table order
    pub fn keywords(&self, emotion: Emotion) -> impl Iterator<Item = &str> {
        self.entries[emotion.index()].keywords.iter().map(|k| k.literal.as_str())
    }

    /// Total keyword entries across all categories (duplicates included)
    pub fn keyword_count(&self) -> usize {
        self.entries.iter().map(|e| e.keywords.len()).sum()
    }

    /// Export back to plain entries
    pub fn to_entries(&self) -> Vec<LexiconEntry> {
        self.entries
            .iter()
            .map(|e| LexiconEntry {
                emotion: e.emotion,
                keywords: e.keywords.iter().map(|k| k.literal.clone()).collect(),
                emoji: e.emoji.clone(),
                weight: e.weight,
            })
            .collect()
    }

    pub(crate) fn entries(&self) -> &[CompiledEntry] {
        &self.entries
    }
}

fn compile_entry(entry: LexiconEntry) -> Result<CompiledEntry, ChatError> {
    if !entry.weight.is_finite() || entry.weight <= 0.0 {
        return Err(ChatError::InvalidLexicon(format!(
            "weight for {} must be a positive number, got {}",
            entry.emotion, entry.weight
        )));
    }
    if entry.emoji.trim().is_empty() {
        return Err(ChatError::InvalidLexicon(format!("emoji for {} is empty", entry.emotion)));
    }

    let markers = NEGATION_MARKERS.join("|");
    let keywords = entry
        .keywords
        .into_iter()
        .map(|literal| {
            if literal.trim().is_empty() {
                return Err(ChatError::InvalidLexicon(format!(
                    "empty keyword in {}",
                    entry.emotion
                )));
            }
            // Keywords are stored joined on the delimiter and split back with trimming.
            if literal.contains(KEYWORD_DELIMITER) || literal.trim() != literal {
                return Err(ChatError::InvalidLexicon(format!(
                    "keyword {:?} in {} cannot be stored: no {:?} or surrounding whitespace",
                    literal, entry.emotion, KEYWORD_DELIMITER
                )));
            }
            let pattern = format!("(?i)(?:{}) +{}", markers, regex::escape(&literal));
            let negation = Regex::new(&pattern)
                .map_err(|e| ChatError::InvalidLexicon(format!("keyword {:?}: {}", literal, e)))?;
            Ok(CompiledKeyword {
                lowered: literal.to_lowercase(),
                literal,
                negation,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledEntry {
        emotion: entry.emotion,
        emoji: entry.emoji,
        weight: entry.weight,
        keywords,
    })
}

/// Entries of the shipped table, declaration order
pub fn standard_entries() -> Vec<LexiconEntry> {
    let entry = |emotion: Emotion, keywords: &[&str], weight: f64| {
        LexiconEntry::new(emotion, keywords, emotion.emoji(), weight)
    };
    vec![
        entry(Emotion::Senang, SENANG_KEYWORDS, WEIGHT_SENANG),
        entry(Emotion::Semangat, SEMANGAT_KEYWORDS, WEIGHT_SEMANGAT),
        entry(Emotion::Marah, MARAH_KEYWORDS, WEIGHT_MARAH),
        entry(Emotion::Sedih, SEDIH_KEYWORDS, WEIGHT_SEDIH),
        entry(Emotion::Takut, TAKUT_KEYWORDS, WEIGHT_TAKUT),
        entry(Emotion::Terkejut, TERKEJUT_KEYWORDS, WEIGHT_TERKEJUT),
        entry(Emotion::Netral, NETRAL_KEYWORDS, WEIGHT_NETRAL),
    ]
}

// =============================================================================
// SHIPPED KEYWORDS
// Repeated entries are intentional: each one adds its category weight, and
// stored confidence values depend on those totals.
// =============================================================================

const SENANG_KEYWORDS: &[&str] = &[
    "senang", "seneng", "bahagia", "gembira", "suka", "happy", "mantap", "keren", "bagus",
    "hebat", "ceria", "riang", "girang", "asik", "asyik", "seru", "menyenangkan", "positif",
    "uwu", "good", "nice", "sip", "top", "mantul", "ciyee", "ciee", "enak", "nikmat", "lucu",
    "fun", "enjoy", "enjoying", "enjoyed", "beruntung", "berhasil", "puas", "lega",
    "berkualitas", "wow", "hore", "horee", "yeay", "yay", "haha", "hehe", "hihi", "amazing",
    "fantastic", "great", "super", "superb", "excellent", "wonderful", "best", "cool",
    "awesome", "makasih", "makasi", "makaci", "thanks", "terima kasih", "love", "cinta",
    "sayang", "excited", "antusias", "alhamdulillah", "berkah", "rezeki", "bersemangat",
    "semangat", "berhasil", "menang", "luar biasa", "suka cita", "good job", "kerja bagus",
    "kerja mantap", "kabar baik", "kabar gembira", "dapat hadiah", "bisa kok", "berhasil juga",
    "akhirnya berhasil", "sukses besar", "dapet bonus", "dapet rejeki", "rezeki nomplok",
    "semua lancar", "jalan lancar", "jalan mulus", "semua beres", "semua selesai",
    "masuk akal", "hidup indah", "hidup bahagia", "hidup asik", "hidup berkah",
    "hidup penuh warna", "hidup penuh cinta", "hidup penuh tawa", "hidup penuh senyum",
    "hidup penuh semangat", "hidup penuh harapan", "hidup penuh kebahagiaan",
    "hidup penuh keberuntungan", "hidup penuh kesenangan", "hidup penuh kegembiraan",
    "hidup penuh keceriaan", "hidup penuh kehangatan", "hidup penuh kasih sayang",
    "hidup penuh keindahan", "hidup penuh kenikmatan", "hidup penuh keberhasilan",
    "hidup penuh kemenangan",
];

const SEMANGAT_KEYWORDS: &[&str] = &[
    "semangat", "ayo", "yuk", "pasti bisa", "fight", "go", "let's go", "ayok", "optimis",
    "yakin", "confident", "motivated", "passionate", "energetic", "enthusiastic", "siap",
    "ready", "gas", "push", "hustle", "bangkit", "berjuang", "maju", "lanjut",
    "pantang menyerah", "never give up", "keep going", "keep fighting", "keep spirit",
    "keep moving", "tetap semangat", "jangan menyerah", "jangan putus asa", "jangan lelah",
    "jangan takut", "jangan khawatir", "jangan ragu", "jangan malas", "jangan baper",
    "jangan galau", "jangan sedih", "jangan marah", "jangan kecewa", "jangan down",
    "jangan stress", "jangan panik", "jangan takut gagal", "jangan takut mencoba",
    "jangan takut salah", "jangan takut rugi", "jangan takut kehilangan",
    "jangan takut ditinggal", "jangan takut ditolak", "jangan takut gagal lagi",
    "jangan takut gagal terus", "pasti sukses", "pasti berhasil", "pasti menang",
    "pasti lulus", "pasti dapat", "pasti bisa kok", "pasti bisa bro", "pasti bisa sis",
    "pasti bisa gan", "pasti bisa dek", "pasti bisa kak", "pasti bisa mas", "pasti bisa mbak",
    "pasti bisa bang", "pasti bisa neng", "pasti bisa bos", "pasti bisa pak", "pasti bisa bu",
    "pasti bisa om", "pasti bisa tante", "pasti bisa ayah", "pasti bisa ibu",
    "pasti bisa bapak", "pasti bisa mama", "pasti bisa papa", "pasti bisa abang",
    "pasti bisa adik", "pasti bisa kakak", "pasti bisa teman", "pasti bisa sahabat",
    "pasti bisa saudara", "pasti bisa keluarga", "pasti bisa semua", "pasti bisa siapa saja",
    "pasti bisa kapan saja", "pasti bisa di mana saja", "pasti bisa di mana pun",
    "pasti bisa di mana-mana",
];

const MARAH_KEYWORDS: &[&str] = &[
    "marah", "kesal", "kesel", "jengkel", "dongkol", "bete", "sebel", "emosi", "emosian",
    "angry", "mad", "furious", "irritated", "annoyed", "frustrated", "geram", "ngamuk",
    "ngambek", "bete banget", "bajingan", "anjing", "fuck", "damn", "shit", "bodoh", "stupid",
    "tolol", "idiot", "menyebalkan", "sialan", "kampret", "brengsek", "bangsat", "goblok",
    "kzl", "malesin", "nyebelin", "nyusahin", "sakit hati", "kesel banget", "parah",
    "parah banget", "parah sih", "parah ya", "parah banget sih", "parah banget ya",
    "parah banget banget", "parah banget banget banget", "parah banget banget banget banget",
    "parah banget banget banget banget banget", "nggak suka", "nggak senang", "nggak happy",
    "nggak puas", "nggak nyaman", "nggak betah", "nggak enak", "nggak asik", "nggak asyik",
    "nggak seru", "nggak menyenangkan", "nggak positif", "nggak baik", "nggak bagus",
    "nggak keren", "nggak mantap", "nggak top", "nggak mantul", "nggak sip", "nggak uwu",
    "nggak ciee", "nggak ciyee", "nggak cie", "nggak ciee", "nggak ciee", "nggak ciee",
    "nggak ciee", "nggak ciee", "nggak ciee", "nggak ciee", "nggak ciee",
];

const SEDIH_KEYWORDS: &[&str] = &[
    "sedih", "kecewa", "down", "galau", "depresi", "stress", "putus asa", "hopeless", "sad",
    "disappointed", "hurt", "pain", "broken", "cry", "nangis", "menangis", "tears", "lonely",
    "kesepian", "sendiri", "hampa", "kosong", "hancur", "terpuruk", "drop", "patah hati",
    "remuk", "terluka", "teriris", "terabaikan", "ditinggal", "ditolak", "sakit", "sakit hati",
    "sakit banget", "sakit parah", "sakit luar biasa", "sakit banget banget", "sedih banget",
    "kecewa banget", "galau banget", "nangis banget", "patah hati banget", "terluka banget",
    "teriris banget", "terabaikan banget", "ditinggal banget", "ditolak banget",
    "sakit hati banget", "sakit banget banget", "sakit parah banget",
    "sakit luar biasa banget", "sakit banget banget banget",
    "sakit banget banget banget banget", "sakit banget banget banget banget banget",
];

const TAKUT_KEYWORDS: &[&str] = &[
    "takut", "scared", "afraid", "fear", "cemas", "anxious", "worry", "khawatir", "nervous",
    "panic", "panik", "was-was", "deg-degan", "tegang", "stress", "paranoid", "ngeri", "serem",
    "menakutkan", "merinding", "ngilu", "ngilu banget", "ngilu parah", "ngilu luar biasa",
    "ngilu banget banget", "takut banget", "cemas banget", "khawatir banget",
    "deg-degan banget", "panik banget", "nervous banget", "paranoid banget",
    "takut luar biasa", "takut banget banget", "takut banget banget banget",
];

const TERKEJUT_KEYWORDS: &[&str] = &[
    "terkejut", "surprised", "shock", "syok", "kaget", "amazed", "wow", "whoa", "omg",
    "astaga", "ya ampun", "gila", "gak nyangka", "unexpected", "suddenly", "mendadak",
    "tiba-tiba", "terperanjat", "terpana", "tercengang", "melongo", "terkesima", "terheran",
    "heran", "wah", "wah banget", "wah luar biasa", "nggak nyangka", "bener-bener kaget",
    "kaget banget", "kaget parah", "kaget luar biasa", "terkejut banget", "terkejut parah",
    "terkejut luar biasa", "syok banget", "syok parah", "syok luar biasa", "terpana banget",
    "terpana parah", "terpana luar biasa",
];

const NETRAL_KEYWORDS: &[&str] = &[
    "oke", "okay", "baik", "ya", "hmm", "oh", "ah", "em", "well", "fine", "normal", "biasa",
    "standar", "begitu", "gitu", "seperti itu", "understand", "mengerti", "paham", "clear",
    "jelas", "biasa aja", "biasa saja", "so-so", "lumayan", "gitu aja", "gitu doang",
    "gitu tok", "gitu aja sih", "gitu aja kok", "gitu aja mah", "gitu aja ya", "gitu aja deh",
    "gitu aja dong", "gitu aja pun", "gitu aja tuh", "gitu aja sih ya", "gitu aja sih kok",
    "gitu aja sih mah", "gitu aja sih ya deh", "gitu aja sih ya dong", "gitu aja sih ya pun",
    "gitu aja sih ya tuh",
];
