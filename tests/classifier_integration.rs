//! Integration tests for the classifier
//!
//! text → EmotionClassifier → EmotionResult → storage row → EmotionStats

use pretty_assertions::assert_eq;
use roiyan::core::{
    color_for_emotion, detect_emotion, gradient_for_emotion, EmotionClassifier, KeywordTable,
    LexiconEntry,
};
use roiyan::types::{ChatMessage, Emotion, EmotionResult, EmotionStats, MessageRow};
use std::sync::Arc;

/// Every input yields a well-formed result
#[test]
fn test_totality() {
    let long = "kata ".repeat(10_000);
    let inputs = ["", "   ", "😊😊😊", "...", "xyz123", "AKU SENANG", long.as_str()];
    for text in inputs {
        let result = detect_emotion(text);
        assert!(Emotion::ALL.contains(&result.emotion), "bad label for {:?}", text);
        assert!(
            (0.3..=0.9).contains(&result.confidence),
            "confidence {} out of range for {:?}",
            result.confidence,
            text
        );
        assert_eq!(result.emoji, result.emotion.emoji());
    }
}

#[test]
fn test_empty_shortcut_vs_no_match() {
    let empty = detect_emotion("");
    let blank = detect_emotion("   ");
    let nothing = detect_emotion("xyz123");

    assert_eq!(empty, EmotionResult::new(Emotion::Netral, "😐", 0.5, vec![]));
    assert_eq!(blank, empty);
    assert_eq!(nothing, EmotionResult::new(Emotion::Netral, "😐", 0.3, vec![]));
}

#[test]
fn test_empty_check_uses_script_whitespace_set() {
    // Byte-order mark counts as blank; NEL does not.
    assert_eq!(detect_emotion("\u{feff}").confidence, 0.5);
    assert_eq!(detect_emotion(" \u{feff}\u{3000}\t").confidence, 0.5);
    assert_eq!(detect_emotion("\u{85}").confidence, 0.3);
}

#[test]
fn test_reference_cases() {
    let cases: &[(&str, Emotion, f64, &[&str])] = &[
        ("senang", Emotion::Senang, 0.9, &["senang"]),
        ("aku tidak marah", Emotion::Netral, 0.8, &[]),
        ("aku marah dan sedih", Emotion::Marah, 0.6, &["marah"]),
        (
            "Aku kaget banget, ternyata kita menang!",
            Emotion::Terkejut,
            0.67,
            &["kaget", "kaget banget"],
        ),
    ];

    for (text, emotion, confidence, keywords) in cases {
        let result = detect_emotion(text);
        assert_eq!(result.emotion, *emotion, "label for {:?}", text);
        assert_eq!(result.confidence, *confidence, "confidence for {:?}", text);
        assert_eq!(result.keywords, keywords.to_vec(), "keywords for {:?}", text);
    }
}

#[test]
fn test_every_negation_marker() {
    for marker in ["tidak", "nggak", "gak", "bukan", "tak"] {
        let text = format!("aku {} sedih", marker);
        let result = detect_emotion(&text);
        assert_eq!(result.emotion, Emotion::Netral, "{:?} should cancel sedih", text);
        assert!(result.keywords.is_empty());
    }
}

#[test]
fn test_negation_needs_adjacent_keyword() {
    let result = detect_emotion("tidak, aku sedih");
    assert_eq!(result.emotion, Emotion::Sedih);
}

#[test]
fn test_determinism_full_path() {
    let classifier = EmotionClassifier::default();
    let text = "Mantap! Semangat terus ya tim!";
    let r1 = classifier.classify(text);
    let r2 = classifier.classify(text);
    let r3 = detect_emotion(text);
    assert_eq!(r1, r2);
    assert_eq!(r2, r3);
}

#[test]
fn test_concurrent_callers() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| detect_emotion("aku takut banget")))
        .collect();
    let results: Vec<EmotionResult> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for result in &results {
        assert_eq!(result, &results[0]);
        assert_eq!(result.emotion, Emotion::Takut);
    }
}

#[test]
fn test_storage_roundtrip_preserves_shape() {
    let result = detect_emotion("Aku kaget banget, ternyata kita menang!");
    let message = ChatMessage {
        id: 1,
        user_id: "u1".to_string(),
        user_name: "Rina".to_string(),
        avatar: String::new(),
        content: "Aku kaget banget, ternyata kita menang!".to_string(),
        timestamp: chrono::Utc::now(),
        emotion: result.clone(),
    };

    let row = MessageRow::from_message(&message);
    assert_eq!(row.keywords, "kaget,kaget banget");

    let classifier = EmotionClassifier::default();
    let back = ChatMessage::from_row(&row, |text| classifier.classify(text));
    assert_eq!(back.emotion, result);
}

#[test]
fn test_stats_trust_stored_labels() {
    let classifier = EmotionClassifier::default();
    let texts = ["senang", "hore berhasil", "aku marah", "xyz"];
    let messages: Vec<ChatMessage> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| ChatMessage {
            id: i as u64 + 1,
            user_id: format!("u{}", i % 2),
            user_name: String::new(),
            avatar: String::new(),
            content: text.to_string(),
            timestamp: chrono::Utc::now(),
            emotion: classifier.classify(text),
        })
        .collect();

    let stats = EmotionStats::from_messages(&messages);
    assert_eq!(stats.total(), 4);
    assert_eq!(stats.count(Emotion::Senang), 2);
    assert_eq!(stats.count(Emotion::Marah), 1);
    assert_eq!(stats.count(Emotion::Netral), 1);
    assert_eq!(stats.dominant(), Emotion::Senang);
    assert_eq!(stats.positivity_ratio(), 50);
    assert_eq!(stats.unique_users(), 2);
}

#[test]
fn test_alternate_lexicon_from_json() {
    let entries: Vec<LexiconEntry> = Emotion::ALL
        .iter()
        .map(|e| LexiconEntry::new(*e, &[], e.emoji(), 1.0))
        .map(|mut entry| {
            if entry.emotion == Emotion::Senang {
                entry.keywords = vec!["happy".to_string(), "glad".to_string()];
            }
            entry
        })
        .collect();
    let json = serde_json::to_string(&entries).unwrap();

    let table = KeywordTable::from_json_str(&json).unwrap();
    let classifier = EmotionClassifier::with_table(Arc::new(table));

    let result = classifier.classify("so glad and happy");
    assert_eq!(result.emotion, Emotion::Senang);
    assert_eq!(result.keywords, vec!["happy", "glad"]);
    // 2.0 / max(1, 4 * 0.5)
    assert_eq!(result.confidence, 0.9);

    assert_eq!(classifier.classify("aku marah").emotion, Emotion::Netral);
}

#[test]
fn test_lexicon_keyword_with_delimiter_rejected() {
    let entries: Vec<LexiconEntry> = Emotion::ALL
        .iter()
        .map(|e| {
            let keywords: &[&str] = if *e == Emotion::Terkejut { &["ya, ampun"] } else { &[] };
            LexiconEntry::new(*e, keywords, e.emoji(), 1.0)
        })
        .collect();
    let json = serde_json::to_string(&entries).unwrap();

    let err = KeywordTable::from_json_str(&json).unwrap_err();
    assert!(err.to_string().contains("ya, ampun"), "unexpected error: {}", err);
}

#[test]
fn test_style_fallbacks() {
    assert_eq!(color_for_emotion("unknown_category"), "text-gray-600 bg-gray-50");
    assert_eq!(gradient_for_emotion("unknown_category"), "from-gray-100 to-slate-50");
    assert_eq!(color_for_emotion("semangat"), "text-blue-600 bg-blue-50");
    assert_eq!(gradient_for_emotion("terkejut"), "from-pink-100 to-rose-50");
}
