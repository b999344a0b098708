//! Plain-text export of the chat log and the emotion report

use chrono::NaiveDate;
use std::fmt::Write;

use crate::types::{ChatMessage, Emotion, EmotionStats, ReflectionData, ReflectionSummary};
use crate::ChatError;

/// One line per message: `[time] user: content (emoji emotion)`
pub fn chat_log_txt(messages: &[ChatMessage]) -> Result<String, ChatError> {
    if messages.is_empty() {
        return Err(ChatError::NothingToExport);
    }

    let lines: Vec<String> = messages
        .iter()
        .map(|msg| {
            format!(
                "[{}] {}: {} ({} {})",
                msg.timestamp.format("%Y-%m-%d %H:%M:%S"),
                msg.display_name(),
                msg.content,
                msg.emotion.emoji,
                msg.emotion.emotion
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Summary report: per-category counts, overall figures and reflections
pub fn emotion_report_txt(
    stats: &EmotionStats,
    messages: &[ChatMessage],
    reflections: &[ReflectionData],
) -> Result<String, ChatError> {
    if messages.is_empty() {
        return Err(ChatError::NothingToExport);
    }

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "RoiYan - Emotion Analysis Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Emotion Statistics:");
    for emotion in Emotion::ALL {
        let count = stats.count(emotion);
        if count > 0 {
            let _ = writeln!(
                out,
                "  {} {}: {} messages ({}%)",
                emotion.emoji(),
                emotion.title(),
                count,
                stats.percentage(emotion)
            );
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Total messages analyzed: {}", stats.total());
    let _ = writeln!(out, "  Dominant emotion: {}", stats.dominant());
    let _ = writeln!(out, "  Positivity ratio: {}%", stats.positivity_ratio());
    let _ = writeln!(out, "  Average confidence: {}%", stats.average_confidence());
    let _ = writeln!(out, "  Participants: {}", stats.unique_users());
    let _ = writeln!(out);
    let _ = writeln!(out, "Reflections:");
    if reflections.is_empty() {
        let _ = writeln!(out, "  No reflections submitted");
        return Ok(out);
    }
    let summary = ReflectionSummary::new(reflections, stats.dominant());
    let _ = writeln!(out, "  Reflections submitted: {}", summary.count);
    let _ = writeln!(out, "  Average perceived accuracy: {:.1}/10", summary.average_accuracy);
    let _ = writeln!(
        out,
        "  Matched dominant emotion: {} of {} ({}%)",
        summary.agreements, summary.count, summary.agreement_ratio
    );
    for reflection in reflections {
        let _ = writeln!(
            out,
            "  [{}] {} {}/10: {}",
            reflection.timestamp.format("%Y-%m-%d %H:%M:%S"),
            reflection.actual_emotion,
            reflection.perceived_accuracy,
            reflection.feedback.trim()
        );
    }
    Ok(out)
}

pub fn chat_log_filename(date: NaiveDate) -> String {
    format!("roiyan-chat-log-{}.txt", date.format("%Y-%m-%d"))
}

pub fn report_filename(date: NaiveDate) -> String {
    format!("roiyan-emotion-report-{}.txt", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmotionResult;
    use chrono::{TimeZone, Utc};

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                id: 1,
                user_id: "u1".to_string(),
                user_name: "Rina".to_string(),
                avatar: String::new(),
                content: "senang".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
                emotion: EmotionResult::new(Emotion::Senang, "😊", 0.9, vec!["senang".to_string()]),
            },
            ChatMessage {
                id: 2,
                user_id: "u2".to_string(),
                user_name: String::new(),
                avatar: String::new(),
                content: "xyz".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 1, 0).unwrap(),
                emotion: EmotionResult::new(Emotion::Netral, "😐", 0.3, vec![]),
            },
        ]
    }

    #[test]
    fn test_chat_log_lines() {
        let log = chat_log_txt(&messages()).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines[0], "[2024-05-01 08:00:00] Rina: senang (😊 senang)");
        assert_eq!(lines[1], "[2024-05-01 08:01:00] u2: xyz (😐 netral)");
    }

    #[test]
    fn test_report_contents() {
        let msgs = messages();
        let stats = EmotionStats::from_messages(&msgs);
        let report = emotion_report_txt(&stats, &msgs, &[]).unwrap();
        assert!(report.contains("Senang: 1 messages (50%)"));
        assert!(report.contains("Total messages analyzed: 2"));
        assert!(report.contains("Dominant emotion: senang"));
        assert!(report.contains("Average confidence: 60%"));
        assert!(report.contains("No reflections submitted"));
        assert!(!report.contains("Marah"));
    }

    #[test]
    fn test_report_reflection_summary() {
        let msgs = messages();
        let stats = EmotionStats::from_messages(&msgs);
        let reflection = |emotion, accuracy| ReflectionData {
            actual_emotion: emotion,
            perceived_accuracy: accuracy,
            feedback: " cukup pas ".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        };
        let reflections = vec![reflection(Emotion::Senang, 9), reflection(Emotion::Sedih, 6)];

        let report = emotion_report_txt(&stats, &msgs, &reflections).unwrap();
        assert!(report.contains("Reflections submitted: 2"));
        assert!(report.contains("Average perceived accuracy: 7.5/10"));
        assert!(report.contains("Matched dominant emotion: 1 of 2 (50%)"));
        assert!(report.contains("[2024-05-01 09:00:00] sedih 6/10: cukup pas"));
    }

    #[test]
    fn test_empty_export_is_error() {
        assert!(matches!(chat_log_txt(&[]), Err(ChatError::NothingToExport)));
        assert!(matches!(
            emotion_report_txt(&EmotionStats::new(), &[], &[]),
            Err(ChatError::NothingToExport)
        ));
    }

    #[test]
    fn test_filenames() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(chat_log_filename(date), "roiyan-chat-log-2024-05-01.txt");
        assert_eq!(report_filename(date), "roiyan-emotion-report-2024-05-01.txt");
    }
}
