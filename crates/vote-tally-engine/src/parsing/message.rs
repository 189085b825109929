use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::diag::Diagnostics;
use crate::models::Message;

use super::segment::Block;

/// Sentinel timestamp used under the lenient policy when no line in the
/// block matches the timestamp pattern.
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// How to recover when a block's second line is not a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// The second line must be a timestamp; otherwise the block is skipped.
    Strict,
    /// Scan the next few lines for a timestamp and fall back to
    /// [`UNKNOWN_TIMESTAMP`] when none matches.
    #[default]
    Lenient,
}

/// Furthest line index (exclusive) the lenient policy scans for a timestamp.
const LENIENT_TIMESTAMP_SCAN_END: usize = 4;

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}:\d{2}\s*(AM|PM))").expect("invalid timestamp pattern")
    })
}

fn topic_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)-(.+)$").expect("invalid topic pattern"))
}

fn vote_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:(\d+):$").expect("invalid vote marker pattern"))
}

/// Parses one block into a [`Message`], or `None` when the block is skipped.
///
/// Skips are diagnosed, never fatal: an undersized block or (under the
/// strict policy) a missing timestamp drops the block and processing
/// continues with the rest of the transcript.
pub fn parse_block(block: &Block, policy: TimestampPolicy, diag: &dyn Diagnostics) -> Option<Message> {
    let lines = &block.lines;

    if lines.len() < 2 {
        diag.warning(&format!(
            "Skipping undersized block: {:?}",
            lines.first().map(String::as_str).unwrap_or("")
        ));
        return None;
    }

    let author = lines[0].clone();
    let timestamp = match find_timestamp(lines, policy) {
        Some(timestamp) => timestamp,
        None => match policy {
            TimestampPolicy::Strict => {
                diag.warning(&format!("Could not parse timestamp from: {}", lines[1]));
                return None;
            }
            TimestampPolicy::Lenient => {
                diag.warning(&format!(
                    "No timestamp found in block from {author}; using {UNKNOWN_TIMESTAMP}"
                ));
                UNKNOWN_TIMESTAMP.to_string()
            }
        },
    };

    let mut message = Message::new(author, timestamp);

    let mut i = 2;
    while i < lines.len() {
        let line = &lines[i];

        if let Some(caps) = topic_regex().captures(line) {
            if let Ok(topic_number) = caps[1].parse::<u32>() {
                message.record_topic(topic_number, caps[2].trim().to_string());
            }
        } else if let Some(caps) = vote_marker_regex().captures(line) {
            if let Ok(topic_number) = caps[1].parse::<u32>() {
                // The vote count is on the next line. A malformed count is
                // not consumed; it is re-evaluated as an ordinary line.
                if let Some(count_line) = lines.get(i + 1) {
                    match count_line.parse::<i64>() {
                        Ok(count) => {
                            message.record_vote(topic_number, count);
                            i += 1;
                        }
                        Err(_) => {
                            diag.warning(&format!("Could not parse vote count: {count_line}"));
                        }
                    }
                }
            }
        }

        i += 1;
    }

    Some(message)
}

fn find_timestamp(lines: &[String], policy: TimestampPolicy) -> Option<String> {
    let scan_end = match policy {
        TimestampPolicy::Strict => 2,
        TimestampPolicy::Lenient => lines.len().min(LENIENT_TIMESTAMP_SCAN_END),
    };

    lines[1..scan_end]
        .iter()
        .find_map(|line| timestamp_regex().captures(line))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectingDiagnostics;
    use pretty_assertions::assert_eq;

    fn block(lines: &[&str]) -> Block {
        Block {
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn topics(message: &Message) -> Vec<(u32, String)> {
        message.topics().map(|(n, s)| (n, s.to_string())).collect()
    }

    #[test]
    fn test_parses_example_block() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "9:30 AM", "1-Pizza Friday", ":1:", "12", "2-Remote Work"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert_eq!(message.author, "Alice");
        assert_eq!(message.timestamp, "9:30 AM");
        assert_eq!(
            topics(&message),
            vec![(1, "Pizza Friday".to_string()), (2, "Remote Work".to_string())]
        );
        assert_eq!(message.vote_count(1), 12);
        assert_eq!(message.vote_count(2), 0);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_undersized_block_is_skipped_with_warning() {
        let diag = CollectingDiagnostics::new();
        let result = parse_block(&block(&["Alice"]), TimestampPolicy::Lenient, &diag);

        assert_eq!(result, None);
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_strict_policy_skips_block_without_timestamp() {
        let diag = CollectingDiagnostics::new();
        let result = parse_block(
            &block(&["Alice", "1-Pizza Friday"]),
            TimestampPolicy::Strict,
            &diag,
        );

        assert_eq!(result, None);
        assert_eq!(diag.warnings().len(), 1);
        assert!(diag.warnings()[0].contains("timestamp"));
    }

    #[test]
    fn test_strict_policy_does_not_scan_past_second_line() {
        let diag = CollectingDiagnostics::new();
        let result = parse_block(
            &block(&["Alice", "1-Pizza Friday", "9:30 AM"]),
            TimestampPolicy::Strict,
            &diag,
        );

        assert_eq!(result, None);
    }

    #[test]
    fn test_lenient_policy_recovers_timestamp_from_later_line() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "1-Pizza Friday", "9:30 AM"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert_eq!(message.timestamp, "9:30 AM");
        assert!(diag.is_empty());
    }

    #[test]
    fn test_lenient_policy_falls_back_to_unknown() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "1-Pizza Friday", "2-Remote Work"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert_eq!(message.timestamp, UNKNOWN_TIMESTAMP);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(
            topics(&message),
            vec![(1, "Pizza Friday".to_string()), (2, "Remote Work".to_string())]
        );
    }

    #[test]
    fn test_lenient_scan_stops_after_fourth_line() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "1-A", "2-B", "3-C", "9:30 AM"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert_eq!(message.timestamp, UNKNOWN_TIMESTAMP);
    }

    #[test]
    fn test_malformed_vote_count_warns_and_line_is_reevaluated() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "9:30 AM", ":3:", "4-Snacks"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        // No vote recorded for 3, and the malformed count line still
        // matched the topic pattern on the next iteration.
        assert!(!message.has_vote(3));
        assert_eq!(topics(&message), vec![(4, "Snacks".to_string())]);
        assert_eq!(diag.warnings(), vec!["Could not parse vote count: 4-Snacks"]);
    }

    #[test]
    fn test_vote_marker_at_end_of_block_records_nothing() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "9:30 AM", "1-Pizza Friday", ":1:"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert!(!message.has_vote(1));
        assert_eq!(message.vote_count(1), 0);
    }

    #[test]
    fn test_vote_before_topic_and_orphaned_votes() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "9:30 AM", ":2:", "8", "2-Remote Work", ":9:", "3"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        // Vote markers may precede their topic; a vote with no topic stays
        // orphaned and is never surfaced as a report row.
        assert_eq!(message.vote_count(2), 8);
        assert!(message.has_vote(9));
        assert_eq!(topics(&message), vec![(2, "Remote Work".to_string())]);
    }

    #[test]
    fn test_negative_vote_count_is_accepted() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "9:30 AM", "1-Retro", ":1:", "-2"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert_eq!(message.vote_count(1), -2);
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "9:30 AM", "1-Lunch", "::", ":x:", "- not a topic"]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert_eq!(topics(&message), vec![(1, "Lunch".to_string())]);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_topic_subject_is_trimmed() {
        let diag = CollectingDiagnostics::new();
        let message = parse_block(
            &block(&["Alice", "9:30 AM", "1-  Pizza Friday  "]),
            TimestampPolicy::Lenient,
            &diag,
        )
        .unwrap();

        assert_eq!(topics(&message), vec![(1, "Pizza Friday".to_string())]);
    }
}
