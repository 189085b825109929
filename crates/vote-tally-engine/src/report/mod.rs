use std::borrow::Cow;
use std::io::{self, BufWriter, Write};

use crate::models::{Message, Topic};

/// Fixed header row of the CSV report.
pub const CSV_HEADER: &str = "creator_name,topic_number,votes,subject";

/// Rows shown in the console summary before the remainder is elided.
const SUMMARY_ROW_LIMIT: usize = 10;

/// Subjects longer than this are truncated in the console summary.
const SUMMARY_SUBJECT_WIDTH: usize = 40;

/// Flattens every message's topics into report rows and sorts them by
/// descending votes, then ascending creator name. The sort is stable, so
/// rows tied on both keys keep their encounter order: declaration order
/// within a message, parse order across messages.
pub fn collect_topics(messages: &[Message]) -> Vec<Topic> {
    let mut rows = Vec::new();

    for message in messages {
        for (topic_number, subject) in message.topics() {
            rows.push(Topic {
                creator_name: message.author.clone(),
                topic_number,
                subject: subject.to_string(),
                votes: message.vote_count(topic_number),
            });
        }
    }

    rows.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then_with(|| a.creator_name.cmp(&b.creator_name))
    });

    rows
}

/// Writes the report as CSV: header plus one row per topic, in order.
pub fn write_csv<W: Write>(out: W, rows: &[Topic]) -> io::Result<()> {
    let mut writer = BufWriter::new(out);

    writeln!(writer, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{}",
            csv_field(&row.creator_name),
            row.topic_number,
            row.votes,
            csv_field(&row.subject)
        )?;
    }

    writer.flush()
}

/// Minimal CSV quoting: a field containing a comma, quote or line break is
/// wrapped in quotes with embedded quotes doubled; everything else is bare.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Renders the console summary: total counts and up to the first
/// [`SUMMARY_ROW_LIMIT`] rows with long subjects truncated.
pub fn render_summary(rows: &[Topic], message_count: usize) -> String {
    if rows.is_empty() {
        return "No topics found.".to_string();
    }

    let rule = "-".repeat(80);
    let mut lines = vec![
        format!("Found {} topics from {} messages:", rows.len(), message_count),
        rule.clone(),
        format!("{:<15} {:<8} {:<8} {}", "Creator", "Topic#", "Votes", "Subject"),
        rule,
    ];

    for row in rows.iter().take(SUMMARY_ROW_LIMIT) {
        let subject = truncate_subject(&row.subject);
        lines.push(format!(
            "{:<15} {:<8} {:<8} {}",
            row.creator_name, row.topic_number, row.votes, subject
        ));
    }

    if rows.len() > SUMMARY_ROW_LIMIT {
        lines.push(format!(
            "... and {} more topics",
            rows.len() - SUMMARY_ROW_LIMIT
        ));
    }

    lines.join("\n")
}

fn truncate_subject(subject: &str) -> Cow<'_, str> {
    if subject.chars().count() > SUMMARY_SUBJECT_WIDTH {
        let truncated: String = subject.chars().take(SUMMARY_SUBJECT_WIDTH).collect();
        Cow::Owned(format!("{truncated}..."))
    } else {
        Cow::Borrowed(subject)
    }
}
