use std::sync::OnceLock;

use regex::Regex;

fn topic_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+-").expect("invalid topic prefix pattern"))
}

fn vote_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:\d+:").expect("invalid vote prefix pattern"))
}

fn timestamp_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,2}:\d{2}\s*(AM|PM)").expect("invalid timestamp pattern"))
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of segmentation: each line is classified independently
/// without reference to surrounding context. Segmentation only needs prefix
/// shapes; the per-block grammar re-matches anchored forms, so a line like
/// `:3: extra` keeps a block together without counting as a vote marker.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Whitespace-stripped line content.
    pub text: String,
    /// Starts with `<digits>-` (topic declaration shape).
    pub starts_topic: bool,
    /// Starts with `:<digits>:` (vote marker shape).
    pub starts_vote_marker: bool,
    /// Starts with `<1-2 digits>:<2 digits> (AM|PM)` (timestamp shape).
    pub starts_timestamp: bool,
    /// Consists solely of ASCII digits (vote-count continuation shape).
    pub all_digits: bool,
}

impl LineClass {
    /// Whether the line matches any of the three structural patterns.
    pub fn is_structural(&self) -> bool {
        self.starts_topic || self.starts_vote_marker || self.starts_timestamp
    }

    /// Whether the line continues the block in progress rather than opening
    /// a new one. Pure-digit lines are vote-count continuations, not author
    /// names, and must never trigger a split.
    pub fn continues_block(&self) -> bool {
        self.is_structural() || self.all_digits
    }
}

/// Classifies individual lines for the segmentation phase.
pub struct TranscriptLineClassifier;

impl TranscriptLineClassifier {
    /// Classifies a whitespace-stripped, non-empty line into a [`LineClass`].
    pub fn classify(&self, line: &str) -> LineClass {
        let text = line.trim().to_string();
        let all_digits = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());

        LineClass {
            starts_topic: topic_prefix_regex().is_match(&text),
            starts_vote_marker: vote_prefix_regex().is_match(&text),
            starts_timestamp: timestamp_prefix_regex().is_match(&text),
            all_digits,
            text,
        }
    }
}
