pub mod classify;
pub mod message;
pub mod segment;


use crate::diag::Diagnostics;
use crate::models::Message;

pub use message::{TimestampPolicy, UNKNOWN_TIMESTAMP, parse_block};
pub use segment::{Block, BlockBuilder, segment_transcript};

/// Parses a full transcript: segment into per-author blocks, then run the
/// per-block grammar over each. Blocks that fail to parse are skipped and
/// diagnosed; they never abort the run.
pub fn parse_transcript(
    content: &str,
    policy: TimestampPolicy,
    diag: &dyn Diagnostics,
) -> Vec<Message> {
    segment_transcript(content)
        .iter()
        .filter_map(|block| parse_block(block, policy, diag))
        .collect()
}
