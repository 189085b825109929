use super::classify::{LineClass, TranscriptLineClassifier};

/// A contiguous run of non-empty lines believed to represent one message
/// from one author. The first line is assumed to be the author name; no
/// validation is performed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub lines: Vec<String>,
}

/// Accumulates classified lines into blocks.
///
/// A line opens a new block iff a block is in progress and the line is
/// neither structural nor all-digits. Everything else appends.
pub struct BlockBuilder {
    current: Vec<String>,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
            out: Vec::new(),
        }
    }

    pub fn push(&mut self, class: LineClass) {
        if !self.current.is_empty() && !class.continues_block() {
            self.flush();
        }
        self.current.push(class.text);
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.out.push(Block {
                lines: std::mem::take(&mut self.current),
            });
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits the full transcript text into per-author blocks. Blank lines are
/// discarded and never count toward any block.
pub fn segment_transcript(content: &str) -> Vec<Block> {
    let classifier = TranscriptLineClassifier;
    let mut builder = BlockBuilder::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        builder.push(classifier.classify(trimmed));
    }

    builder.finish()
}
