pub mod diag;
pub mod io;
pub mod models;
pub mod parsing;
pub mod report;

// Re-export key types for easier usage
pub use diag::{CollectingDiagnostics, Diagnostics, LogDiagnostics};
pub use io::*;
pub use models::{message::*, topic::*};
pub use parsing::{Block, TimestampPolicy, parse_transcript, segment_transcript};
pub use report::{collect_topics, render_summary, write_csv};
