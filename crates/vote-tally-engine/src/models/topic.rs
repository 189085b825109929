/// One row of the ranked report, derived from a message by cross-referencing
/// its topic and vote maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub creator_name: String,
    pub topic_number: u32,
    pub subject: String,
    pub votes: i64,
}
