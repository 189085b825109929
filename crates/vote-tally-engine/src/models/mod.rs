pub mod message;
pub mod topic;

pub use message::Message;
pub use topic::Topic;
