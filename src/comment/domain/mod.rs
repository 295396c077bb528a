//! Comment domain types.

pub mod comment;
pub mod ids;
pub mod thread;

pub use comment::{Author, Comment, DisplayContent, FileDescriptor};
pub use ids::{ClientNonce, CommentId, TaskId};
pub use thread::{CommentThread, InsertOutcome, LoadMoreOutcome};
