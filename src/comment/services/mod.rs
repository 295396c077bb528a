//! Comment synchronization services.

pub mod sync;
pub mod typing;

pub use sync::{CommentSyncError, CommentSyncService, UiEvent};
pub use typing::TypingTracker;
