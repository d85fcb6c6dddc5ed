//! Conversation memory.
//!
//! History lives only in process memory and is lost on restart. Each session
//! keeps at most [`DEFAULT_HISTORY_LIMIT`] turns (five exchanges) unless
//! configured otherwise; older turns are evicted first.

mod buffer;
mod store;

pub use buffer::ConversationBuffer;
pub use store::ConversationStore;

/// Default number of turns kept per conversation.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Largest accepted `conversation.history_limit`.
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Default bound on the number of live conversations.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Key shared by requests that do not name a session.
pub const DEFAULT_SESSION: &str = "default";
