use super::{ConversationBuffer, DEFAULT_SESSION};
use crate::types::Message;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Conversation history keyed by session id.
///
/// Every operation takes the lock once, so a read-modify-write such as
/// [`record_and_snapshot`](Self::record_and_snapshot) cannot interleave with
/// another request on the same session. When more than `max_sessions`
/// conversations are live the least recently used one is dropped.
pub struct ConversationStore {
    history_limit: usize,
    sessions: Mutex<LruCache<String, ConversationBuffer>>,
}

impl ConversationStore {
    pub fn new(history_limit: usize, max_sessions: usize) -> Self {
        let cap = NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            history_limit,
            sessions: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Resolve an optional caller-supplied id to the key used for storage.
    pub fn session_key(session_id: Option<&str>) -> &str {
        match session_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => DEFAULT_SESSION,
        }
    }

    pub fn append(&self, session: &str, message: Message) {
        self.append_many(session, [message]);
    }

    /// Append several turns under a single lock.
    pub fn append_many(&self, session: &str, messages: impl IntoIterator<Item = Message>) {
        let mut sessions = self.sessions.lock();
        let buffer = sessions.get_or_insert_mut(session.to_string(), || {
            ConversationBuffer::with_capacity(self.history_limit)
        });
        for message in messages {
            buffer.append(message);
        }
    }

    /// Append a turn and return the resulting history in one step.
    pub fn record_and_snapshot(&self, session: &str, message: Message) -> Vec<Message> {
        let mut sessions = self.sessions.lock();
        let buffer = sessions.get_or_insert_mut(session.to_string(), || {
            ConversationBuffer::with_capacity(self.history_limit)
        });
        buffer.append(message);
        buffer.snapshot()
    }

    pub fn snapshot(&self, session: &str) -> Vec<Message> {
        self.sessions
            .lock()
            .get(session)
            .map(ConversationBuffer::snapshot)
            .unwrap_or_default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(super::DEFAULT_HISTORY_LIMIT, super::DEFAULT_MAX_SESSIONS)
    }
}
