use crate::types::Message;
use std::collections::VecDeque;

/// Fixed-size window over a conversation. The oldest turns are dropped first.
#[derive(Debug, Clone)]
pub struct ConversationBuffer {
    capacity: usize,
    messages: VecDeque<Message>,
}

impl Default for ConversationBuffer {
    fn default() -> Self {
        Self::with_capacity(super::DEFAULT_HISTORY_LIMIT)
    }
}

impl ConversationBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity.min(super::DEFAULT_HISTORY_LIMIT) + 1),
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push_back(message);
        self.trim_to_capacity();
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn trim_to_capacity(&mut self) {
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }
}
