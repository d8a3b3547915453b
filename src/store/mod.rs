// Message store - ordered, append-only sequence of dialog messages

use crate::error::ChatError;
use crate::models::{Message, MessagePatch};

/// Per-dialog-mount message sequence. Append-only: no reordering, no
/// deletion. Feedback sub-state mutates in place through `update`.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_seq: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creation-time derived id, monotonic within this store even when two
    /// messages land on the same millisecond.
    pub fn next_id(&mut self) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("{}-{:04}", chrono::Utc::now().timestamp_millis(), seq)
    }

    /// Append a message and return a reference to it. No validation beyond
    /// the data-model invariants; callers own well-formedness.
    pub fn append(&mut self, message: Message) -> &Message {
        log::debug!("append message {} ({})", message.id, message.role);
        self.messages.push(message);
        self.messages
            .last()
            .expect("push cannot leave the store empty")
    }

    /// Apply a partial update to the message with the given id.
    pub fn update(&mut self, id: &str, patch: MessagePatch) -> Result<(), ChatError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ChatError::UnknownMessage(id.to_string()))?;
        patch.apply(message);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
