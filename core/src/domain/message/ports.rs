use std::sync::{Arc, Mutex};

use crate::domain::{
    common::{CoreError, GetPaginated},
    message::entities::{InsertMessageInput, Message, MessageId, NewMessage},
};

pub trait MessageRepository: Send + Sync {
    fn find_by_id(
        &self,
        id: &MessageId,
    ) -> impl Future<Output = Result<Option<Message>, CoreError>> + Send;

    fn find_all_paginated(
        &self,
        pagination: &GetPaginated,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;

    fn save(&self, message: NewMessage) -> impl Future<Output = Result<Message, CoreError>> + Send;

    fn save_all(
        &self,
        messages: Vec<NewMessage>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn find_by_author_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;
}

/// Business operations on messages.
///
/// Every message that goes through [`MessageService::save_message`] ends up
/// with a persisted author: either the user named by the caller (created on
/// first use) or the sentinel anonymous user.
pub trait MessageService: Send + Sync {
    /// Retrieves a message by its identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Message)` - The message exists
    /// - `Err(CoreError::MessageNotFound)` - No message has this id
    /// - `Err(CoreError)` - The store failed
    fn find_message_by_id(
        &self,
        id: &MessageId,
    ) -> impl Future<Output = Result<Message, CoreError>> + Send;

    /// Returns one page of messages. Ordering is whatever the store provides.
    ///
    /// A page size of zero is rejected with `CoreError::InvalidPageSize`, and a
    /// `page * size` offset beyond `GetPaginated::MAX_OFFSET` with
    /// `CoreError::PageOutOfRange`.
    fn get_messages(
        &self,
        pagination: &GetPaginated,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;

    /// Resolves the author of `input` and persists the message.
    ///
    /// A missing or blank username resolves to the sentinel anonymous user;
    /// if that user is not seeded, `CoreError::AnonymousUserMissing` is
    /// returned. Any other username is looked up and created when absent.
    fn save_message(
        &self,
        input: InsertMessageInput,
    ) -> impl Future<Output = Result<Message, CoreError>> + Send;

    /// Persists messages as given, without author resolution.
    fn save_all(
        &self,
        messages: Vec<NewMessage>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Lists every message whose author has exactly this username.
    fn find_messages_by_author(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;

    /// Checks that the sentinel anonymous user exists. Meant to be called
    /// once at startup.
    fn ensure_anonymous_user(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[derive(Clone, Default)]
pub struct MockMessageRepository {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    fn store(messages: &mut Vec<Message>, message: NewMessage) -> Message {
        let stored = Message {
            id: MessageId::from(uuid::Uuid::new_v4()),
            content: message.content,
            author: message.author,
            created_at: chrono::Utc::now(),
        };
        messages.push(stored.clone());
        stored
    }
}

impl MessageRepository for MockMessageRepository {
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, CoreError> {
        let messages = self.messages.lock().unwrap();

        let message = messages.iter().find(|m| &m.id == id).cloned();

        Ok(message)
    }

    async fn find_all_paginated(&self, pagination: &GetPaginated) -> Result<Vec<Message>, CoreError> {
        let messages = self.messages.lock().unwrap();

        let offset = pagination.offset() as usize;
        let size = pagination.size as usize;

        let page: Vec<Message> = messages.iter().skip(offset).take(size).cloned().collect();

        Ok(page)
    }

    async fn save(&self, message: NewMessage) -> Result<Message, CoreError> {
        let mut messages = self.messages.lock().unwrap();

        Ok(Self::store(&mut messages, message))
    }

    async fn save_all(&self, new_messages: Vec<NewMessage>) -> Result<(), CoreError> {
        let mut messages = self.messages.lock().unwrap();

        for message in new_messages {
            Self::store(&mut messages, message);
        }

        Ok(())
    }

    async fn find_by_author_username(&self, username: &str) -> Result<Vec<Message>, CoreError> {
        let messages = self.messages.lock().unwrap();

        let authored = messages
            .iter()
            .filter(|m| m.author.username == username)
            .cloned()
            .collect();

        Ok(authored)
    }
}
