use tracing::{debug, error, info};

use crate::domain::{
    common::{CoreError, GetPaginated, services::Service},
    health::port::HealthRepository,
    message::{
        entities::{InsertMessageInput, Message, MessageId, NewMessage},
        ports::{MessageRepository, MessageService},
    },
    user::{
        entities::{InsertUserInput, User},
        ports::UserRepository,
    },
};

impl<M, U, H> Service<M, U, H>
where
    M: MessageRepository,
    U: UserRepository,
    H: HealthRepository,
{
    async fn anonymous_user(&self) -> Result<User, CoreError> {
        self.user_repository
            .find_by_username(&self.anonymous_username)
            .await?
            .ok_or_else(|| {
                error!(
                    username = %self.anonymous_username,
                    "sentinel user is missing, the database was not seeded"
                );
                CoreError::AnonymousUserMissing {
                    username: self.anonymous_username.clone(),
                }
            })
    }

    /// Find-or-create by username. The lookup and the insert are two separate
    /// calls; two callers racing on the same new username both reach `save`,
    /// and only a uniqueness constraint in the store keeps them on one row.
    async fn find_or_create_user(&self, username: &str) -> Result<User, CoreError> {
        if let Some(user) = self.user_repository.find_by_username(username).await? {
            return Ok(user);
        }

        let user = self
            .user_repository
            .save(InsertUserInput::new(username))
            .await?;
        info!(user_id = %user.id, username = %user.username, "created user on first message");

        Ok(user)
    }

    async fn resolve_author(&self, input: &InsertMessageInput) -> Result<User, CoreError> {
        match input
            .author
            .as_ref()
            .and_then(|author| author.meaningful_username())
        {
            Some(username) => self.find_or_create_user(username).await,
            None => self.anonymous_user().await,
        }
    }
}

impl<M, U, H> MessageService for Service<M, U, H>
where
    M: MessageRepository,
    U: UserRepository,
    H: HealthRepository,
{
    async fn find_message_by_id(&self, id: &MessageId) -> Result<Message, CoreError> {
        let message = self.message_repository.find_by_id(id).await?;

        match message {
            Some(message) => Ok(message),
            None => Err(CoreError::MessageNotFound { id: *id }),
        }
    }

    async fn get_messages(&self, pagination: &GetPaginated) -> Result<Vec<Message>, CoreError> {
        if pagination.size == 0 {
            return Err(CoreError::InvalidPageSize);
        }
        if pagination.offset() > GetPaginated::MAX_OFFSET {
            return Err(CoreError::PageOutOfRange {
                page: pagination.page,
                size: pagination.size,
            });
        }

        self.message_repository.find_all_paginated(pagination).await
    }

    async fn save_message(&self, input: InsertMessageInput) -> Result<Message, CoreError> {
        let author = self.resolve_author(&input).await?;
        debug!(author = %author.username, "resolved message author");

        let message = self
            .message_repository
            .save(NewMessage {
                content: input.content,
                author,
            })
            .await?;

        Ok(message)
    }

    async fn save_all(&self, messages: Vec<NewMessage>) -> Result<(), CoreError> {
        debug!(count = messages.len(), "saving messages in bulk");

        self.message_repository.save_all(messages).await
    }

    async fn find_messages_by_author(&self, username: &str) -> Result<Vec<Message>, CoreError> {
        self.message_repository
            .find_by_author_username(username)
            .await
    }

    async fn ensure_anonymous_user(&self) -> Result<(), CoreError> {
        let anonymous = self.anonymous_user().await?;
        info!(user_id = %anonymous.id, username = %anonymous.username, "sentinel user present");

        Ok(())
    }
}
