use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::entities::User;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct MessageId(pub Uuid);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for MessageId {
    fn from(uuid: Uuid) -> Self {
        MessageId(uuid)
    }
}

impl From<MessageId> for Uuid {
    fn from(message_id: MessageId) -> Self {
        message_id.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub author: User,
    pub created_at: DateTime<Utc>,
}

/// Author as supplied by a caller: only the username is meaningful.
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct AuthorInput {
    pub username: Option<String>,
}

impl AuthorInput {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    /// Returns the username unless it is missing or blank.
    pub fn meaningful_username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .filter(|username| !username.trim().is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct InsertMessageInput {
    pub content: String,
    #[serde(default)]
    pub author: Option<AuthorInput>,
}

impl InsertMessageInput {
    pub fn new(content: impl Into<String>, author: Option<AuthorInput>) -> Self {
        Self {
            content: content.into(),
            author,
        }
    }

    pub fn with_username(content: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(content, Some(AuthorInput::named(username)))
    }
}

/// A message whose author is already resolved, ready to be persisted.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct NewMessage {
    pub content: String,
    pub author: User,
}
