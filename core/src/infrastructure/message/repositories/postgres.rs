use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    common::{CoreError, GetPaginated},
    message::{
        entities::{Message, MessageId, NewMessage},
        ports::MessageRepository,
    },
    user::entities::{User, UserId},
};

/// Shared projection of a message joined with its author.
const SELECT_MESSAGES: &str = r#"
    SELECT m.id, m.content, m.created_at,
           u.id AS author_id, u.username AS author_username, u.created_at AS author_created_at
    FROM messages m
    JOIN users u ON u.id = m.author_id
"#;

#[derive(FromRow)]
struct MessageRow {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_username: String,
    author_created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: MessageId(row.id),
            content: row.content,
            created_at: row.created_at,
            author: User {
                id: UserId(row.author_id),
                username: row.author_username,
                created_at: row.author_created_at,
            },
        }
    }
}

#[derive(Clone)]
pub struct PostgresMessageRepository {
    pub(crate) pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MessageRepository for PostgresMessageRepository {
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, CoreError> {
        let message = query_as::<_, MessageRow>(&format!("{SELECT_MESSAGES} WHERE m.id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(message.map(Message::from))
    }

    async fn find_all_paginated(&self, pagination: &GetPaginated) -> Result<Vec<Message>, CoreError> {
        let offset = i64::try_from(pagination.offset()).map_err(|_| CoreError::PageOutOfRange {
            page: pagination.page,
            size: pagination.size,
        })?;

        let messages = query_as::<_, MessageRow>(&format!(
            "{SELECT_MESSAGES} ORDER BY m.created_at, m.id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(pagination.size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages.into_iter().map(Message::from).collect())
    }

    async fn save(&self, message: NewMessage) -> Result<Message, CoreError> {
        let (id, created_at): (Uuid, DateTime<Utc>) = query_as(
            r#"
            INSERT INTO messages (content, author_id)
            VALUES ($1, $2)
            RETURNING id, created_at
            "#,
        )
        .bind(&message.content)
        .bind(message.author.id.0)
        .fetch_one(&self.pool)
        .await?;

        Ok(Message {
            id: MessageId(id),
            content: message.content,
            author: message.author,
            created_at,
        })
    }

    async fn save_all(&self, messages: Vec<NewMessage>) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await?;

        for message in &messages {
            sqlx::query("INSERT INTO messages (content, author_id) VALUES ($1, $2)")
                .bind(&message.content)
                .bind(message.author.id.0)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(count = messages.len(), "inserted messages in one transaction");

        Ok(())
    }

    async fn find_by_author_username(&self, username: &str) -> Result<Vec<Message>, CoreError> {
        let messages = query_as::<_, MessageRow>(&format!(
            "{SELECT_MESSAGES} WHERE u.username = $1 ORDER BY m.created_at, m.id"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages.into_iter().map(Message::from).collect())
    }
}
