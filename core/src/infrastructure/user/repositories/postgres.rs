use sqlx::{PgPool, query_as};

use crate::domain::{
    common::CoreError,
    user::{
        entities::{InsertUserInput, User, UserId},
        ports::UserRepository,
    },
};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    username: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            username: row.username,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, username, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn save(&self, input: InsertUserInput) -> Result<User, CoreError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let user = query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
            RETURNING id, username, created_at
            "#,
        )
        .bind(&input.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user.into())
    }
}
