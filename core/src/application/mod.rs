use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::info;

use crate::{
    domain::common::{CoreError, services::Service},
    infrastructure::{
        health::repositories::postgres::PostgresHealthRepository,
        message::repositories::postgres::PostgresMessageRepository,
        user::repositories::postgres::PostgresUserRepository,
    },
};

/// Concrete service type backed by PostgreSQL repositories.
pub type MessageBoardService =
    Service<PostgresMessageRepository, PostgresUserRepository, PostgresHealthRepository>;

#[derive(Clone)]
pub struct MessageBoardRepositories {
    pool: PgPool,
    pub message_repository: PostgresMessageRepository,
    pub user_repository: PostgresUserRepository,
    pub health_repository: PostgresHealthRepository,
}

pub async fn create_repositories(
    pg_connection_options: PgConnectOptions,
) -> Result<MessageBoardRepositories, CoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(pg_connection_options)
        .await
        .map_err(|e| CoreError::ServiceUnavailable(e.to_string()))?;

    Ok(MessageBoardRepositories::from_pool(pool))
}

impl MessageBoardRepositories {
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            message_repository: PostgresMessageRepository::new(pool.clone()),
            user_repository: PostgresUserRepository::new(pool.clone()),
            health_repository: PostgresHealthRepository::new(pool.clone()),
            pool,
        }
    }

    /// Applies the embedded SQL migrations, including the sentinel user seed.
    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;
        info!("database migrations applied");
        Ok(())
    }

    pub async fn shutdown_pool(&self) {
        self.pool.close().await;
    }
}

impl From<MessageBoardRepositories> for MessageBoardService {
    fn from(repositories: MessageBoardRepositories) -> Self {
        Service::new(
            repositories.message_repository,
            repositories.user_repository,
            repositories.health_repository,
        )
    }
}

impl MessageBoardService {
    pub async fn shutdown_pool(&self) {
        self.message_repository.pool.close().await;
    }
}
