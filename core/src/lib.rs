pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{MessageBoardRepositories, MessageBoardService, create_repositories};
pub use domain::common::{CoreError, GetPaginated, services::Service};
pub use infrastructure::health::repositories::postgres::PostgresHealthRepository;
pub use infrastructure::message::repositories::postgres::PostgresMessageRepository;
pub use infrastructure::user::repositories::postgres::PostgresUserRepository;
