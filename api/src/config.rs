use board_core::domain::common::services::DEFAULT_ANONYMOUS_USERNAME;
use clap::Parser;
use clap::ValueEnum;
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Parser, Debug, Default)]
#[command(name = "message-board-api")]
#[command(about = "Message Board API Server", long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub board: BoardConfig,

    #[arg(
        long = "environment",
        env = "ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: Environment,
}

#[derive(Clone, Parser, Debug, Default)]
pub struct DatabaseConfig {
    #[arg(
        long = "database-host",
        env = "DATABASE_HOST",
        default_value = "localhost"
    )]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value = "5432")]
    pub port: u16,

    #[arg(
        long = "database-user",
        env = "DATABASE_USER",
        default_value = "postgres"
    )]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        value_name = "database_password"
    )]
    pub password: String,

    #[arg(
        long = "database-name",
        env = "DATABASE_NAME",
        default_value = "message_board",
        value_name = "database_name"
    )]
    pub db_name: String,
}

impl From<DatabaseConfig> for PgConnectOptions {
    fn from(config: DatabaseConfig) -> Self {
        PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.db_name)
    }
}

#[derive(Clone, Parser, Debug, Default)]
pub struct ServerConfig {
    #[arg(
        long = "server-api-port",
        env = "API_PORT",
        default_value = "8080",
        name = "api_port"
    )]
    pub api_port: u16,

    #[arg(
        long = "server-health-port",
        env = "HEALTH_PORT",
        default_value = "8081"
    )]
    pub health_port: u16,
}

#[derive(Clone, Parser, Debug)]
pub struct BoardConfig {
    /// Username of the pre-seeded account that authors anonymous messages.
    ///
    /// `--run-migrations` only seeds `Anonymous`. Any other name must already
    /// exist in `users`, otherwise startup fails the sentinel check.
    #[arg(
        long = "anonymous-username",
        env = "ANONYMOUS_USERNAME",
        default_value = DEFAULT_ANONYMOUS_USERNAME
    )]
    pub anonymous_username: String,

    /// Apply the embedded migrations before serving.
    #[arg(long = "run-migrations", env = "RUN_MIGRATIONS", default_value_t = false)]
    pub run_migrations: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            anonymous_username: DEFAULT_ANONYMOUS_USERNAME.to_string(),
            run_migrations: false,
        }
    }
}

#[derive(Clone, Debug, ValueEnum, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}
