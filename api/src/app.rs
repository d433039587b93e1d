use axum::Router;
use board_core::{
    MessageBoardService, create_repositories, domain::message::ports::MessageService,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    config::Config,
    http::{
        health::routes::health_routes,
        messages::routes::message_routes,
        server::{ApiError, AppState},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Message Board API", description = "Messages and their authors"),
    tags((name = "messages", description = "Message operations"))
)]
pub struct ApiDoc;

pub struct App {
    config: Config,
    state: AppState,
    app_router: Router,
    health_router: Router,
}

impl App {
    pub async fn new(config: Config) -> Result<Self, ApiError> {
        info!(environment = ?config.environment, "initializing application");

        let repositories = create_repositories(config.database.clone().into())
            .await
            .map_err(|e| ApiError::StartupError(e.to_string()))?;

        if config.board.run_migrations {
            repositories
                .run_migrations()
                .await
                .map_err(|e| ApiError::StartupError(e.to_string()))?;
        }

        let service = MessageBoardService::from(repositories)
            .with_anonymous_username(config.board.anonymous_username.clone());
        let state = AppState::new(service);

        // Refuse to boot without the sentinel author.
        state.service.ensure_anonymous_user().await.map_err(|e| {
            error!(error = %e, "sentinel user check failed");
            ApiError::StartupError(e.to_string())
        })?;

        let app_router = api_router(state.clone());
        let health_router = health_routes().with_state(state.clone());

        Ok(Self {
            config,
            state,
            app_router,
            health_router,
        })
    }

    pub async fn start(self) -> Result<(), ApiError> {
        let api_addr = format!("0.0.0.0:{}", self.config.server.api_port);
        let health_addr = format!("0.0.0.0:{}", self.config.server.health_port);

        let api_listener = TcpListener::bind(&api_addr)
            .await
            .map_err(|e| ApiError::StartupError(e.to_string()))?;
        let health_listener = TcpListener::bind(&health_addr)
            .await
            .map_err(|e| ApiError::StartupError(e.to_string()))?;
        info!(%api_addr, %health_addr, "listening");

        let api_server = axum::serve(api_listener, self.app_router)
            .with_graceful_shutdown(shutdown_signal())
            .into_future();
        let health_server = axum::serve(health_listener, self.health_router)
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        let result = tokio::try_join!(api_server, health_server);

        info!("shutting down, closing database pool");
        self.state.shutdown().await;

        result
            .map(|_| ())
            .map_err(|e| ApiError::StartupError(e.to_string()))
    }
}

/// Builds the public API router, including the OpenAPI documentation at `/docs`.
pub fn api_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(message_routes())
        .split_for_parts();

    router
        .merge(Scalar::with_url("/docs", api))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
