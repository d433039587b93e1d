use axum::{
    Json,
    extract::{Path, Query, State},
};
use board_core::domain::{
    common::GetPaginated,
    message::{
        entities::{InsertMessageInput, Message, MessageId, NewMessage},
        ports::MessageService,
    },
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::http::server::{ApiError, AppState, Response};

#[utoipa::path(
    get,
    path = "/messages",
    tag = "messages",
    params(
        GetPaginated
    ),
    responses(
        (status = 200, description = "Page of messages retrieved successfully", body = Vec<Message>),
        (status = 400, description = "Bad request - Invalid page parameters"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_messages(
    State(state): State<AppState>,
    WithRejection(Query(pagination), _): WithRejection<Query<GetPaginated>, ApiError>,
) -> Result<Response<Vec<Message>>, ApiError> {
    let messages = state.service.get_messages(&pagination).await?;
    Ok(Response::ok(messages))
}

#[utoipa::path(
    get,
    path = "/messages/{id}",
    tag = "messages",
    params(
        ("id" = String, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message retrieved successfully", body = Message),
        (status = 400, description = "Bad request - Malformed message ID"),
        (status = 404, description = "Message not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_message(
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    State(state): State<AppState>,
) -> Result<Response<Message>, ApiError> {
    let message_id = MessageId::from(id);
    let message = state.service.find_message_by_id(&message_id).await?;
    Ok(Response::ok(message))
}

#[utoipa::path(
    post,
    path = "/messages",
    tag = "messages",
    request_body = InsertMessageInput,
    responses(
        (status = 201, description = "Message created successfully", body = Message),
        (status = 422, description = "Unprocessable entity - Invalid message body"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_message(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<InsertMessageInput>, ApiError>,
) -> Result<Response<Message>, ApiError> {
    let message = state.service.save_message(request).await?;
    tracing::info!(message_id = %message.id, author = %message.author.username, "message created");
    Ok(Response::created(message))
}

#[utoipa::path(
    post,
    path = "/messages/batch",
    tag = "messages",
    request_body = Vec<NewMessage>,
    responses(
        (status = 204, description = "Messages saved"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn save_messages(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<Vec<NewMessage>>, ApiError>,
) -> Result<Response<()>, ApiError> {
    state.service.save_all(request).await?;
    Ok(Response::no_content())
}

#[utoipa::path(
    get,
    path = "/users/{username}/messages",
    tag = "messages",
    params(
        ("username" = String, Path, description = "Exact author username")
    ),
    responses(
        (status = 200, description = "Messages written by the user", body = Vec<Message>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_messages_by_author(
    WithRejection(Path(username), _): WithRejection<Path<String>, ApiError>,
    State(state): State<AppState>,
) -> Result<Response<Vec<Message>>, ApiError> {
    let messages = state.service.find_messages_by_author(&username).await?;
    Ok(Response::ok(messages))
}
