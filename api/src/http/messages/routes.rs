use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    messages::handlers::{
        __path_create_message, __path_get_message, __path_get_messages,
        __path_list_messages_by_author, __path_save_messages, create_message, get_message,
        get_messages, list_messages_by_author, save_messages,
    },
    server::AppState,
};

pub fn message_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_messages))
        .routes(routes!(create_message))
        .routes(routes!(save_messages))
        .routes(routes!(get_message))
        .routes(routes!(list_messages_by_author))
}
