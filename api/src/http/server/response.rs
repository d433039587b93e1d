use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use serde::Serialize;

/// A JSON body paired with the status code it is sent with.
#[derive(Debug)]
pub struct Response<T: Serialize> {
    status: StatusCode,
    body: T,
}

impl<T: Serialize> Response<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn created(body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }
}

impl Response<()> {
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: (),
        }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        (self.status, Json(self.body)).into_response()
    }
}
