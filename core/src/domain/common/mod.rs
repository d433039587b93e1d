use serde::Deserialize;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

use crate::domain::message::entities::MessageId;

pub mod services;

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Service is currently unavailable")]
    ServiceUnavailable(String),

    #[error("Message with id {id} not found")]
    MessageNotFound { id: MessageId },

    /// The sentinel author is not seeded in the store. This is a deployment
    /// defect, not a per-request failure.
    #[error("Sentinel user '{username}' not found in the database")]
    AnonymousUserMissing { username: String },

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error("Page {page} of size {size} is out of range")]
    PageOutOfRange { page: u32, size: u32 },

    #[error("Health check failed")]
    Unhealthy,

    #[error("Database error: {msg}")]
    DatabaseError { msg: String },
}

impl From<sqlx::Error> for CoreError {
    fn from(error: sqlx::Error) -> Self {
        CoreError::DatabaseError {
            msg: error.to_string(),
        }
    }
}

/// Offset pagination with a zero-based page index.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetPaginated {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    20
}

impl GetPaginated {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Largest offset a store can be asked to skip (a signed 64-bit `OFFSET`).
    pub const MAX_OFFSET: u64 = i64::MAX as u64;
}

impl Default for GetPaginated {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}
