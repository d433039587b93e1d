use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::common::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct IsHealthy(pub bool);

impl IsHealthy {
    pub fn new(healthy: bool) -> Self {
        Self(healthy)
    }

    pub fn to_result(self) -> Result<IsHealthy, CoreError> {
        if self.0 {
            Ok(self)
        } else {
            Err(CoreError::Unhealthy)
        }
    }
}
