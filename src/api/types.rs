use serde::{Deserialize, Serialize};

use super::ApiError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Every resource route takes the original search query as `?data=`,
/// mirroring the front-end contract of the original service.
#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    #[serde(default)]
    pub data: String,
}

impl ResourceQuery {
    pub fn require(&self) -> Result<&str, ApiError> {
        let trimmed = self.data.trim();
        if trimmed.is_empty() {
            return Err(ApiError::bad_request("query parameter 'data' is required"));
        }
        Ok(trimmed)
    }
}
