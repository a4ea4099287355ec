use serde::{Deserialize, Serialize};

use crate::core::error::ApiError;

/// Standard `{success, message, data}` envelope every backend endpoint uses.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Collapses the envelope: `success:false` becomes a backend rejection
    /// carrying the server message when present.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Backend(self.rejection_message()));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("missing `data` in response envelope".to_string()))
    }

    /// Like [`into_result`](Self::into_result) for endpoints whose success
    /// payload carries nothing worth returning.
    pub fn into_ok(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Backend(self.rejection_message()))
        }
    }

    fn rejection_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Request rejected by the backend".to_string())
    }
}

/// POST body shared by the paginated list endpoints. `search` serializes as
/// `null` when empty, matching what the backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
}

/// One page of a list endpoint response. `has_next` is authoritative; the
/// client never derives it from the counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
}

/// POST /careers/prices/paginated body; the price history is scoped to one
/// career instead of a free-text search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPricesRequest {
    #[serde(rename = "id_carrera")]
    pub career_id: i64,
    pub page: u32,
    pub page_size: u32,
}

/// `data` payload of POST /login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "usuario")]
    pub user: LoginUser,
}

/// The user record attached to a login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    #[serde(rename = "type")]
    pub role: String,
}
