use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============= Identity Types =============

/// User identity derived from the access token payload.
///
/// Every field mirrors a claim; a claim missing from the token stays `None`.
/// The identity is display data only and is never trusted for authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: Option<String>,
    pub account_owner_id: Option<String>,
    pub role: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub iat: Option<i64>,
    pub exp: Option<i64>,
}

impl UserIdentity {
    /// Name to show in the UI: `name`, falling back to `userName`.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.user_name.as_deref())
    }
}

/// Display theme, the only preference kept across session clears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(AppError::InvalidInput(format!("Unknown theme: {}", other))),
        }
    }
}

// ============= API Request/Response Types =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of a `/user/login` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub status: bool,
    pub message: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Body of a `/user/sign-up` reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub status: bool,
    pub message: Option<String>,
    /// Delivery status of the generated-password email.
    #[serde(rename = "Email")]
    pub email_status: Option<i64>,
}

impl SignupResponse {
    /// The account exists and its password email went out.
    pub fn accepted(&self) -> bool {
        self.status && self.email_status == Some(200)
    }
}

/// Result of a call routed through [`ApiClient`](crate::api::ApiClient).
///
/// A 401 or 500 reply does not surface as an error: the session is ended and
/// the call resolves to `Revoked` with the server payload. Callers must check
/// for it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Completed { status: u16, data: Value },
    Revoked { data: Value },
}

impl ApiResponse {
    pub fn data(&self) -> &Value {
        match self {
            ApiResponse::Completed { data, .. } | ApiResponse::Revoked { data } => data,
        }
    }

    pub fn into_data(self) -> Value {
        match self {
            ApiResponse::Completed { data, .. } | ApiResponse::Revoked { data } => data,
        }
    }

    pub fn is_revoked(&self) -> bool {
        matches!(self, ApiResponse::Revoked { .. })
    }

    /// HTTP status for completed calls.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiResponse::Completed { status, .. } => Some(*status),
            ApiResponse::Revoked { .. } => None,
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("No tokens found, user logged out")]
    Unauthenticated,

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Request failed with status {status}")]
    Status { status: u16, body: Value },

    #[error("Network error: {0}")]
    Request(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Request(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
