use crate::auth::jwt;
use crate::auth::session::{SessionController, SessionEnd};
use crate::types::{AppError, ApiResponse, Result};
use crate::utils::toml_config::RelayConfig;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

const REFRESH_HEADER: &str = "refreshtoken";
const EXEMPT_PATHS: &[&str] = &["/user/login", "/user/sign-up", "/user/forgot-password"];

/// Gateway every backend call goes through.
///
/// Before a call it attaches the stored credentials; after it, it stores
/// rotated tokens and ends the session on 401/500. Call sites never touch
/// tokens themselves.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionController>,
    access_header: HeaderName,
    refresh_header: HeaderName,
    exempt_paths: Vec<String>,
}

impl ApiClient {
    /// Client with the default header names and exempt endpoints.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionController>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            access_header: AUTHORIZATION,
            refresh_header: HeaderName::from_static(REFRESH_HEADER),
            exempt_paths: EXEMPT_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn from_config(config: &RelayConfig, session: Arc<SessionController>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            session,
            access_header: header_name(&config.auth.access_header)?,
            refresh_header: header_name(&config.auth.refresh_header)?,
            exempt_paths: config.auth.exempt_paths.clone(),
        })
    }

    pub fn session(&self) -> &Arc<SessionController> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)
            .map_err(|e| AppError::InvalidInput(format!("Failed to serialize request: {}", e)))?;
        self.send(Method::POST, path, Some(body)).await
    }

    /// Sends `method path` with an optional JSON body through the pipeline.
    ///
    /// 401 and 500 replies resolve to [`ApiResponse::Revoked`]; any other
    /// non-success status is an [`AppError::Status`].
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        let headers = if self.is_exempt(path) {
            HeaderMap::new()
        } else {
            self.preflight(path)?
        };

        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending request");

        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Error in request to {}: {}", path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        self.postflight(path, status, parse_body(&bytes))
    }

    fn is_exempt(&self, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        self.exempt_paths.iter().any(|p| p == path)
    }

    fn preflight(&self, path: &str) -> Result<HeaderMap> {
        let store = self.session.store();
        let access = store.access_token();
        let refresh = store.refresh_token();

        if access.is_none() && refresh.is_none() {
            warn!(path, "No tokens found, user logged out");
            self.session.end_session(SessionEnd::MissingCredentials);
            return Err(AppError::Unauthenticated);
        }

        let mut headers = HeaderMap::new();

        if let Some(refresh) = refresh {
            if jwt::is_expired(&refresh, Utc::now()) {
                debug!("Refresh token expired, omitting {} header", self.refresh_header);
            } else {
                headers.insert(self.refresh_header.clone(), header_value(&refresh)?);
            }
        }

        // The server alone judges access-token expiry.
        if let Some(access) = access {
            headers.insert(self.access_header.clone(), header_value(&access)?);
        }

        Ok(headers)
    }

    fn postflight(&self, path: &str, status: StatusCode, data: Value) -> Result<ApiResponse> {
        // Error payloads may still carry a refreshed token.
        self.rotate(&data);

        match status.as_u16() {
            401 => {
                warn!(path, "Unauthorized request, status code 401.");
                self.session.end_session(SessionEnd::Unauthorized);
                Ok(ApiResponse::Revoked { data })
            }
            // TODO: stop ending the session on 500 once the backend reports auth faults as 401 only.
            500 => {
                warn!(path, "Server error, status code 500; clearing session.");
                self.session.end_session(SessionEnd::ServerFault);
                Ok(ApiResponse::Revoked { data })
            }
            code if status.is_success() => Ok(ApiResponse::Completed { status: code, data }),
            code => {
                warn!(path, status = code, "Request failed");
                Err(AppError::Status { status: code, body: data })
            }
        }
    }

    fn rotate(&self, data: &Value) {
        let access = data.get("accessToken").and_then(Value::as_str);
        let refresh = data.get("refreshToken").and_then(Value::as_str);
        if access.is_none() && refresh.is_none() {
            return;
        }

        match self.session.store().set_tokens(access, refresh) {
            Ok(()) => info!(
                access = access.is_some(),
                refresh = refresh.is_some(),
                "Stored rotated tokens"
            ),
            Err(e) => warn!("Failed to store rotated tokens: {}", e),
        }
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| AppError::InvalidInput(format!("Invalid header name: {}", name)))
}

fn header_value(token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(token).map_err(|_| {
        AppError::MalformedToken("token contains characters not allowed in a header".to_string())
    })
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
