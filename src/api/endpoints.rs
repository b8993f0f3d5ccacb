//! Calls to the console backend's user endpoints

use crate::api::client::ApiClient;
use crate::types::{
    AppError, ApiResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, Result,
    SignupRequest, SignupResponse, UserIdentity,
};
use serde_json::Value;
use tracing::{info, warn};

pub const LOGIN_PATH: &str = "/user/login";
pub const SIGN_UP_PATH: &str = "/user/sign-up";
pub const FORGOT_PASSWORD_PATH: &str = "/user/forgot-password";
pub const USER_LIST_PATH: &str = "/user/get-all-users";

const LOGIN_FAILED: &str = "Login failed. Please try again.";

impl ApiClient {
    /// Register a new account; the backend emails a generated password
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<SignupResponse> {
        let response = self.post(SIGN_UP_PATH, request).await?;
        serde_json::from_value(response.into_data()).map_err(|e| {
            warn!("Unexpected sign-up response: {}", e);
            AppError::Request(format!("Unexpected sign-up response: {}", e))
        })
    }

    /// Raw login call. Tokens in the reply are stored by the pipeline.
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiResponse> {
        self.post(LOGIN_PATH, request).await
    }

    /// Ask the backend to email a new password
    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<ApiResponse> {
        self.post(FORGOT_PASSWORD_PATH, request).await
    }

    /// Fetch the user list; `filter` is forwarded as the request body
    pub async fn user_list(&self, filter: &Value) -> Result<ApiResponse> {
        self.post(USER_LIST_PATH, filter).await
    }

    /// Validate credentials, log in, and start the session from the issued token.
    pub async fn sign_in(&self, credentials: &LoginRequest) -> Result<UserIdentity> {
        credentials.validate()?;

        let data = match self.login(credentials).await {
            Ok(response) => response.into_data(),
            Err(AppError::Status { body, .. }) => body,
            Err(e) => return Err(e),
        };

        let reply: LoginResponse = serde_json::from_value(data).unwrap_or_else(|e| {
            warn!("Unexpected login response: {}", e);
            LoginResponse::default()
        });
        if !reply.status {
            warn!("Login rejected by server");
            return Err(AppError::Auth(
                reply.message.unwrap_or_else(|| LOGIN_FAILED.to_string()),
            ));
        }

        let access_token = reply
            .access_token
            .ok_or_else(|| AppError::Auth("No access token in login response".to_string()))?;

        let identity = self.session().login(&access_token)?;
        info!(
            user = identity.user_name.as_deref().unwrap_or("unknown"),
            "Signed in"
        );
        Ok(identity)
    }
}
