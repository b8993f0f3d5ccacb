//! Command handlers for the relay-console binary

use crate::api::ApiClient;
use crate::auth::jwt;
use crate::auth::session::{Navigator, SessionState};
use crate::cli::output::Output;
use crate::cli::ThemeArg;
use crate::types::{
    ApiResponse, AppError, ForgotPasswordRequest, LoginRequest, Result, SignupRequest, Theme,
};
use crate::utils::toml_config::RelayConfig;
use chrono::Utc;
use serde_json::Value;
use std::path::Path;

/// Terminal stand-in for the view-layer redirect: tells the user to sign in again.
#[derive(Debug, Clone, Copy)]
pub struct CliNavigator {
    output: Output,
}

impl CliNavigator {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Navigator for CliNavigator {
    fn redirect_to_entry(&self) {
        self.output.warning("You are signed out.");
        self.output
            .hint("Run 'relay-console login -e <email>' to start a new session");
    }
}

/// Show who is signed in and when the stored tokens expire
pub fn status(api: &ApiClient, output: &Output) -> Result<()> {
    let session = api.session();
    output.header("Session");
    output.kv("Backend", api.base_url());

    match session.state() {
        SessionState::Authenticated(identity) => {
            output.success(&format!(
                "Signed in as {}",
                identity.display_name().unwrap_or("unknown user")
            ));
            output.identity(&identity);

            let store = session.store();
            if let Some(access) = store.access_token() {
                output.kv("Access token expires", &jwt::expiration_label(&access));
            }
            match store.refresh_token() {
                Some(refresh) if jwt::is_expired(&refresh, Utc::now()) => {
                    output.warning("Refresh token has expired; it will no longer be sent");
                }
                Some(refresh) => {
                    output.kv("Refresh token expires", &jwt::expiration_label(&refresh));
                }
                None => {}
            }
        }
        SessionState::Unauthenticated | SessionState::Initializing => {
            output.info("Not signed in");
            output.hint("Run 'relay-console login -e <email>' to sign in");
        }
    }
    output.kv("Theme", session.store().theme().as_str());
    Ok(())
}

pub async fn login(api: &ApiClient, output: &Output, email: String, password: String) -> Result<()> {
    let identity = api.sign_in(&LoginRequest { email, password }).await?;
    output.success(&format!(
        "Signed in as {}",
        identity.display_name().unwrap_or("unknown user")
    ));
    if let Some(role) = identity.role.as_deref() {
        output.kv("Role", role);
    }
    Ok(())
}

pub fn logout(api: &ApiClient, output: &Output) -> Result<()> {
    api.session().logout();
    output.success("Signed out");
    Ok(())
}

pub async fn signup(api: &ApiClient, output: &Output, name: String, email: String) -> Result<()> {
    let request = SignupRequest { name, email };
    request.validate()?;

    let reply = api.sign_up(&request).await?;
    if reply.accepted() {
        output.success("Account created. Check your email for the password.");
        Ok(())
    } else {
        Err(AppError::Auth(
            reply
                .message
                .unwrap_or_else(|| "Sign up failed. Please try again.".to_string()),
        ))
    }
}

pub async fn forgot_password(api: &ApiClient, output: &Output, email: String) -> Result<()> {
    let request = ForgotPasswordRequest { email };
    request.validate()?;

    let response = api.forgot_password(&request).await?;
    let message = response
        .data()
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("A new password has been sent to your email.");
    output.success(message);
    Ok(())
}

/// Fetch the user list; the filter is a JSON object sent as the body
pub async fn users(api: &ApiClient, output: &Output, filter: &str) -> Result<()> {
    let filter: Value = serde_json::from_str(filter)
        .map_err(|e| AppError::InvalidInput(format!("Filter is not valid JSON: {}", e)))?;

    match api.user_list(&filter).await? {
        ApiResponse::Completed { data, .. } => {
            output.header("Users");
            output.block(&pretty(&data));
            Ok(())
        }
        ApiResponse::Revoked { data } => {
            output.warning("The server ended the session");
            if let Some(message) = data.get("message").and_then(Value::as_str) {
                output.kv("Reason", message);
            }
            output.hint("Run 'relay-console login -e <email>' to sign in again");
            Ok(())
        }
    }
}

/// Print a token's claims. Falls back to the stored access token.
pub fn decode(api: &ApiClient, output: &Output, token: Option<String>) -> Result<()> {
    let token = match token.or_else(|| api.session().store().access_token()) {
        Some(token) => token,
        None => return Err(AppError::InvalidInput("No token given and none stored".to_string())),
    };

    let identity = jwt::decode_identity(&token)?;
    output.header("Token claims");
    output.identity(&identity);
    output.kv("Expires", &jwt::expiration_label(&token));
    if jwt::is_expired(&token, Utc::now()) {
        output.warning("Token has expired");
    }
    output.hint("Claims are read without verifying the signature");
    Ok(())
}

pub fn theme(api: &ApiClient, output: &Output, value: Option<ThemeArg>) -> Result<()> {
    let store = api.session().store();
    let current = store.theme();

    let next = match value {
        None => {
            output.kv("Theme", current.as_str());
            return Ok(());
        }
        Some(ThemeArg::Light) => Theme::Light,
        Some(ThemeArg::Dark) => Theme::Dark,
        Some(ThemeArg::Toggle) => current.toggled(),
    };

    store.set_theme(next)?;
    output.success(&format!("Theme set to {}", next.as_str()));
    Ok(())
}

pub fn config(config: &RelayConfig, path: &Path, output: &Output, validate: bool) -> Result<()> {
    output.header("Configuration");
    if path.exists() {
        output.kv("File", &path.display().to_string());
    } else {
        output.kv("File", &format!("{} (not found, using defaults)", path.display()));
    }
    output.kv("Base URL", &config.base_url());
    output.kv("Timeout", &format!("{}s", config.api.timeout_secs));
    output.kv("Access header", &config.auth.access_header);
    output.kv("Refresh header", &config.auth.refresh_header);
    output.kv("Exempt paths", &config.auth.exempt_paths.join(", "));
    output.kv("Session file", &config.storage.session_file.display().to_string());
    output.kv(
        "Preferences file",
        &config.storage.preferences_file.display().to_string(),
    );
    output.kv("Log level", &config.logging.level);

    if validate {
        config
            .validate()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        output.success("Configuration is valid");
    }
    Ok(())
}

fn pretty(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}
