//! # Relay - Session core for the campaign console
//!
//! Client-side authentication for the Relay messaging-campaign console: a
//! token store, an API gateway that authenticates every outbound call, and a
//! session controller the views consult to decide who is signed in.
//!
//! ## Overview
//!
//! Relay can be used in two ways:
//!
//! 1. **As a library** - Embed the session core in a front end
//! 2. **As a CLI** - Run the `relay-console` binary against a backend
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use relay::{ApiClient, SessionController, TokenStore};
//! use relay::auth::DetachedNavigator;
//! use relay::types::LoginRequest;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(SessionController::new(
//!         TokenStore::in_memory(),
//!         Arc::new(DetachedNavigator),
//!     ));
//!     session.bootstrap();
//!
//!     let api = ApiClient::new("http://localhost:8080/api", session.clone());
//!     let user = api
//!         .sign_in(&LoginRequest {
//!             email: "alice@example.com".into(),
//!             password: "secret1".into(),
//!         })
//!         .await?;
//!
//!     println!("signed in as {:?}", user.display_name());
//!     let users = api.user_list(&serde_json::json!({"page": 1})).await?;
//!     if users.is_revoked() {
//!         println!("session ended by the server");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Token decoding, storage, session controller, route guards
//! - [`api`] - Authenticated gateway and endpoint wrappers
//! - [`cli`] - Command-line front end
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and form validation

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Authenticated API gateway.
pub mod api;
/// Tokens, storage and session state.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and validation utilities.
pub mod utils;

// Re-export commonly used types
pub use api::ApiClient;
pub use auth::{SessionController, SessionState, TokenStore};
pub use types::{AppError, ApiResponse, Result, UserIdentity};
pub use utils::toml_config::RelayConfig;
