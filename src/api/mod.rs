//! Authenticated API Gateway
//!
//! Every call to the console backend goes through [`ApiClient`], which owns
//! the credential pre-flight and the auth-failure post-flight.
//!
//! # Module Structure
//!
//! - [`api::client`](crate::api::client) - The gateway and its request pipeline
//! - [`api::endpoints`](crate::api::endpoints) - Typed wrappers for the user endpoints
//!
//! # API Endpoints
//!
//! ## Unauthenticated (no credential pre-flight)
//! - `POST /user/login` - Exchange email/password for an access/refresh token pair
//! - `POST /user/sign-up` - Create an account; a password is emailed
//! - `POST /user/forgot-password` - Email a new password
//!
//! ## Authenticated
//! - `POST /user/get-all-users` - Paginated user list for the account
//!
//! # Authentication
//!
//! Authenticated calls carry the raw access token and, while it is unexpired,
//! the refresh token:
//! ```text
//! Authorization: <access token>
//! refreshtoken: <refresh token>
//! ```
//!
//! A 401 or 500 reply ends the session and resolves to
//! [`ApiResponse::Revoked`](crate::types::ApiResponse::Revoked) rather than an
//! error.

/// Gateway client and request pipeline.
pub mod client;
/// User endpoint wrappers.
pub mod endpoints;

pub use client::ApiClient;
