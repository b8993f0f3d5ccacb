//! Session and Token Management
//!
//! Client-side authentication state for the Relay console: where tokens are
//! kept, how the signed-in identity is derived, and who decides whether a
//! user is signed in.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Token payload decoding and expiry checks
//! - [`auth::storage`](crate::auth::storage) - Key/value backends (memory, JSON file)
//! - [`auth::store`](crate::auth::store) - Token store over the session/preference backends
//! - [`auth::session`](crate::auth::session) - Session controller and state
//! - [`auth::routes`](crate::auth::routes) - Protected/public route gating
//!
//! # Security
//!
//! The identity is decoded from the access token without checking its
//! signature. It is display data; the server remains the only authority on
//! whether a token is valid.
//!
//! # Usage
//!
//! ```ignore
//! use relay::auth::{DetachedNavigator, SessionController, TokenStore};
//! use std::sync::Arc;
//!
//! let session = Arc::new(SessionController::new(
//!     TokenStore::in_memory(),
//!     Arc::new(DetachedNavigator),
//! ));
//! session.bootstrap();
//!
//! let user = session.login(&access_token)?;
//! println!("Hello, {}", user.display_name().unwrap_or("there"));
//! ```

/// Token payload decoding and expiry checks.
pub mod jwt;
/// Route gating decisions derived from session state.
pub mod routes;
/// Session controller and its state machine.
pub mod session;
/// Key/value persistence backends.
pub mod storage;
/// Token store over the session and preference backends.
pub mod store;

pub use session::{DetachedNavigator, Navigator, SessionController, SessionEnd, SessionState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::TokenStore;
