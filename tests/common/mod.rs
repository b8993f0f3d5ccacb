//! Shared fixtures for the integration tests.
//!
//! Tokens are minted with `jsonwebtoken` so they have the same shape the
//! backend issues; the library never checks the signature.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use relay::api::ApiClient;
use relay::auth::{Navigator, SessionController, TokenStore};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const SIGNING_SECRET: &[u8] = b"integration-test-secret";

/// Sign arbitrary claims with HS256.
pub fn mint(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SIGNING_SECRET),
    )
    .expect("failed to mint test token")
}

/// Access token for `alice`, an admin, valid for an hour.
pub fn alice_token() -> String {
    let now = Utc::now();
    mint(json!({
        "sub": "u1",
        "accountOwnerId": "acct-9",
        "role": "admin",
        "userName": "alice",
        "email": "alice@example.com",
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(1)).timestamp(),
    }))
}

/// Refresh token expiring `offset` from now (negative for already expired).
pub fn refresh_token(offset: Duration) -> String {
    mint(json!({
        "sub": "u1",
        "exp": (Utc::now() + offset).timestamp(),
    }))
}

/// Navigator that counts forced redirects.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_entry(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Bootstrapped in-memory session plus a gateway pointed at `base_url`.
pub fn client_for(
    base_url: &str,
    store: TokenStore,
) -> (ApiClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let session = Arc::new(SessionController::new(store, navigator.clone()));
    session.bootstrap();
    (ApiClient::new(base_url, session), navigator)
}

/// Store already holding alice's access token and an unexpired refresh token.
pub fn signed_in_store() -> TokenStore {
    let store = TokenStore::in_memory();
    store
        .set_tokens(Some(&alice_token()), Some(&refresh_token(Duration::days(7))))
        .expect("in-memory store never fails");
    store
}
