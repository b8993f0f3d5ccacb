//! Access/refresh token payload decoding.
//!
//! Known limitation: nothing here checks a signature. The decoded claims are
//! used to render the signed-in user and to decide whether an expired refresh
//! token is worth sending. The server re-validates every token it receives.

use crate::types::{AppError, Result, UserIdentity};
use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// base64url, accepting payloads with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims recognized in a token payload. Anything else is ignored.
///
/// Claim types are not enforced: ids may be strings or numbers, timestamps
/// any JSON number, and a claim of any other type reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "lenient_id")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub account_owner_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub iat: Option<i64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub exp: Option<i64>,
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Whole seconds; fractional timestamps are truncated.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    })
}

impl From<TokenClaims> for UserIdentity {
    fn from(claims: TokenClaims) -> Self {
        UserIdentity {
            id: claims.sub.or(claims.user_id).or(claims.id),
            account_owner_id: claims.account_owner_id,
            role: claims.role,
            user_name: claims.user_name,
            email: claims.email,
            name: claims.name,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

/// Decodes the payload segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(AppError::MalformedToken(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    }

    let payload = URL_SAFE_LENIENT
        .decode(segments[1])
        .map_err(|e| AppError::MalformedToken(format!("payload is not base64url: {}", e)))?;

    let payload: Value = serde_json::from_slice(&payload)
        .map_err(|e| AppError::MalformedToken(format!("payload is not valid JSON: {}", e)))?;
    if !payload.is_object() {
        return Err(AppError::MalformedToken(
            "payload is not a JSON object".to_string(),
        ));
    }

    serde_json::from_value(payload)
        .map_err(|e| AppError::MalformedToken(format!("unreadable claims: {}", e)))
}

/// Extracts the user identity carried by an access token.
pub fn decode_identity(token: &str) -> Result<UserIdentity> {
    decode_claims(token).map(UserIdentity::from)
}

/// Expiry instant of a token, if it decodes and carries `exp`.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let exp = decode_claims(token).ok()?.exp?;
    DateTime::from_timestamp(exp, 0)
}

/// Human-readable expiry, `"Unknown"` when it cannot be determined.
pub fn expiration_label(token: &str) -> String {
    expires_at(token)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Whether a token's `exp` lies at or before `now`.
///
/// A token without `exp` never expires. One that cannot be decoded counts
/// as expired so it is never forwarded.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp.is_some_and(|exp| exp <= now.timestamp()),
        Err(_) => true,
    }
}
