//! OKX request signing
//!
//! Every call carries `OK-ACCESS-*` headers. The signature is
//! `base64(HMAC-SHA256(secret, timestamp + METHOD + path_with_query + body))`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{SecondsFormat, Utc};
use gasguard_core::{OkxConfig, ProviderError};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

// HeaderName statics must be lowercase; names are case-insensitive on the wire.
pub const ACCESS_KEY_HEADER: &str = "ok-access-key";
pub const ACCESS_SIGN_HEADER: &str = "ok-access-sign";
pub const ACCESS_TIMESTAMP_HEADER: &str = "ok-access-timestamp";
pub const ACCESS_PASSPHRASE_HEADER: &str = "ok-access-passphrase";

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compute the request signature
pub fn sign(
    secret_key: &str,
    timestamp: &str,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<String, ProviderError> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| ProviderError::Config(format!("invalid secret key: {}", e)))?;
    mac.update(timestamp.as_bytes());
    mac.update(method.to_uppercase().as_bytes());
    mac.update(request_path.as_bytes());
    mac.update(body.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the authentication headers for one request
pub fn auth_headers(
    config: &OkxConfig,
    timestamp: &str,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<HeaderMap, ProviderError> {
    let signature = sign(&config.secret_key, timestamp, method, request_path, body)?;

    let mut headers = HeaderMap::new();
    insert(&mut headers, ACCESS_KEY_HEADER, &config.api_key)?;
    insert(&mut headers, ACCESS_SIGN_HEADER, &signature)?;
    insert(&mut headers, ACCESS_TIMESTAMP_HEADER, timestamp)?;
    insert(&mut headers, ACCESS_PASSPHRASE_HEADER, &config.passphrase)?;
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), ProviderError> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| ProviderError::Config(format!("invalid value for {}: {}", name, e)))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
