use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::Mac;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use shared_config::AppConfig;
use shared_database::Database;

use crate::jwt::{HmacSha256, JwtHeader};
use crate::state::AppState;

pub struct TestConfig {
    pub twilio_account_sid: String,
    pub twilio_api_key_sid: String,
    pub twilio_api_key_secret: String,
    pub video_token_ttl_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            twilio_account_sid: "ACtest00000000000000000000000000".to_string(),
            twilio_api_key_sid: "SKtest00000000000000000000000000".to_string(),
            twilio_api_key_secret: "test-api-key-secret-for-video-tokens".to_string(),
            video_token_ttl_secs: 3600,
        }
    }
}

impl TestConfig {
    /// Config with no video credentials at all.
    pub fn without_video() -> Self {
        Self {
            twilio_account_sid: String::new(),
            twilio_api_key_sid: String::new(),
            twilio_api_key_secret: String::new(),
            video_token_ttl_secs: 3600,
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_path: ":memory:".to_string(),
            twilio_account_sid: self.twilio_account_sid.clone(),
            twilio_api_key_sid: self.twilio_api_key_sid.clone(),
            twilio_api_key_secret: self.twilio_api_key_secret.clone(),
            video_token_ttl_secs: self.video_token_ttl_secs,
            ..AppConfig::default()
        }
    }

    /// State over a fresh in-memory store.
    pub fn to_state(&self) -> Arc<AppState> {
        let db = Database::open_in_memory().expect("in-memory store should open");
        Arc::new(AppState::new(self.to_app_config(), db))
    }
}

pub fn test_state() -> Arc<AppState> {
    TestConfig::default().to_state()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub async fn response_text(response: Response) -> String {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(body.to_vec()).expect("body should be UTF-8")
}

pub async fn response_json(response: Response) -> Value {
    let text = response_text(response).await;
    serde_json::from_str(&text).expect("body should be JSON")
}

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

/// Verify a token signed by [`crate::jwt::encode_hs256`] and decode it. Expired tokens are rejected.
pub fn decode_hs256<T: DeserializeOwned>(token: &str, secret: &str) -> Result<(JwtHeader, T), String> {
    if secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let (header_b64, claims_b64, signature_b64) = (parts[0], parts[1], parts[2]);

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        tracing::debug!("Failed to decode signature: {}", e);
        "Invalid signature encoding".to_string()
    })?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(format!("{}.{}", header_b64, claims_b64).as_bytes());

    if mac.verify_slice(&signature).is_err() {
        tracing::debug!("Token signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| "Invalid header encoding".to_string())?;
    let header: JwtHeader = serde_json::from_slice(&header_bytes)
        .map_err(|_| "Invalid header format".to_string())?;

    let claims_bytes = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| "Invalid claims encoding".to_string())?;

    let expiry: ExpiryClaim = serde_json::from_slice(&claims_bytes)
        .map_err(|_| "Invalid claims format".to_string())?;
    if let Some(exp) = expiry.exp {
        let now = Utc::now().timestamp();
        if exp < now {
            tracing::debug!("Token expired at {} (now: {})", exp, now);
            return Err("Token expired".to_string());
        }
    }

    let claims: T = serde_json::from_slice(&claims_bytes).map_err(|e| {
        tracing::debug!("Failed to parse claims: {}", e);
        "Invalid claims format".to_string()
    })?;

    Ok((header, claims))
}
