use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

pub(crate) type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,
}

impl JwtHeader {
    pub fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
            cty: None,
        }
    }

    pub fn with_content_type(mut self, cty: &str) -> Self {
        self.cty = Some(cty.to_string());
        self
    }
}

/// Sign `claims` as a compact HS256 JWT.
pub fn encode_hs256<T: Serialize>(header: &JwtHeader, claims: &T, secret: &str) -> Result<String, String> {
    if secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let header_json = serde_json::to_vec(header).map_err(|e| format!("Invalid header: {}", e))?;
    let claims_json = serde_json::to_vec(claims).map_err(|e| format!("Invalid claims: {}", e))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const SECRET: &str = "test-secret-key-for-jwt-signing";

    #[test]
    fn token_has_header_claims_and_signature() {
        let header = JwtHeader::hs256().with_content_type("twilio-fpa;v=1");
        let token = encode_hs256(&header, &json!({"sub": "AC123"}), SECRET).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let decoded_header: JwtHeader =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[0]).unwrap()).unwrap();
        assert_eq!(decoded_header, header);
        let claims: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        assert_eq!(claims["sub"], "AC123");
    }

    #[test]
    fn plain_header_omits_content_type() {
        let json = serde_json::to_value(JwtHeader::hs256()).unwrap();
        assert_eq!(json, json!({"alg": "HS256", "typ": "JWT"}));
    }

    #[test]
    fn empty_secret_cannot_sign() {
        assert!(encode_hs256(&JwtHeader::hs256(), &json!({}), "").is_err());
    }
}
