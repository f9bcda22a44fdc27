use chrono::Utc;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_utils::jwt::{encode_hs256, JwtHeader};

use crate::models::{VideoAccessClaims, VideoConferencingError, VideoGrant, VideoGrants};

/// Content type Twilio expects on access tokens.
pub const ACCESS_TOKEN_CONTENT_TYPE: &str = "twilio-fpa;v=1";

/// Issues Twilio Access Tokens carrying a single video grant.
/// Based on: https://www.twilio.com/docs/iam/access-tokens
#[derive(Debug)]
pub struct TwilioAccessTokenIssuer {
    account_sid: String,
    api_key_sid: String,
    api_key_secret: String,
    ttl_secs: i64,
}

impl TwilioAccessTokenIssuer {
    pub fn new(config: &AppConfig) -> Result<Self, VideoConferencingError> {
        if !config.is_video_configured() {
            return Err(VideoConferencingError::NotConfigured);
        }

        Ok(Self {
            account_sid: config.twilio_account_sid.clone(),
            api_key_sid: config.twilio_api_key_sid.clone(),
            api_key_secret: config.twilio_api_key_secret.clone(),
            ttl_secs: i64::try_from(config.video_token_ttl_secs).unwrap_or(i64::MAX),
        })
    }

    /// Claims for `identity`, limited to `room` when one is given.
    pub fn claims_for(&self, identity: &str, room: Option<&str>, issued_at: i64) -> VideoAccessClaims {
        VideoAccessClaims {
            jti: format!("{}-{}", self.api_key_sid, issued_at),
            iss: self.api_key_sid.clone(),
            sub: self.account_sid.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
            grants: VideoGrants {
                identity: identity.to_string(),
                video: VideoGrant {
                    room: room.map(str::to_string),
                },
            },
        }
    }

    /// Sign a join credential for `identity`.
    pub fn issue_video_credential(
        &self,
        identity: &str,
        room: Option<&str>,
    ) -> Result<String, VideoConferencingError> {
        let claims = self.claims_for(identity, room, Utc::now().timestamp());
        debug!("Signing video token {} (expires {})", claims.jti, claims.exp);

        let header = JwtHeader::hs256().with_content_type(ACCESS_TOKEN_CONTENT_TYPE);
        let token = encode_hs256(&header, &claims, &self.api_key_secret)
            .map_err(|message| VideoConferencingError::TokenSigning { message })?;

        info!(
            "Issued video token for {} (room: {})",
            identity,
            room.unwrap_or("any")
        );
        Ok(token)
    }
}
