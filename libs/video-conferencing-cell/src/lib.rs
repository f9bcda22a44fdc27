//! # Video Conferencing Cell
//!
//! Join credentials for live video and audio consultations.
//!
//! Media never passes through this service. Both participants of a
//! consultation open the join page for its room, fetch a signed access token
//! from `/get_video_token` and connect to the hosted video service with it.
//! Tokens are Twilio Access Tokens signed locally with the configured API key.
//!
//! ```text
//! +-----------------------------------------------------+
//! |                   Video Cell                        |
//! +-----------------------------------------------------+
//! |  handlers.rs    |  HTTP endpoint handlers           |
//! |  router.rs      |  Route definitions                |
//! |  models.rs      |  Requests, token claims, errors   |
//! |  services/      |                                   |
//! |    twilio.rs    |  Access token issuer              |
//! +-----------------------------------------------------+
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /get_video_token` - Issue a token for `{identity, room?}`
//! - `GET /video_call/{room_name}` - Join page for a consultation room
//!
//! ## Configuration
//!
//! - `TWILIO_ACCOUNT_SID` - account the tokens are issued for
//! - `TWILIO_API_KEY_SID` - API key used as token issuer
//! - `TWILIO_API_KEY_SECRET` - signing secret
//! - `TWILIO_TOKEN_TTL_SECS` - token lifetime (optional, defaults to one hour)
//!
//! Without credentials the token endpoint answers `503`.

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{VideoConferencingError, VideoTokenRequest, VideoTokenResponse};
pub use router::video_conferencing_routes;
pub use services::TwilioAccessTokenIssuer;
