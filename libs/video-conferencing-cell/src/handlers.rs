use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::extractor::JsonPayload;
use shared_utils::html::escape_html;
use shared_utils::AppState;

use crate::models::{VideoTokenRequest, VideoTokenResponse};
use crate::services::TwilioAccessTokenIssuer;

/// Issue a join token for `{identity, room?}`.
#[axum::debug_handler]
pub async fn get_video_token(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<VideoTokenResponse>, AppError> {
    let request = VideoTokenRequest::from_payload(&payload)?;

    let issuer = TwilioAccessTokenIssuer::new(&state.config)?;
    let token = issuer.issue_video_credential(&request.identity, request.room.as_deref())?;

    Ok(Json(VideoTokenResponse { token }))
}

/// Join page for one consultation room. The page asks `/get_video_token` for a
/// credential bound to the room and hands it to the video SDK.
#[axum::debug_handler]
pub async fn video_call_page(Path(room_name): Path<String>) -> Html<String> {
    debug!("Serving join page for room {}", room_name);
    Html(render_join_page(&room_name))
}

fn render_join_page(room_name: &str) -> String {
    let room = escape_html(room_name);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Consultation {room}</title>
<script src="https://sdk.twilio.com/js/video/releases/2.27.0/twilio-video.min.js"></script>
</head>
<body>
<h2>Consultation room {room}</h2>
<div id="call" data-room="{room}" data-token-url="/get_video_token"></div>
<label>Your name <input id="identity"></label>
<button id="join">Join call</button>
<div id="media"></div>
<script>
document.getElementById("join").addEventListener("click", async () => {{
  const call = document.getElementById("call");
  const identity = document.getElementById("identity").value;
  const response = await fetch(call.dataset.tokenUrl, {{
    method: "POST",
    headers: {{ "Content-Type": "application/json" }},
    body: JSON.stringify({{ identity, room: call.dataset.room }})
  }});
  const body = await response.json();
  if (!response.ok) {{ alert(body.error); return; }}
  const room = await Twilio.Video.connect(body.token, {{ name: call.dataset.room }});
  room.on("participantConnected", p => p.on("trackSubscribed", t =>
    document.getElementById("media").appendChild(t.attach())));
}});
</script>
</body>
</html>
"#
    )
}
