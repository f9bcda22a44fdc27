//! Room naming for live consultations.

use uuid::Uuid;

use crate::models::ConsultationMode;

pub const ROOM_PREFIX: &str = "telemed_";

/// Hex characters of randomness after the prefix (48 bits).
pub const ROOM_TOKEN_LEN: usize = 12;

/// A fresh room name: the prefix followed by random lowercase hex.
pub fn mint_room_name() -> String {
    // The first 12 hex digits of a v4 UUID sit before the version nibble, so all are random.
    let token = Uuid::new_v4().simple().to_string();
    format!("{}{}", ROOM_PREFIX, &token[..ROOM_TOKEN_LEN])
}

/// The room a consultation in `mode` gets, if any.
pub fn room_for(mode: &ConsultationMode) -> Option<String> {
    mode.needs_room().then(mint_room_name)
}

/// Path both participants open to join `room_name`.
pub fn room_url(room_name: &str) -> String {
    format!("/video_call/{}", room_name)
}
