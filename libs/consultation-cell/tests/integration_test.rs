use std::collections::HashSet;

use axum::{http::StatusCode, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use consultation_cell::router::consultation_routes;
use shared_utils::test_utils::{empty_request, json_request, response_json, response_text, test_state};

fn consultation(patient: &str, mode: &str) -> Value {
    json!({
        "patient_name": patient,
        "age": "29",
        "symptoms": "Persistent headache for three days",
        "mode": mode
    })
}

async fn submit(app: &Router, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/consultations", payload))
        .await
        .unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

async fn list(app: &Router) -> Vec<Value> {
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/consultations"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response_json(response).await["consultations"]
        .as_array()
        .unwrap()
        .clone()
}

#[tokio::test]
async fn test_in_person_consultation_has_no_room() {
    let app = consultation_routes(test_state());

    let (status, body) = submit(&app, &consultation("Priya", "in-person")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Consultation submitted");
    assert!(body.get("room_name").is_none());
    assert!(body.get("room_url").is_none());
    assert_eq!(body["consultation"]["age"], 29);
    assert_eq!(body["consultation"]["mode"], "in-person");

    let listed = list(&app).await;
    assert_eq!(listed.len(), 1);
    assert!(listed[0].get("room_name").is_none());
}

#[tokio::test]
async fn test_call_consultations_get_distinct_rooms() {
    let app = consultation_routes(test_state());
    let mut rooms = HashSet::new();

    for mode in ["video", "audio", "video", "audio"] {
        let (status, body) = submit(&app, &consultation("Priya", mode)).await;
        assert_eq!(status, StatusCode::CREATED);

        let room_name = body["room_name"].as_str().unwrap().to_string();
        assert!(room_name.starts_with("telemed_"));
        assert_eq!(body["room_url"], format!("/video_call/{}", room_name));
        assert_eq!(body["consultation"]["room_name"], room_name.as_str());
        assert!(rooms.insert(room_name));
    }

    let listed: HashSet<String> = list(&app)
        .await
        .iter()
        .map(|c| c["room_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, rooms);
}

#[tokio::test]
async fn test_non_numeric_age_is_rejected_without_writing() {
    let app = consultation_routes(test_state());

    let mut payload = consultation("Priya", "video");
    payload["age"] = json!("abc");

    let (status, body) = submit(&app, &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Age must be a number");
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_unknown_mode_is_accepted_without_room() {
    let app = consultation_routes(test_state());

    let payload = json!({ "patient_name": "A", "age": 30, "symptoms": "x", "mode": "foo" });
    let (status, body) = submit(&app, &payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["consultation"]["mode"], "foo");
    assert!(body.get("room_name").is_none());
    assert!(body.get("room_url").is_none());

    let listed = list(&app).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["mode"], "foo");
    assert!(listed[0].get("room_name").is_none());
}

#[tokio::test]
async fn test_missing_fields_are_listed_in_order() {
    let app = consultation_routes(test_state());

    let payload = json!({ "patient_name": "Priya", "symptoms": "" });

    let (status, body) = submit(&app, &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing fields: age, symptoms, mode");
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_list_consultations_newest_first() {
    let app = consultation_routes(test_state());

    for patient in ["Asha", "Ravi", "Meena"] {
        let (status, _) = submit(&app, &consultation(patient, "in-person")).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let names: Vec<String> = list(&app)
        .await
        .iter()
        .map(|c| c["patient_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Meena", "Ravi", "Asha"]);
}

#[tokio::test]
async fn test_admin_dump_escapes_and_truncates_symptoms() {
    let app = consultation_routes(test_state());

    let mut payload = consultation("<b>Priya</b>", "video");
    payload["symptoms"] = json!("x".repeat(80));
    let (status, _) = submit(&app, &payload).await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .oneshot(empty_request("GET", "/admin/consultations"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert!(html.starts_with("<h2>Consultations</h2>"));
    assert!(html.contains("&lt;b&gt;Priya&lt;&#x2F;b&gt;"));
    assert!(!html.contains("<b>"));
    assert!(html.contains(&format!("{}...", "x".repeat(50))));
    assert!(!html.contains(&"x".repeat(51)));
    assert!(html.contains("telemed_"));
}
