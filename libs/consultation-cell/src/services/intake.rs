use rusqlite::{params, Connection};
use serde_json::{Map, Value};
use tracing::{debug, info};

use shared_database::{timestamp, Database, DatabaseError};
use shared_models::validation::ValidationError;
use shared_utils::fields::{coerce_integer, require_fields, required_string};
use shared_utils::AppState;

use crate::models::{Consultation, ConsultationMode, NewConsultation};
use crate::services::room;

pub struct ConsultationIntakeService {
    db: Database,
}

impl ConsultationIntakeService {
    pub fn new(state: &AppState) -> Self {
        Self::with_database(state.db.clone())
    }

    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Check a submitted consultation. Nothing is written here.
    pub fn validate_submission(&self, payload: &Map<String, Value>) -> Result<NewConsultation, ValidationError> {
        require_fields(payload, &NewConsultation::REQUIRED_FIELDS)?;

        let patient_name = required_string(payload, "patient_name")?.trim().to_string();
        let age = parse_age(&payload["age"])?;
        let symptoms = required_string(payload, "symptoms")?.trim().to_string();
        let mode = ConsultationMode::from(required_string(payload, "mode")?);

        Ok(NewConsultation {
            patient_name,
            age,
            symptoms,
            mode,
        })
    }

    /// Persist a validated consultation, minting a room when its mode needs one.
    pub async fn submit_consultation(&self, submission: NewConsultation) -> Result<Consultation, DatabaseError> {
        let room_name = room::room_for(&submission.mode);

        let consultation = self
            .db
            .call(move |conn| insert_consultation(conn, submission, room_name))
            .await?;

        match &consultation.room_name {
            Some(room_name) => info!(
                "Consultation {} submitted ({}), room {}",
                consultation.id, consultation.mode, room_name
            ),
            None => info!("Consultation {} submitted ({})", consultation.id, consultation.mode),
        }
        Ok(consultation)
    }

    /// Newest first.
    pub async fn list_consultations(&self) -> Result<Vec<Consultation>, DatabaseError> {
        debug!("Listing consultations");
        self.db.call(|conn| query_consultations(conn)).await
    }
}

fn parse_age(value: &Value) -> Result<i64, ValidationError> {
    let age = coerce_integer(value)
        .ok_or_else(|| ValidationError::invalid_type("age", "Age must be a number"))?;
    if age <= 0 {
        return Err(ValidationError::invalid_type("age", "Age must be a positive number"));
    }
    Ok(age)
}

pub fn insert_consultation(
    conn: &Connection,
    submission: NewConsultation,
    room_name: Option<String>,
) -> Result<Consultation, DatabaseError> {
    let created_at = timestamp::now();

    conn.execute(
        "INSERT INTO consultations (patient_name, age, symptoms, mode, room_name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            submission.patient_name,
            submission.age,
            submission.symptoms,
            submission.mode.as_str(),
            room_name,
            timestamp::to_sql(&created_at),
        ],
    )?;

    Ok(Consultation {
        id: conn.last_insert_rowid(),
        patient_name: submission.patient_name,
        age: submission.age,
        symptoms: submission.symptoms,
        mode: submission.mode,
        room_name,
        created_at,
    })
}

pub fn query_consultations(conn: &Connection) -> Result<Vec<Consultation>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_name, age, symptoms, mode, room_name, created_at
         FROM consultations
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Consultation {
            id: row.get(0)?,
            patient_name: row.get(1)?,
            age: row.get(2)?,
            symptoms: row.get(3)?,
            mode: ConsultationMode::from(row.get::<_, String>(4)?),
            room_name: row.get(5)?,
            created_at: timestamp::column(row, 6)?,
        })
    })?;

    let mut consultations = Vec::new();
    for row in rows {
        consultations.push(row?);
    }
    Ok(consultations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use std::collections::HashSet;

    fn service() -> ConsultationIntakeService {
        ConsultationIntakeService::with_database(Database::open_in_memory().unwrap())
    }

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn submission_with_mode(mode: Value) -> Map<String, Value> {
        payload(json!({
            "patient_name": "Kavya",
            "age": 30,
            "symptoms": "fever",
            "mode": mode
        }))
    }

    fn submission(mode: &str, age: Value) -> Map<String, Value> {
        payload(json!({
            "patient_name": " Kavya ",
            "age": age,
            "symptoms": " fever and cough ",
            "mode": mode
        }))
    }

    #[test]
    fn validation_coerces_age_and_trims_text() {
        let new = service().validate_submission(&submission("video", json!("34"))).unwrap();
        assert_eq!(
            new,
            NewConsultation {
                patient_name: "Kavya".to_string(),
                age: 34,
                symptoms: "fever and cough".to_string(),
                mode: ConsultationMode::Video,
            }
        );
    }

    #[test]
    fn non_numeric_age_is_a_type_error() {
        for age in [json!("abc"), json!("3.5"), json!(3.5), json!(true)] {
            let err = service().validate_submission(&submission("audio", age)).unwrap_err();
            assert_eq!(err.to_string(), "Age must be a number");
        }
    }

    #[test]
    fn non_positive_age_is_rejected() {
        let err = service().validate_submission(&submission("audio", json!(-4))).unwrap_err();
        assert_eq!(err.to_string(), "Age must be a positive number");
    }

    #[test]
    fn zero_age_counts_as_missing() {
        let err = service().validate_submission(&submission("audio", json!(0))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["age".into()]));
    }

    #[tokio::test]
    async fn unknown_mode_is_stored_verbatim_without_room() {
        let service = service();
        let new = service.validate_submission(&submission("foo", json!(30))).unwrap();
        assert_eq!(new.mode, ConsultationMode::Other("foo".to_string()));

        let consultation = service.submit_consultation(new).await.unwrap();
        assert_eq!(consultation.room_name, None);

        let stored = service.list_consultations().await.unwrap();
        assert_eq!(stored, vec![consultation]);
        assert_eq!(stored[0].mode.as_str(), "foo");
    }

    #[test]
    fn mode_must_be_text() {
        let err = service().validate_submission(&submission_with_mode(json!(7))).unwrap_err();
        assert_eq!(err.to_string(), "mode must be a string");
    }

    #[tokio::test]
    async fn store_refuses_room_for_non_call_mode() {
        let service = service();
        let new = service.validate_submission(&submission("foo", json!(30))).unwrap();
        let err = service
            .db
            .call(move |conn| insert_consultation(conn, new, Some("telemed_000000000001".into())))
            .await
            .unwrap_err();
        assert_matches!(err, DatabaseError::ConstraintViolation(_));
    }

    #[tokio::test]
    async fn in_person_consultations_have_no_room() {
        let service = service();
        let new = service.validate_submission(&submission("in-person", json!(30))).unwrap();
        let consultation = service.submit_consultation(new).await.unwrap();
        assert_eq!(consultation.room_name, None);
    }

    #[tokio::test]
    async fn call_consultations_get_distinct_rooms() {
        let service = service();
        let mut rooms = HashSet::new();

        for i in 0..500 {
            let mode = if i % 2 == 0 { "video" } else { "audio" };
            let new = service.validate_submission(&submission(mode, json!(30))).unwrap();
            let consultation = service.submit_consultation(new).await.unwrap();
            let room = consultation.room_name.expect("call consultations get a room");
            assert!(room.starts_with(room::ROOM_PREFIX));
            assert!(rooms.insert(room));
        }

        let stored: HashSet<String> = service
            .list_consultations()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|c| c.room_name)
            .collect();
        assert_eq!(stored, rooms);
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_round_trips() {
        let service = service();
        let first = service
            .submit_consultation(service.validate_submission(&submission("video", json!(30))).unwrap())
            .await
            .unwrap();
        let second = service
            .submit_consultation(service.validate_submission(&submission("in-person", json!(41))).unwrap())
            .await
            .unwrap();

        assert_eq!(service.list_consultations().await.unwrap(), vec![second, first]);
    }

    #[tokio::test]
    async fn duplicate_room_names_are_refused_by_the_store() {
        let service = service();
        let new = NewConsultation {
            patient_name: "Kavya".to_string(),
            age: 30,
            symptoms: "fever".to_string(),
            mode: ConsultationMode::Video,
        };

        let again = new.clone();
        service
            .db
            .call(move |conn| insert_consultation(conn, new, Some("telemed_000000000000".into())))
            .await
            .unwrap();
        let err = service
            .db
            .call(move |conn| insert_consultation(conn, again, Some("telemed_000000000000".into())))
            .await
            .unwrap_err();
        assert_matches!(err, DatabaseError::ConstraintViolation(_));
        assert_eq!(service.list_consultations().await.unwrap().len(), 1);
    }
}
