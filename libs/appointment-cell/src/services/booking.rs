// libs/appointment-cell/src/services/booking.rs
use rusqlite::{params, Connection};
use serde_json::{Map, Value};
use tracing::{debug, info};

use shared_database::{timestamp, Database, DatabaseError};
use shared_models::validation::ValidationError;
use shared_utils::fields::{require_fields, required_string};
use shared_utils::AppState;

use crate::models::{Appointment, NewAppointment};

pub struct AppointmentBookingService {
    db: Database,
}

impl AppointmentBookingService {
    pub fn new(state: &AppState) -> Self {
        Self::with_database(state.db.clone())
    }

    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Check a submitted booking. Nothing is written here.
    pub fn validate_booking(&self, payload: &Map<String, Value>) -> Result<NewAppointment, ValidationError> {
        require_fields(payload, &NewAppointment::REQUIRED_FIELDS)?;

        Ok(NewAppointment {
            patient_name: required_string(payload, "patient_name")?.trim().to_string(),
            city: required_string(payload, "city")?,
            doctor: required_string(payload, "doctor")?,
            date: required_string(payload, "date")?,
            time: required_string(payload, "time")?,
        })
    }

    pub async fn book_appointment(&self, booking: NewAppointment) -> Result<Appointment, DatabaseError> {
        let appointment = self
            .db
            .call(move |conn| insert_appointment(conn, booking))
            .await?;

        info!(
            "Appointment {} booked for {} with {} on {} at {}",
            appointment.id, appointment.patient_name, appointment.doctor, appointment.date, appointment.time
        );
        Ok(appointment)
    }

    /// Newest first, optionally restricted to one city.
    pub async fn list_appointments(&self, city: Option<&str>) -> Result<Vec<Appointment>, DatabaseError> {
        debug!("Listing appointments (city: {:?})", city);
        let city = city.map(str::to_string);
        self.db
            .call(move |conn| query_appointments(conn, city.as_deref()))
            .await
    }
}

pub fn insert_appointment(conn: &Connection, booking: NewAppointment) -> Result<Appointment, DatabaseError> {
    let created_at = timestamp::now();

    conn.execute(
        "INSERT INTO appointments (patient_name, city, doctor, date, time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            booking.patient_name,
            booking.city,
            booking.doctor,
            booking.date,
            booking.time,
            timestamp::to_sql(&created_at),
        ],
    )?;

    Ok(Appointment {
        id: conn.last_insert_rowid(),
        patient_name: booking.patient_name,
        city: booking.city,
        doctor: booking.doctor,
        date: booking.date,
        time: booking.time,
        created_at,
    })
}

pub fn query_appointments(conn: &Connection, city: Option<&str>) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_name, city, doctor, date, time, created_at
         FROM appointments
         WHERE ?1 IS NULL OR city = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![city], |row| {
        Ok(Appointment {
            id: row.get(0)?,
            patient_name: row.get(1)?,
            city: row.get(2)?,
            doctor: row.get(3)?,
            date: row.get(4)?,
            time: row.get(5)?,
            created_at: timestamp::column(row, 6)?,
        })
    })?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(row?);
    }
    Ok(appointments)
}
