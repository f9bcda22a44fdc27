use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use shared_database::{Database, DatabaseError};
use shared_utils::AppState;

use crate::models::{Doctor, SeedDoctor};

/// Doctors inserted into an empty store on first start.
pub const SEED_DOCTORS: [SeedDoctor; 12] = [
    SeedDoctor { city: "Nagpur", name: "Dr. Anjali Deshmukh", specialty: "General Physician", experience_years: 10 },
    SeedDoctor { city: "Nagpur", name: "Dr. Rajesh Patil", specialty: "Cardiologist", experience_years: 12 },
    SeedDoctor { city: "Nagpur", name: "Dr. Kiran Agrawal", specialty: "Orthopedic Surgeon", experience_years: 15 },
    SeedDoctor { city: "Nagpur", name: "Dr. Meera Joshi", specialty: "ENT Specialist", experience_years: 7 },
    SeedDoctor { city: "Yavatmal", name: "Dr. Sneha Kulkarni", specialty: "Pediatrician", experience_years: 8 },
    SeedDoctor { city: "Yavatmal", name: "Dr. Amit Joshi", specialty: "Dermatologist", experience_years: 6 },
    SeedDoctor { city: "Yavatmal", name: "Dr. Nikhil More", specialty: "Neurologist", experience_years: 11 },
    SeedDoctor { city: "Yavatmal", name: "Dr. Kavita Rathi", specialty: "Gynecologist", experience_years: 9 },
    SeedDoctor { city: "Akola", name: "Dr. Priya Shinde", specialty: "Gynecologist", experience_years: 9 },
    SeedDoctor { city: "Akola", name: "Dr. Suresh Bhoyar", specialty: "General Surgeon", experience_years: 14 },
    SeedDoctor { city: "Akola", name: "Dr. Ramesh Kale", specialty: "Psychiatrist", experience_years: 10 },
    SeedDoctor { city: "Akola", name: "Dr. Manisha Wagh", specialty: "Ophthalmologist", experience_years: 8 },
];

pub struct DoctorService {
    db: Database,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self::with_database(state.db.clone())
    }

    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Doctors ordered by city then name, optionally restricted to one city.
    pub async fn list_doctors(&self, city: Option<&str>) -> Result<Vec<Doctor>, DatabaseError> {
        debug!("Listing doctors (city: {:?})", city);
        let city = city.map(str::to_string);
        self.db
            .call(move |conn| query_doctors(conn, city.as_deref()))
            .await
    }

    /// Insert [`SEED_DOCTORS`] when the store has no doctors yet. Returns how many rows were added.
    pub async fn seed_doctors(&self) -> Result<usize, DatabaseError> {
        let inserted = self.db.call(|conn| insert_seed_roster(conn, &SEED_DOCTORS)).await?;
        if inserted > 0 {
            info!("Seeded {} doctors", inserted);
        } else {
            debug!("Doctors already present, skipping seed");
        }
        Ok(inserted)
    }
}

pub fn query_doctors(conn: &Connection, city: Option<&str>) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, specialty, city, experience_years
         FROM doctors
         WHERE ?1 IS NULL OR city = ?1
         ORDER BY city, name",
    )?;

    let rows = stmt.query_map(params![city], |row| {
        Ok(Doctor {
            id: row.get(0)?,
            name: row.get(1)?,
            specialty: row.get(2)?,
            city: row.get(3)?,
            experience_years: row.get(4)?,
        })
    })?;

    let mut doctors = Vec::new();
    for row in rows {
        doctors.push(row?);
    }
    Ok(doctors)
}

/// Seeds inside one transaction so a crash never leaves a partial roster.
pub fn insert_seed_roster(conn: &mut Connection, roster: &[SeedDoctor]) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;

    let existing: Option<i64> = tx
        .query_row("SELECT id FROM doctors LIMIT 1", [], |row| row.get(0))
        .optional()?;
    if existing.is_some() {
        return Ok(0);
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO doctors (name, specialty, city, experience_years)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for doctor in roster {
            stmt.execute(params![
                doctor.name,
                doctor.specialty,
                doctor.city,
                doctor.experience_years,
            ])?;
        }
    }

    tx.commit()?;
    Ok(roster.len())
}
