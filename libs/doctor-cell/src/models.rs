use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub experience_years: i64,
}

/// A doctor row before the store assigns an id.
#[derive(Debug, Clone, Copy)]
pub struct SeedDoctor {
    pub city: &'static str,
    pub name: &'static str,
    pub specialty: &'static str,
    pub experience_years: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorListQuery {
    pub city: Option<String>,
}

impl DoctorListQuery {
    /// `?city=` with an empty value means no filter.
    pub fn city_filter(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }
}
