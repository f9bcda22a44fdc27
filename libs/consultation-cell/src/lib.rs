//! # Consultation Cell
//!
//! Intake for patient-submitted consultation requests.
//!
//! A submission is checked field by field before anything is written. Its
//! [`ConsultationMode`] then decides whether a private call room is needed:
//! video and audio consultations get a freshly minted room name, in-person
//! ones get none. The room name is stored with the consultation and is the
//! only handle either participant uses to join the call.
//!
//! ## API Endpoints
//!
//! - `POST /api/consultations` - Submit a consultation
//! - `GET /api/consultations` - List consultations, newest first
//! - `GET /admin/consultations` - HTML table dump

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Consultation, ConsultationMode, NewConsultation};
pub use router::consultation_routes;
pub use services::{room, ConsultationIntakeService};
