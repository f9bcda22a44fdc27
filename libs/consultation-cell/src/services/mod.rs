pub mod intake;
pub mod room;

pub use intake::ConsultationIntakeService;
