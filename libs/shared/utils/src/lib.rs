pub mod extractor;
pub mod fields;
pub mod html;
pub mod jwt;
pub mod state;
pub mod test_utils;

pub use state::AppState;
