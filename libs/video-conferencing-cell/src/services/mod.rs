pub mod twilio;

pub use twilio::TwilioAccessTokenIssuer;
