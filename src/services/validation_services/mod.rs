pub mod language_validation;
pub mod request_validation;
