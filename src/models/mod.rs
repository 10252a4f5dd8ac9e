pub mod config_models;
pub mod error_models;
pub mod execution_models;
pub mod language_models;
pub mod validation_models;
