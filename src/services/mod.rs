pub mod execution_services;
pub mod helper_services;
pub mod http_services;
pub mod validation_services;
