pub mod services_service;
pub mod clients_service;
