/// Chat command parsing and dispatch.
pub mod command_service;
/// Health check service.
pub mod health_service;
