pub mod command;
pub mod health;
pub mod report;
pub mod validation;
