pub mod appointment;
pub mod message;
