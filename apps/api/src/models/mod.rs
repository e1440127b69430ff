pub mod alert;
pub mod appointment;
pub mod content;
pub mod message;
pub mod pregnancy;
pub mod user;
