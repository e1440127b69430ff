pub mod handlers;
pub mod progress;
pub mod vitals;
pub mod week_info;
