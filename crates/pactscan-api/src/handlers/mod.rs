pub mod analyze;
pub mod contracts;
pub mod current_user;
pub mod detect_type;
pub mod health;
