pub mod health;
pub mod home;
pub mod not_found;
