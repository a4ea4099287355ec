pub mod auth;
pub mod careers;
pub mod enrollments;
pub mod fallback;
pub mod health;
pub mod news;
pub mod payments;
pub mod student;
pub mod users;
