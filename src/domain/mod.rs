pub mod association;
pub mod auth;
pub mod health;
pub mod student;
pub mod team;
pub mod user;
