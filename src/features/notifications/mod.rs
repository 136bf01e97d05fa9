//! In-app notifications. Managers hear about new ideas, submitters hear
//! about review decisions.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::NotificationService;
