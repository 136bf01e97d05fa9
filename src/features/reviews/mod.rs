//! Manager reviews of ideas, and the manager's controls over idea status.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;

pub use services::ReviewService;
