//! Ideas: submission by employees, browsing, and the status lifecycle
//! managers drive through the review feature.

pub mod dtos;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod routes;
pub mod services;

pub use services::IdeaService;
