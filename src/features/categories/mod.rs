//! Idea categories: a public list of active categories plus admin CRUD.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
