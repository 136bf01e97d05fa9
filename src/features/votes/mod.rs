//! Votes on ideas: one per user, downvotes justified by a linked comment.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod rules;
pub mod services;

pub use services::VoteService;
