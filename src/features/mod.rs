pub mod auth;
pub mod categories;
pub mod comments;
pub mod ideas;
pub mod notifications;
pub mod reviews;
pub mod users;
pub mod votes;
