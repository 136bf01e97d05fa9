mod user_management_handler;

pub use user_management_handler::*;
