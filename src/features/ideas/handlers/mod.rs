mod idea_handler;

pub use idea_handler::*;
