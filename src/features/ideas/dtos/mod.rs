mod idea_dto;

pub use idea_dto::*;
