mod idea_service;

pub use idea_service::IdeaService;
