mod idea;

pub use idea::{Idea, IdeaRow, IdeaStatus};
