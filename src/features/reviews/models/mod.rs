mod review;

pub use review::{Review, ReviewDecision, ReviewRow};
