mod vote;

pub use vote::{Vote, VoteRow, VoteType};
