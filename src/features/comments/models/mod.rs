mod comment;

pub use comment::CommentRow;
