//! Domain services - authorization and visibility rules on top of the ports.

mod blog;
mod comment;

#[cfg(test)]
pub(crate) mod testing;

pub use blog::BlogService;
pub use comment::{CommentService, CommentSubmission, Poster};
