//! Domain entities - the core business objects.

mod blog;
mod comment;
mod pagination;
mod user;

pub use blog::{Blog, BlogPatch, BlogSearch, BlogStatus, BlogSummary, NewBlog};
pub use comment::{
    Comment, MAX_AUTHOR_NAME_LENGTH, MAX_COMMENT_LENGTH, NewComment, sanitize_comment,
    strip_markup, validate_author_name,
};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, Pagination};
pub use user::{Actor, NewUser, User};
