use async_trait::async_trait;

use crate::domain::{
    Blog, BlogPatch, BlogSearch, BlogSummary, Comment, NewBlog, NewComment, NewUser, Page,
    PageRequest, User,
};
use crate::error::RepoError;

/// Generic repository trait shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Returns whether a row was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Blog repository: listing, search and the engagement counters.
///
/// Every listing orders by creation time, newest first, then by id descending.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, i32> {
    /// Published blogs only.
    async fn list_published(&self, page: PageRequest) -> Result<Page<BlogSummary>, RepoError>;

    /// All blogs regardless of status.
    async fn list_all(&self, page: PageRequest) -> Result<Page<BlogSummary>, RepoError>;

    /// Published blogs matching every filter in `search`.
    async fn search(
        &self,
        search: &BlogSearch,
        page: PageRequest,
    ) -> Result<Page<BlogSummary>, RepoError>;

    async fn create(&self, blog: NewBlog, author_id: i32) -> Result<Blog, RepoError>;

    /// Apply the provided fields and refresh `updated_at`.
    /// Returns `None` when the blog does not exist.
    async fn update(&self, id: i32, patch: BlogPatch) -> Result<Option<Blog>, RepoError>;

    /// Unconditional `views = views + 1`. Returns whether a row matched.
    async fn increment_views(&self, id: i32) -> Result<bool, RepoError>;

    /// Unconditional `likes = likes + 1` plus an audit row in `likes`.
    async fn increment_likes(&self, id: i32) -> Result<bool, RepoError>;

    /// Distinct categories of published blogs, alphabetically.
    async fn list_categories(&self) -> Result<Vec<String>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i32> {
    /// Comments of a blog, newest first.
    async fn list_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>, RepoError>;

    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;
}
