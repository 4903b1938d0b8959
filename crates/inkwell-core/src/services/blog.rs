use std::sync::Arc;

use crate::domain::{Actor, Blog, BlogPatch, BlogSearch, BlogSummary, NewBlog, Page, PageRequest};
use crate::error::DomainError;
use crate::ports::BlogRepository;

/// Blog reads, writes and engagement counters.
#[derive(Clone)]
pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogRepository>) -> Self {
        Self { blogs }
    }

    pub async fn list_published(&self, page: PageRequest) -> Result<Page<BlogSummary>, DomainError> {
        Ok(self.blogs.list_published(page).await?)
    }

    pub async fn list_all(&self, page: PageRequest) -> Result<Page<BlogSummary>, DomainError> {
        Ok(self.blogs.list_all(page).await?)
    }

    pub async fn search(
        &self,
        search: &BlogSearch,
        page: PageRequest,
    ) -> Result<Page<BlogSummary>, DomainError> {
        if search.is_unfiltered() {
            return self.list_published(page).await;
        }
        Ok(self.blogs.search(search, page).await?)
    }

    pub async fn categories(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.blogs.list_categories().await?)
    }

    /// Any blog, drafts included. Used by the author dashboard.
    pub async fn get(&self, id: i32) -> Result<Blog, DomainError> {
        self.blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(id))
    }

    /// A published blog for public readers. Counts one view.
    ///
    /// Drafts are reported as missing so their existence does not leak.
    pub async fn read_public(&self, id: i32) -> Result<Blog, DomainError> {
        self.published(id).await?;
        self.blogs.increment_views(id).await?;
        self.get(id).await
    }

    /// Count one like on a published blog and return the new total.
    pub async fn like(&self, id: i32) -> Result<i64, DomainError> {
        self.published(id).await?;
        self.blogs.increment_likes(id).await?;
        let blog = self.get(id).await?;
        tracing::debug!(blog_id = id, likes = blog.likes, "Blog liked");
        Ok(blog.likes)
    }

    pub async fn create(&self, blog: NewBlog, author: &Actor) -> Result<Blog, DomainError> {
        let created = self.blogs.create(blog, author.user_id).await?;
        tracing::info!(
            blog_id = created.id,
            author_id = author.user_id,
            status = %created.status,
            "Blog created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i32,
        patch: BlogPatch,
        author: &Actor,
    ) -> Result<Blog, DomainError> {
        let existing = self.owned(id, author, "Unauthorized to update this blog").await?;
        let patch = patch.validate()?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let updated = self
            .blogs
            .update(id, patch)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(id))?;

        tracing::info!(blog_id = id, status = %updated.status, "Blog updated");
        Ok(updated)
    }

    /// Delete a blog and, through the foreign key, its comments.
    pub async fn delete(&self, id: i32, author: &Actor) -> Result<(), DomainError> {
        self.owned(id, author, "Unauthorized to delete this blog")
            .await?;

        if !self.blogs.delete(id).await? {
            return Err(DomainError::blog_not_found(id));
        }

        tracing::info!(blog_id = id, "Blog deleted");
        Ok(())
    }

    async fn published(&self, id: i32) -> Result<Blog, DomainError> {
        match self.blogs.find_by_id(id).await? {
            Some(blog) if blog.is_published() => Ok(blog),
            _ => Err(DomainError::blog_not_found(id)),
        }
    }

    async fn owned(&self, id: i32, author: &Actor, denial: &str) -> Result<Blog, DomainError> {
        let blog = self.get(id).await?;
        if !blog.is_owned_by(author.user_id) {
            return Err(DomainError::Forbidden(denial.to_string()));
        }
        Ok(blog)
    }
}
