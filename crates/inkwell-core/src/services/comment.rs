use std::sync::Arc;

use crate::domain::{Actor, Comment, NewComment, sanitize_comment, validate_author_name};
use crate::error::DomainError;
use crate::ports::{BlogRepository, CommentRepository, RealtimeEvent, RealtimePublisher};

/// Who is submitting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster {
    /// Anyone, identified only by the name they type in.
    Guest,
    /// The authenticated author of the target blog.
    Author(Actor),
}

/// Raw comment input as received at the boundary.
#[derive(Debug, Clone)]
pub struct CommentSubmission {
    pub blog_id: i32,
    pub content: String,
    pub author_name: Option<String>,
    pub poster: Poster,
}

/// Validates, stores and fans out comments.
#[derive(Clone)]
pub struct CommentService {
    blogs: Arc<dyn BlogRepository>,
    comments: Arc<dyn CommentRepository>,
    publisher: Arc<dyn RealtimePublisher>,
}

impl CommentService {
    pub fn new(
        blogs: Arc<dyn BlogRepository>,
        comments: Arc<dyn CommentRepository>,
        publisher: Arc<dyn RealtimePublisher>,
    ) -> Self {
        Self {
            blogs,
            comments,
            publisher,
        }
    }

    /// Persist a comment and publish it to the blog's room.
    ///
    /// Every check runs before the insert, so a rejected submission stores nothing.
    pub async fn submit(&self, submission: CommentSubmission) -> Result<Comment, DomainError> {
        let CommentSubmission {
            blog_id,
            content,
            author_name,
            poster,
        } = submission;

        let viewer = match &poster {
            Poster::Guest => None,
            Poster::Author(actor) => Some(actor.user_id),
        };

        let blog = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .filter(|blog| blog.is_visible_to(viewer))
            .ok_or_else(|| DomainError::blog_not_found(blog_id))?;

        let content = sanitize_comment(&content)?;

        let (author_name, is_author) = match &poster {
            Poster::Guest => {
                let name = author_name
                    .ok_or_else(|| DomainError::validation("Missing required fields: authorName"))?;
                (validate_author_name(&name)?, false)
            }
            Poster::Author(actor) => {
                if !blog.is_owned_by(actor.user_id) {
                    return Err(DomainError::Forbidden("Unauthorized".to_string()));
                }
                let name = author_name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| actor.username.clone());
                (validate_author_name(&name)?, true)
            }
        };

        let comment = self
            .comments
            .create(NewComment {
                blog_id,
                content,
                author_name,
                is_author,
            })
            .await?;

        tracing::info!(
            comment_id = comment.id,
            blog_id,
            is_author,
            "Comment created"
        );

        match self
            .publisher
            .publish(RealtimeEvent::NewComment(comment.clone()))
            .await
        {
            Ok(delivered) => {
                tracing::debug!(comment_id = comment.id, delivered, "Comment broadcast")
            }
            Err(e) => {
                tracing::warn!(comment_id = comment.id, error = %e, "Comment broadcast failed")
            }
        }

        Ok(comment)
    }

    /// Comments of a blog, newest first. Drafts only show comments to their author.
    pub async fn list_for_blog(
        &self,
        blog_id: i32,
        viewer: Option<&Actor>,
    ) -> Result<Vec<Comment>, DomainError> {
        let visible = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .is_some_and(|blog| blog.is_visible_to(viewer.map(|a| a.user_id)));

        if !visible {
            return Err(DomainError::blog_not_found(blog_id));
        }

        Ok(self.comments.list_for_blog(blog_id).await?)
    }

    /// Delete a comment. Only the author of the parent blog may do so.
    pub async fn delete(&self, comment_id: i32, actor: &Actor) -> Result<(), DomainError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::comment_not_found(comment_id))?;

        let owns_blog = self
            .blogs
            .find_by_id(comment.blog_id)
            .await?
            .is_some_and(|blog| blog.is_owned_by(actor.user_id));

        if !owns_blog {
            return Err(DomainError::Forbidden(
                "Unauthorized to delete this comment".to_string(),
            ));
        }

        if !self.comments.delete(comment_id).await? {
            return Err(DomainError::comment_not_found(comment_id));
        }

        tracing::info!(comment_id, blog_id = comment.blog_id, "Comment deleted");
        Ok(())
    }
}
