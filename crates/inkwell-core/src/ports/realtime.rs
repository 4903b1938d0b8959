//! Realtime port - push newly created comments to connected viewers.

use async_trait::async_trait;

use crate::domain::Comment;

/// Room name for the viewers of one blog.
pub fn blog_room(blog_id: i32) -> String {
    format!("blog-{blog_id}")
}

/// Events delivered to room members.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    NewComment(Comment),
}

impl RealtimeEvent {
    /// Event name as seen by socket clients.
    pub const fn name(&self) -> &'static str {
        match self {
            RealtimeEvent::NewComment(_) => "new-comment",
        }
    }

    /// The room this event is addressed to.
    pub fn room(&self) -> String {
        match self {
            RealtimeEvent::NewComment(comment) => blog_room(comment.blog_id),
        }
    }

    pub fn payload(&self) -> Result<serde_json::Value, PublishError> {
        match self {
            RealtimeEvent::NewComment(comment) => {
                serde_json::to_value(comment).map_err(|e| PublishError::Encode(e.to_string()))
            }
        }
    }
}

/// Publisher capability handed to the comment pipeline.
#[async_trait]
pub trait RealtimePublisher: Send + Sync {
    /// Deliver an event to its room. Returns how many connections received it.
    async fn publish(&self, event: RealtimeEvent) -> Result<usize, PublishError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to publish: {0}")]
    Publish(String),

    #[error("Failed to encode event: {0}")]
    Encode(String),
}
