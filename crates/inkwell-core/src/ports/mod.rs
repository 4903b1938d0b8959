//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod realtime;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use realtime::{PublishError, RealtimeEvent, RealtimePublisher, blog_room};
pub use repository::{BaseRepository, BlogRepository, CommentRepository, UserRepository};
