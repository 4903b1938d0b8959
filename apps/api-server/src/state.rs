//! Application state - shared across all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DbConn;

use inkwell_core::ports::{PasswordService, TokenService, UserRepository};
use inkwell_core::services::{BlogService, CommentService};
use inkwell_infra::{
    RoomHub, SeaOrmBlogRepository, SeaOrmCommentRepository, SeaOrmUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: BlogService,
    pub comments: CommentService,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Wire the services over one database connection pool.
    pub fn new(
        db: DbConn,
        hub: RoomHub,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        upload_dir: PathBuf,
    ) -> Self {
        let blog_repo = Arc::new(SeaOrmBlogRepository::new(db.clone()));
        let comment_repo = Arc::new(SeaOrmCommentRepository::new(db.clone()));
        let users = Arc::new(SeaOrmUserRepository::new(db));

        let comments = CommentService::new(blog_repo.clone(), comment_repo, Arc::new(hub));

        tracing::info!(upload_dir = %upload_dir.display(), "Application state initialized");

        Self {
            blogs: BlogService::new(blog_repo),
            comments,
            users,
            tokens,
            passwords,
            upload_dir,
        }
    }
}
