//! Database connection management and SeaORM repositories.

mod base;
mod connections;
pub mod entity;
mod repository;

pub use base::SeaOrmBaseRepository;
pub use connections::{DatabaseConfig, connect};
pub use repository::{SeaOrmBlogRepository, SeaOrmCommentRepository, SeaOrmUserRepository};
