//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`:
//! SeaORM repositories, JWT/Argon2 authentication and the in-process
//! realtime room hub.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - JWT + Argon2 authentication

pub mod database;
pub mod realtime;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{
    DatabaseConfig, SeaOrmBlogRepository, SeaOrmCommentRepository, SeaOrmUserRepository, connect,
};
pub use realtime::{ConnectionId, RoomHub};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
