//! SeaORM entities.

pub mod blog;
pub mod comment;
pub mod like;
pub mod user;
