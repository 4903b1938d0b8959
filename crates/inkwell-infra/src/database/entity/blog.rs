//! Blog entity for SeaORM.
//!
//! Tags live in a single text column holding a JSON array.

use sea_orm::{FromQueryResult, Set};
use sea_orm::entity::prelude::*;

use inkwell_core::domain::{Blog, BlogStatus, BlogSummary, NewBlog};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub status: String,
    pub author_id: i32,
    pub image_url: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A blog row joined with its comment count, as produced by listing queries.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SummaryRow {
    pub id: i32,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: String,
    pub status: String,
    pub image_url: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub comment_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Encode tags as the JSON array stored in the `tags` column.
pub fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Decode the `tags` column. Malformed values read as no tags.
pub fn decode_tags(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Parse the `status` column. Unknown values read as draft so they never go public.
pub fn decode_status(raw: &str) -> BlogStatus {
    raw.parse().unwrap_or_default()
}

impl From<Model> for Blog {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            category: model.category,
            tags: decode_tags(&model.tags),
            status: decode_status(&model.status),
            author_id: model.author_id,
            image_url: model.image_url,
            views: model.views,
            likes: model.likes,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<SummaryRow> for BlogSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            excerpt: row.excerpt,
            category: row.category,
            tags: decode_tags(&row.tags),
            status: decode_status(&row.status),
            image_url: row.image_url,
            views: row.views,
            likes: row.likes,
            comment_count: row.comment_count,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Insert model for a new blog owned by `author_id`.
    pub fn from_new(blog: NewBlog, author_id: i32) -> Self {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        Self {
            title: Set(blog.title),
            content: Set(blog.content),
            excerpt: Set(blog.excerpt),
            category: Set(blog.category),
            tags: Set(encode_tags(&blog.tags)),
            status: Set(blog.status.as_str().to_string()),
            author_id: Set(author_id),
            image_url: Set(blog.image_url),
            views: Set(0),
            likes: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}
