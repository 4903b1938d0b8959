//! Data Transfer Objects - request/response types for the API.
//!
//! Request bodies keep their fields optional so that a missing field is
//! reported with a precise message instead of a generic parse failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use inkwell_core::DomainError;
use inkwell_core::domain::{BlogPatch, BlogSearch, BlogStatus, NewBlog, PageRequest, User};

/// Request to register or log in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// Response to a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// `?page=&limit=` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl From<PageQuery> for PageRequest {
    fn from(q: PageQuery) -> Self {
        PageRequest::new(q.page, q.limit)
    }
}

/// `?query=&category=&tags=a,b&page=&limit=` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl SearchQuery {
    pub fn into_parts(self) -> (BlogSearch, PageRequest) {
        let tags = self
            .tags
            .as_deref()
            .map(BlogSearch::parse_tags)
            .unwrap_or_default();
        (
            BlogSearch::new(self.query, self.category, tags),
            PageRequest::new(self.page, self.limit),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BlogStatus>,
    pub image_url: Option<String>,
}

impl TryFrom<CreateBlogRequest> for NewBlog {
    type Error = DomainError;

    fn try_from(req: CreateBlogRequest) -> Result<Self, Self::Error> {
        Ok(NewBlog::new(
            req.title.unwrap_or_default(),
            req.content.unwrap_or_default(),
            req.excerpt.unwrap_or_default(),
            req.category.unwrap_or_default(),
        )?
        .with_tags(req.tags.unwrap_or_default())
        .with_status(req.status.unwrap_or_default())
        .with_image_url(req.image_url))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BlogStatus>,
    /// Absent leaves the image alone, `null` removes it.
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

impl From<UpdateBlogRequest> for BlogPatch {
    fn from(req: UpdateBlogRequest) -> Self {
        BlogPatch {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            category: req.category,
            tags: req.tags,
            status: req.status,
            image_url: req.image_url,
        }
    }
}

/// Distinguish an explicit `null` from a missing field.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub blog_id: Option<i32>,
    pub content: Option<String>,
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub likes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size: usize,
    pub mimetype: String,
}
