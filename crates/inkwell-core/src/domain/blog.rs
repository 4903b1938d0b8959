use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Visibility state of a blog. Drafts are only visible to their author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

impl BlogStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlogStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(BlogStatus::Draft),
            "published" => Ok(BlogStatus::Published),
            other => Err(DomainError::validation(format!(
                "Unknown blog status '{other}'"
            ))),
        }
    }
}

/// Blog entity - a post with rich-text content and engagement counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub author_id: i32,
    pub image_url: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn is_published(&self) -> bool {
        self.status == BlogStatus::Published
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.author_id == user_id
    }

    /// Published blogs are visible to everyone, drafts only to their author.
    pub fn is_visible_to(&self, viewer: Option<i32>) -> bool {
        self.is_published() || viewer.is_some_and(|id| self.is_owned_by(id))
    }
}

/// Listing projection of a blog, annotated with its comment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub id: i32,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub image_url: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a blog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub image_url: Option<String>,
}

impl NewBlog {
    /// Build a new blog, rejecting blank required fields.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        excerpt: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let blog = Self {
            title: title.into(),
            content: content.into(),
            excerpt: excerpt.into(),
            category: category.into(),
            tags: Vec::new(),
            status: BlogStatus::Draft,
            image_url: None,
        };

        let missing: Vec<&str> = [
            ("title", &blog.title),
            ("content", &blog.content),
            ("excerpt", &blog.excerpt),
            ("category", &blog.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(blog)
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = normalize_tags(tags);
        self
    }

    pub fn with_status(mut self, status: BlogStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url.filter(|url| !url.trim().is_empty());
        self
    }
}

/// Partial update of a blog. `None` leaves the field untouched.
///
/// `image_url` is doubly optional: `Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BlogStatus>,
    pub image_url: Option<Option<String>>,
}

impl BlogPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.status.is_none()
            && self.image_url.is_none()
    }

    /// Reject patches that would blank out a required field.
    pub fn validate(self) -> Result<Self, DomainError> {
        let blanked = [
            ("title", &self.title),
            ("content", &self.content),
            ("excerpt", &self.excerpt),
            ("category", &self.category),
        ]
        .into_iter()
        .find(|(_, value)| value.as_ref().is_some_and(|v| v.trim().is_empty()));

        if let Some((name, _)) = blanked {
            return Err(DomainError::validation(format!("{name} cannot be empty")));
        }

        Ok(Self {
            tags: self.tags.map(normalize_tags),
            ..self
        })
    }
}

/// Conjunctive search filters over published blogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogSearch {
    pub text: Option<String>,
    pub category: Option<String>,
    /// Every listed tag must be present on a matching blog.
    pub tags: Vec<String>,
}

impl BlogSearch {
    pub fn new(text: Option<String>, category: Option<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            category: category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            tags: normalize_tags(tags),
        }
    }

    /// Parse a comma separated tag list such as `rust,web`.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        normalize_tags(raw.split(',').map(str::to_string).collect())
    }

    pub fn is_unfiltered(&self) -> bool {
        self.text.is_none() && self.category.is_none() && self.tags.is_empty()
    }
}

/// Trim, drop blanks and drop duplicates while keeping the first occurrence.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
