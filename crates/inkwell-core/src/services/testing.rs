//! In-memory port implementations for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Blog, BlogPatch, BlogSearch, BlogStatus, BlogSummary, Comment, NewBlog, NewComment, Page,
    PageRequest,
};
use crate::error::RepoError;
use crate::ports::{
    BaseRepository, BlogRepository, CommentRepository, PublishError, RealtimeEvent,
    RealtimePublisher,
};

#[derive(Default)]
struct State {
    blogs: Vec<Blog>,
    comments: Vec<Comment>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn insert_blog(&self, author_id: i32, status: BlogStatus) -> i32 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        state.blogs.push(Blog {
            id,
            title: format!("Blog {id}"),
            content: "<p>content</p>".into(),
            excerpt: "excerpt".into(),
            category: "Tech".into(),
            tags: vec![],
            status,
            author_id,
            image_url: None,
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn blog(&self, id: i32) -> Option<Blog> {
        let state = self.state.lock().unwrap();
        state.blogs.iter().find(|b| b.id == id).cloned()
    }

    pub fn comments_for(&self, blog_id: i32) -> Vec<Comment> {
        let state = self.state.lock().unwrap();
        state
            .comments
            .iter()
            .filter(|c| c.blog_id == blog_id)
            .cloned()
            .collect()
    }

    fn summaries(&self, filter: impl Fn(&Blog) -> bool, page: PageRequest) -> Page<BlogSummary> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<&Blog> = state.blogs.iter().filter(|b| filter(b)).collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        let total = matching.len() as u64;
        let data = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|b| BlogSummary {
                id: b.id,
                title: b.title.clone(),
                excerpt: b.excerpt.clone(),
                category: b.category.clone(),
                tags: b.tags.clone(),
                status: b.status,
                image_url: b.image_url.clone(),
                views: b.views,
                likes: b.likes,
                comment_count: state.comments.iter().filter(|c| c.blog_id == b.id).count()
                    as i64,
                created_at: b.created_at,
                updated_at: b.updated_at,
            })
            .collect();
        Page::new(data, page, total)
    }

    fn bump(&self, id: i32, f: impl Fn(&mut Blog)) -> bool {
        let mut state = self.state.lock().unwrap();
        match state.blogs.iter_mut().find(|b| b.id == id) {
            Some(blog) => {
                f(blog);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl BaseRepository<Blog, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Blog>, RepoError> {
        Ok(self.blog(id))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.blogs.len();
        state.blogs.retain(|b| b.id != id);
        state.comments.retain(|c| c.blog_id != id);
        Ok(state.blogs.len() != before)
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list_published(&self, page: PageRequest) -> Result<Page<BlogSummary>, RepoError> {
        Ok(self.summaries(Blog::is_published, page))
    }

    async fn list_all(&self, page: PageRequest) -> Result<Page<BlogSummary>, RepoError> {
        Ok(self.summaries(|_| true, page))
    }

    async fn search(
        &self,
        search: &BlogSearch,
        page: PageRequest,
    ) -> Result<Page<BlogSummary>, RepoError> {
        let search = search.clone();
        Ok(self.summaries(
            move |b| {
                let text = search.text.as_ref().is_none_or(|t| {
                    let t = t.to_lowercase();
                    [&b.title, &b.content, &b.excerpt]
                        .iter()
                        .any(|f| f.to_lowercase().contains(&t))
                });
                let category = search.category.as_ref().is_none_or(|c| &b.category == c);
                let tags = search.tags.iter().all(|t| b.tags.contains(t));
                b.is_published() && text && category && tags
            },
            page,
        ))
    }

    async fn create(&self, blog: NewBlog, author_id: i32) -> Result<Blog, RepoError> {
        let id = self.insert_blog(author_id, blog.status);
        self.bump(id, |b| {
            b.title = blog.title.clone();
            b.content = blog.content.clone();
            b.excerpt = blog.excerpt.clone();
            b.category = blog.category.clone();
            b.tags = blog.tags.clone();
            b.image_url = blog.image_url.clone();
        });
        Ok(self.blog(id).ok_or(RepoError::NotFound)?)
    }

    async fn update(&self, id: i32, patch: BlogPatch) -> Result<Option<Blog>, RepoError> {
        self.bump(id, |b| {
            if let Some(title) = &patch.title {
                b.title = title.clone();
            }
            if let Some(status) = patch.status {
                b.status = status;
            }
            if let Some(tags) = &patch.tags {
                b.tags = tags.clone();
            }
            b.updated_at = Utc::now();
        });
        Ok(self.blog(id))
    }

    async fn increment_views(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.bump(id, |b| b.views += 1))
    }

    async fn increment_likes(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.bump(id, |b| b.likes += 1))
    }

    async fn list_categories(&self) -> Result<Vec<String>, RepoError> {
        let state = self.state.lock().unwrap();
        let mut categories: Vec<String> = state
            .blogs
            .iter()
            .filter(|b| b.is_published())
            .map(|b| b.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

#[async_trait]
impl BaseRepository<Comment, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        Ok(state.comments.len() != before)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>, RepoError> {
        let mut comments = self.comments_for(blog_id);
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(comments)
    }

    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let comment = Comment {
            id,
            blog_id: comment.blog_id,
            content: comment.content,
            author_name: comment.author_name,
            is_author: comment.is_author,
            created_at: Utc::now(),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }
}

/// Publisher that remembers every event, or fails every publish.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<RealtimeEvent>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<RealtimeEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl RealtimePublisher for RecordingPublisher {
    async fn publish(&self, event: RealtimeEvent) -> Result<usize, PublishError> {
        if self.fail {
            return Err(PublishError::Publish("no transport".into()));
        }
        self.events.lock().unwrap().push(event);
        Ok(1)
    }
}
