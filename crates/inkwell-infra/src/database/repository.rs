//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use inkwell_core::domain::{
    Blog, BlogPatch, BlogSearch, BlogStatus, BlogSummary, Comment, NewBlog, NewComment, NewUser,
    Page, PageRequest, User,
};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BlogRepository, CommentRepository, UserRepository};

use super::base::{SeaOrmBaseRepository, insert_err, query_err};
use super::entity::blog::{self, Entity as BlogEntity, SummaryRow, encode_tags};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like;
use super::entity::user::{self, Entity as UserEntity};

pub type SeaOrmUserRepository = SeaOrmBaseRepository<UserEntity>;

pub type SeaOrmBlogRepository = SeaOrmBaseRepository<BlogEntity>;

pub type SeaOrmCommentRepository = SeaOrmBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(new_user)
            .insert(&self.db)
            .await
            .map_err(|e| insert_err(e, "Username already exists"))?;

        Ok(model.into())
    }
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contains(needle: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(needle))).escape('\\')
}

/// Case-insensitive substring match on `blogs.<column>`.
///
/// SQLite's `LOWER()` only folds ASCII, so the needle is folded the same way.
/// PostgreSQL folds both sides itself through `ILIKE`.
fn lower_contains(backend: DbBackend, column: blog::Column, needle: &str) -> SimpleExpr {
    let col = Expr::col((BlogEntity, column));
    match backend {
        DbBackend::Postgres => col.ilike(contains(needle)),
        _ => Expr::expr(Func::lower(col)).like(contains(&needle.to_ascii_lowercase())),
    }
}

fn published() -> SimpleExpr {
    blog::Column::Status.eq(BlogStatus::Published.as_str())
}

fn search_condition(search: &BlogSearch, backend: DbBackend) -> Condition {
    let mut cond = Condition::all().add(published());

    if let Some(text) = &search.text {
        cond = cond.add(
            Condition::any()
                .add(lower_contains(backend, blog::Column::Title, text))
                .add(lower_contains(backend, blog::Column::Content, text))
                .add(lower_contains(backend, blog::Column::Excerpt, text)),
        );
    }

    if let Some(category) = &search.category {
        cond = cond.add(blog::Column::Category.eq(category.as_str()));
    }

    // Tags are a JSON array, so `"tag"` with its quotes only matches a whole element.
    for tag in &search.tags {
        let element = serde_json::Value::String(tag.clone()).to_string();
        cond = cond.add(Expr::col((BlogEntity, blog::Column::Tags)).like(contains(&element)));
    }

    cond
}

impl SeaOrmBlogRepository {
    async fn summaries(
        &self,
        cond: Condition,
        page: PageRequest,
    ) -> Result<Page<BlogSummary>, RepoError> {
        let total = BlogEntity::find()
            .filter(cond.clone())
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let rows = BlogEntity::find()
            .select_only()
            .columns([
                blog::Column::Id,
                blog::Column::Title,
                blog::Column::Excerpt,
                blog::Column::Category,
                blog::Column::Tags,
                blog::Column::Status,
                blog::Column::ImageUrl,
                blog::Column::Views,
                blog::Column::Likes,
                blog::Column::CreatedAt,
                blog::Column::UpdatedAt,
            ])
            .column_as(
                Expr::col((CommentEntity, comment::Column::Id)).count(),
                "comment_count",
            )
            .join(JoinType::LeftJoin, blog::Relation::Comment.def())
            .filter(cond)
            .group_by(blog::Column::Id)
            .order_by_desc(blog::Column::CreatedAt)
            .order_by_desc(blog::Column::Id)
            .limit(page.limit())
            .offset(page.offset())
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }
}

#[async_trait]
impl BlogRepository for SeaOrmBlogRepository {
    async fn list_published(&self, page: PageRequest) -> Result<Page<BlogSummary>, RepoError> {
        self.summaries(Condition::all().add(published()), page).await
    }

    async fn list_all(&self, page: PageRequest) -> Result<Page<BlogSummary>, RepoError> {
        self.summaries(Condition::all(), page).await
    }

    async fn search(
        &self,
        search: &BlogSearch,
        page: PageRequest,
    ) -> Result<Page<BlogSummary>, RepoError> {
        tracing::debug!(
            text = ?search.text,
            category = ?search.category,
            tags = ?search.tags,
            "Searching blogs"
        );
        let backend = self.db.get_database_backend();
        self.summaries(search_condition(search, backend), page).await
    }

    async fn create(&self, new_blog: NewBlog, author_id: i32) -> Result<Blog, RepoError> {
        let model = blog::ActiveModel::from_new(new_blog, author_id)
            .insert(&self.db)
            .await
            .map_err(query_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, patch: BlogPatch) -> Result<Option<Blog>, RepoError> {
        let Some(model) = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let mut active: blog::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(excerpt) = patch.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(encode_tags(&tags));
        }
        if let Some(status) = patch.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(image_url);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await.map_err(query_err)?;
        Ok(Some(updated.into()))
    }

    async fn increment_views(&self, id: i32) -> Result<bool, RepoError> {
        let result = BlogEntity::update_many()
            .col_expr(
                blog::Column::Views,
                Expr::col(blog::Column::Views).add(1),
            )
            .filter(blog::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn increment_likes(&self, id: i32) -> Result<bool, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let result = BlogEntity::update_many()
            .col_expr(
                blog::Column::Likes,
                Expr::col(blog::Column::Likes).add(1),
            )
            .filter(blog::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(query_err)?;
            return Ok(false);
        }

        like::ActiveModel {
            blog_id: Set(id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(query_err)?;

        txn.commit().await.map_err(query_err)?;
        Ok(true)
    }

    async fn list_categories(&self) -> Result<Vec<String>, RepoError> {
        BlogEntity::find()
            .select_only()
            .column(blog::Column::Category)
            .distinct()
            .filter(published())
            .order_by_asc(blog::Column::Category)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(query_err)
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn list_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::BlogId.eq(blog_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new_comment)
            .insert(&self.db)
            .await
            .map_err(query_err)?;

        Ok(model.into())
    }
}
