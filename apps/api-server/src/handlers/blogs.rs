//! Blog handlers.

use actix_web::{HttpResponse, web};

use inkwell_core::domain::{BlogPatch, NewBlog};
use inkwell_shared::MessageResponse;
use inkwell_shared::dto::{
    CreateBlogRequest, LikeResponse, PageQuery, SearchQuery, UpdateBlogRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/blogs/public
pub async fn list_public(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.blogs.list_published(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/blogs/public/{id} - counts one view.
pub async fn get_public(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let blog = state.blogs.read_public(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(blog))
}

/// GET /api/blogs/search
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let (search, page) = query.into_inner().into_parts();
    let result = state.blogs.search(&search, page).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/blogs/categories
pub async fn categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.blogs.categories().await?))
}

/// POST /api/blogs/{id}/like
pub async fn like(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let likes = state.blogs.like(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LikeResponse { likes }))
}

/// GET /api/blogs/admin - every blog, drafts included.
pub async fn list_admin(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.blogs.list_all(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/blogs/admin/{id}
pub async fn get_admin(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let blog = state.blogs.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(blog))
}

/// POST /api/blogs
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let new_blog = NewBlog::try_from(body.into_inner())?;
    let blog = state.blogs.create(new_blog, &identity.actor()).await?;
    Ok(HttpResponse::Created().json(blog))
}

/// PUT /api/blogs/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let patch = BlogPatch::from(body.into_inner());
    let blog = state
        .blogs
        .update(path.into_inner(), patch, &identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(blog))
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state
        .blogs
        .delete(path.into_inner(), &identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Blog deleted successfully")))
}
