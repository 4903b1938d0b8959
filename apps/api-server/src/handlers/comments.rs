//! Comment handlers.

use actix_web::{HttpResponse, web};

use inkwell_core::services::{CommentSubmission, Poster};
use inkwell_shared::MessageResponse;
use inkwell_shared::dto::CreateCommentRequest;

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn submission(req: CreateCommentRequest, poster: Poster) -> AppResult<CommentSubmission> {
    let CreateCommentRequest {
        blog_id,
        content,
        author_name,
    } = req;

    let missing: Vec<&str> = [("blogId", blog_id.is_none()), ("content", content.is_none())]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

    let (Some(blog_id), Some(content)) = (blog_id, content) else {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    };

    Ok(CommentSubmission {
        blog_id,
        content,
        author_name,
        poster,
    })
}

/// GET /api/comments/blog/{blog_id}
pub async fn list_for_blog(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let comments = state
        .comments
        .list_for_blog(path.into_inner(), viewer.actor().as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/comments - guest comment.
pub async fn create_guest(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .submit(submission(body.into_inner(), Poster::Guest)?)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// POST /api/comments/author - comment by the blog's own author.
pub async fn create_author(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .submit(submission(body.into_inner(), Poster::Author(identity.actor()))?)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state
        .comments
        .delete(path.into_inner(), &identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted successfully")))
}
