//! Image upload and retrieval.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::StreamExt;
use mime_guess::mime;

use inkwell_shared::dto::UploadResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "image";

fn multipart_err(e: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Failed to read upload: {e}"))
}

fn image_mime(field: &Field) -> AppResult<mime::Mime> {
    field
        .content_type()
        .filter(|m| m.type_() == mime::IMAGE)
        .cloned()
        .ok_or_else(|| AppError::BadRequest("Only image files are allowed".to_string()))
}

async fn read_limited(field: &mut Field) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(multipart_err)?;
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest("File too large (max 10MB)".to_string()));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn extension_for(mime: &mime::Mime) -> &'static str {
    match mime.subtype().as_str() {
        "jpeg" => "jpg",
        "svg" => "svg",
        _ => mime_guess::get_mime_extensions(mime)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("img"),
    }
}

/// Stored names are generated, so anything path-like is rejected outright.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// POST /api/upload - multipart form with the file in the `image` field.
pub async fn upload_image(
    state: web::Data<AppState>,
    identity: Identity,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut upload = None;
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(multipart_err)?;
        if field.name() != Some(UPLOAD_FIELD) {
            while field.next().await.is_some() {}
            continue;
        }
        let mime = image_mime(&field)?;
        upload = Some((mime, read_limited(&mut field).await?));
        break;
    }

    let Some((mime, bytes)) = upload.filter(|(_, bytes)| !bytes.is_empty()) else {
        return Err(AppError::BadRequest("No file uploaded".to_string()));
    };

    let filename = format!(
        "image-{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension_for(&mime)
    );

    tokio::fs::create_dir_all(&state.upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(state.upload_dir.join(&filename), &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

    tracing::info!(
        user_id = identity.user_id,
        filename = %filename,
        size = bytes.len(),
        "Image uploaded"
    );

    Ok(HttpResponse::Ok().json(UploadResponse {
        url: format!("/uploads/{filename}"),
        filename,
        size: bytes.len(),
        mimetype: mime.essence_str().to_string(),
    }))
}

/// GET /uploads/{filename}
pub async fn serve_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    let not_found = || AppError::NotFound("File not found".to_string());

    if !is_safe_filename(&filename) {
        return Err(not_found());
    }

    let bytes = match tokio::fs::read(state.upload_dir.join(&filename)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(AppError::Internal(format!("Failed to read upload: {e}"))),
    };

    let content_type = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok(HttpResponse::Ok()
        .content_type(content_type.essence_str())
        .body(bytes))
}
