use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use migration::{Migrator, MigratorTrait};
use sea_orm::DbConn;
use serde_json::{Value, json};

use api_server::configure_app;
use api_server::observability::RequestIdMiddleware;
use api_server::state::AppState;
use inkwell_core::ports::{CommentRepository, RealtimeEvent, blog_room};
use inkwell_infra::{
    Argon2PasswordService, DatabaseConfig, JwtConfig, JwtTokenService, RoomHub,
    SeaOrmCommentRepository, connect,
};

struct TestContext {
    state: AppState,
    db: DbConn,
    hub: RoomHub,
    upload_dir: PathBuf,
}

async fn context() -> TestContext {
    let db = connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    Migrator::up(&db, None).await.unwrap();

    let hub = RoomHub::default();
    let upload_dir = std::env::temp_dir().join(format!("inkwell-test-{}", uuid::Uuid::new_v4()));
    let tokens = JwtTokenService::new(JwtConfig {
        secret: "test-secret".to_string(),
        ..JwtConfig::default()
    });

    let state = AppState::new(
        db.clone(),
        hub.clone(),
        Arc::new(tokens),
        Arc::new(Argon2PasswordService::new()),
        upload_dir.clone(),
    );

    TestContext {
        state,
        db,
        hub,
        upload_dir,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(api_server::cors())
                .wrap(RequestIdMiddleware)
                .configure(configure_app($ctx.state.clone())),
        )
        .await
    };
}

/// Send a request and decode the JSON body (`Value::Null` when not JSON).
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }};
}

macro_rules! register {
    ($app:expr, $username:expr) => {{
        let (status, body) = send!(
            $app,
            post("/api/auth/register").set_json(json!({ "username": $username, "password": "secret1" }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }};
}

macro_rules! create_blog {
    ($app:expr, $token:expr, $body:expr) => {{
        let (status, body) = send!($app, authed(post("/api/blogs"), &$token).set_json($body));
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }};
}

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri)
}

fn post(uri: &str) -> test::TestRequest {
    test::TestRequest::post().uri(uri)
}

fn put(uri: &str) -> test::TestRequest {
    test::TestRequest::put().uri(uri)
}

fn delete(uri: &str) -> test::TestRequest {
    test::TestRequest::delete().uri(uri)
}

fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Single-field multipart body. Returns the Content-Type header and the body.
fn multipart(field: &str, content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "inkwell-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

fn blog(title: &str, status: &str, tags: &[&str]) -> Value {
    json!({
        "title": title,
        "content": "<p>c</p>",
        "excerpt": "e",
        "category": "Tech",
        "tags": tags,
        "status": status,
    })
}

#[actix_web::test]
async fn test_end_to_end_publish_flow() {
    let ctx = context().await;
    let app = init_app!(ctx);

    register!(app, "admin");

    let (status, body) = send!(
        app,
        post("/api/auth/login").set_json(json!({ "username": "admin", "password": "secret1" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "admin");
    let token = body["token"].as_str().unwrap().to_string();

    let id = create_blog!(
        app,
        token,
        json!({
            "title": "T",
            "content": "<p>c</p>",
            "excerpt": "e",
            "category": "Tech",
            "tags": ["x"],
            "status": "draft"
        })
    );

    let (status, body) = send!(app, get(&format!("/api/blogs/public/{id}")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Blog not found" }));

    let (status, body) = send!(
        app,
        authed(put(&format!("/api/blogs/{id}")), &token).set_json(json!({ "status": "published" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "published");
    assert_eq!(body["tags"], json!(["x"]));

    let (status, body) = send!(app, get(&format!("/api/blogs/public/{id}")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "T");
    assert_eq!(body["views"], 1);
}

#[actix_web::test]
async fn test_drafts_never_reach_public_listing() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");

    create_blog!(app, token, blog("Public", "published", &[]));
    create_blog!(app, token, blog("Secret", "draft", &[]));

    let (status, body) = send!(app, get("/api/blogs/public"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "Public");
    assert_eq!(body["data"][0]["commentCount"], 0);

    let (status, _) = send!(app, get("/api/blogs/admin"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send!(app, authed(get("/api/blogs/admin"), &token));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 2);
}

#[actix_web::test]
async fn test_pages_cover_the_full_set() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");

    let mut created = Vec::new();
    for i in 0..7 {
        created.push(create_blog!(app, token, blog(&format!("Post {i}"), "published", &[])));
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (status, body) = send!(app, get(&format!("/api/blogs/public?page={page}&limit=3")));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["totalPages"], 3);
        for item in body["data"].as_array().unwrap() {
            seen.push(item["id"].as_i64().unwrap());
        }
    }
    seen.sort_unstable();
    created.sort_unstable();
    assert_eq!(seen, created);

    let (status, body) = send!(app, get("/api/blogs/public?page=4&limit=3"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 7);

    let (status, body) = send!(app, get("/api/blogs/public?page=abc"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_search_requires_all_tags() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");

    let both = create_blog!(app, token, blog("Both", "published", &["A", "B"]));
    create_blog!(app, token, blog("Only A", "published", &["A"]));
    create_blog!(app, token, blog("Only B", "published", &["B"]));

    let (status, body) = send!(app, get("/api/blogs/search?tags=A,B"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["id"].as_i64(), Some(both));

    let (_, body) = send!(app, get("/api/blogs/search?query=ONLY&category=Tech"));
    assert_eq!(body["pagination"]["total"], 2);

    let (_, body) = send!(app, get("/api/blogs/search"));
    assert_eq!(body["pagination"]["total"], 3);
}

#[actix_web::test]
async fn test_each_read_counts_a_view_and_likes_accumulate() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");
    let id = create_blog!(app, token, blog("T", "published", &[]));
    let draft = create_blog!(app, token, blog("D", "draft", &[]));

    for _ in 0..4 {
        send!(app, get(&format!("/api/blogs/public/{id}")));
    }
    let (_, body) = send!(app, authed(get(&format!("/api/blogs/admin/{id}")), &token));
    assert_eq!(body["views"], 4);

    let (status, body) = send!(app, post(&format!("/api/blogs/{id}/like")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "likes": 1 }));
    let (_, body) = send!(app, post(&format!("/api/blogs/{id}/like")));
    assert_eq!(body, json!({ "likes": 2 }));

    let (status, _) = send!(app, post(&format!("/api/blogs/{draft}/like")));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_categories_are_sorted_and_distinct() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");

    for (title, category) in [("a", "Travel"), ("b", "Food"), ("c", "Travel")] {
        let mut body = blog(title, "published", &[]);
        body["category"] = json!(category);
        create_blog!(app, token, body);
    }

    let (status, body) = send!(app, get("/api/blogs/categories"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Food", "Travel"]));
}

#[actix_web::test]
async fn test_only_author_may_update_or_delete() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let owner = register!(app, "admin");
    let intruder = register!(app, "mallory");
    let id = create_blog!(app, owner, blog("Mine", "published", &[]));

    let (status, body) = send!(
        app,
        authed(put(&format!("/api/blogs/{id}")), &intruder).set_json(json!({ "title": "Hijacked" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized to update this blog");

    let (status, _) = send!(app, authed(delete(&format!("/api/blogs/{id}")), &intruder));
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send!(app, get(&format!("/api/blogs/public/{id}")));
    assert_eq!(body["title"], "Mine");

    let (status, _) = send!(app, put(&format!("/api/blogs/{id}")).set_json(json!({ "title": "x" })));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send!(app, authed(delete(&format!("/api/blogs/{id}")), &owner));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Blog deleted successfully" }));

    let (status, _) = send!(app, authed(put("/api/blogs/9999"), &owner).set_json(json!({ "title": "x" })));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_requires_fields() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");

    let (status, body) = send!(
        app,
        authed(post("/api/blogs"), &token).set_json(json!({ "title": "T", "content": "c" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: excerpt, category");

    let (status, body) = send!(
        app,
        authed(post("/api/blogs"), &token)
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_oversized_comment_is_rejected_and_not_stored() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");
    let id = create_blog!(app, token, blog("T", "published", &[]));

    let (status, body) = send!(
        app,
        post("/api/comments").set_json(json!({
            "blogId": id,
            "content": "x".repeat(2001),
            "authorName": "Guest"
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send!(app, get(&format!("/api/comments/blog/{id}")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_comment_markup_is_stripped_before_store_and_broadcast() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");
    let id = create_blog!(app, token, blog("T", "published", &[]));
    let other = create_blog!(app, token, blog("U", "published", &[]));

    let (watcher, mut inbox) = ctx.hub.connect().await;
    ctx.hub.join(watcher, &blog_room(id as i32)).await;
    let (bystander, mut elsewhere) = ctx.hub.connect().await;
    ctx.hub.join(bystander, &blog_room(other as i32)).await;

    let (status, body) = send!(
        app,
        post("/api/comments").set_json(json!({
            "blogId": id,
            "content": "Hi <script>alert(1)</script><b>there</b>",
            "authorName": "Guest"
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "Hi there");
    assert_eq!(body["isAuthor"], false);

    match inbox.try_recv().unwrap() {
        RealtimeEvent::NewComment(comment) => assert_eq!(comment.content, "Hi there"),
    }
    assert!(elsewhere.try_recv().is_err());

    let (_, body) = send!(app, get(&format!("/api/comments/blog/{id}")));
    assert_eq!(body[0]["content"], "Hi there");
}

#[actix_web::test]
async fn test_comment_rules() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let owner = register!(app, "admin");
    let stranger = register!(app, "mallory");
    let id = create_blog!(app, owner, blog("T", "published", &[]));
    let draft = create_blog!(app, owner, blog("D", "draft", &[]));

    let (status, body) = send!(app, post("/api/comments").set_json(json!({ "blogId": id, "content": "hi" })));
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = send!(app, post("/api/comments").set_json(json!({ "authorName": "x" })));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: blogId, content");

    let (status, _) = send!(
        app,
        post("/api/comments").set_json(json!({ "blogId": draft, "content": "hi", "authorName": "G" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        authed(post("/api/comments/author"), &stranger).set_json(json!({ "blogId": id, "content": "hi" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        authed(post("/api/comments/author"), &owner).set_json(json!({ "blogId": draft, "content": "note" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["authorName"], "admin");
    assert_eq!(body["isAuthor"], true);
    let comment_id = body["id"].as_i64().unwrap();

    let (status, _) = send!(app, get(&format!("/api/comments/blog/{draft}")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send!(app, authed(get(&format!("/api/comments/blog/{draft}")), &owner));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send!(app, authed(delete(&format!("/api/comments/{comment_id}")), &stranger));
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = send!(app, authed(delete(&format!("/api/comments/{comment_id}")), &owner));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comment deleted successfully");
    let (status, _) = send!(app, authed(delete(&format!("/api/comments/{comment_id}")), &owner));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_deleting_blog_removes_its_comments() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");
    let id = create_blog!(app, token, blog("T", "published", &[]));

    for text in ["one", "two"] {
        let (status, _) = send!(
            app,
            post("/api/comments").set_json(json!({ "blogId": id, "content": text, "authorName": "G" }))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = send!(app, authed(delete(&format!("/api/blogs/{id}")), &token));
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(app, get(&format!("/api/comments/blog/{id}")));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let remaining = SeaOrmCommentRepository::new(ctx.db.clone())
        .list_for_blog(id as i32)
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[actix_web::test]
async fn test_auth_failures() {
    let ctx = context().await;
    let app = init_app!(ctx);
    register!(app, "admin");

    let (status, body) = send!(
        app,
        post("/api/auth/register").set_json(json!({ "username": "admin", "password": "secret1" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already exists");

    let (status, _) = send!(
        app,
        post("/api/auth/register").set_json(json!({ "username": "bob", "password": "12345" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(app, post("/api/auth/login").set_json(json!({ "username": "admin" })));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        post("/api/auth/login").set_json(json!({ "username": "admin", "password": "wrong1" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = send!(app, authed(get("/api/auth/me"), "not-a-token"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register!(app, "carol");
    let (status, body) = send!(app, authed(get("/api/auth/me"), &token));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "carol");
    assert!(body.get("passwordHash").is_none());
}

#[actix_web::test]
async fn test_path_ids_must_be_numeric() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let (status, body) = send!(app, get("/api/blogs/public/abc"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_health_and_delay() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let (status, body) = send!(app, get("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send!(app, get("/api/delay/5"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["delayed"], 5);

    let (status, body) = send!(app, get("/api/delay/10001"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid delay value. Must be between 0 and 10000ms");

    let (status, _) = send!(app, get("/api/delay/-1"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_upload_and_serve_image() {
    let ctx = context().await;
    let app = init_app!(ctx);
    let token = register!(app, "admin");
    let png: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    let (content_type, body) = multipart("image", "image/png", png);
    let (status, _) = send!(
        app,
        post("/api/upload")
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (content_type, body) = multipart("image", "text/plain", b"hello");
    let (status, body) = send!(
        app,
        authed(post("/api/upload"), &token)
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only image files are allowed");

    let (content_type, body) = multipart("file", "image/png", png);
    let (status, body) = send!(
        app,
        authed(post("/api/upload"), &token)
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    let (status, body) = send!(
        app,
        authed(post("/api/upload"), &token)
            .insert_header(("Content-Type", "image/png"))
            .set_payload(png)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (content_type, body) = multipart("image", "image/png", png);
    let (status, body) = send!(
        app,
        authed(post("/api/upload"), &token)
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["mimetype"], "image/png");
    assert_eq!(body["size"], png.len());
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/") && url.ends_with(".png"));

    let resp = test::call_service(&app, get(&url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "image/png");
    assert_eq!(test::read_body(resp).await.as_ref(), png);

    let (status, _) = send!(app, get("/uploads/missing.png"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(&ctx.upload_dir).ok();
}

#[actix_web::test]
async fn test_cross_origin_requests_are_allowed() {
    let ctx = context().await;
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/blogs/public")
            .insert_header(("Origin", "http://localhost:5173"))
            .insert_header(("Access-Control-Request-Method", "POST"))
            .insert_header(("Access-Control-Request-Headers", "authorization,content-type"))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("access-control-allow-origin"));
    assert!(resp.headers().contains_key("access-control-allow-methods"));

    let resp = test::call_service(
        &app,
        get("/api/blogs/categories")
            .insert_header(("Origin", "http://localhost:5173"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}
