//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod comments;
mod health;
mod upload;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/delay/{ms}", web::get().to(health::delay))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/blogs")
                    // Public
                    .route("/public", web::get().to(blogs::list_public))
                    .route("/public/{id}", web::get().to(blogs::get_public))
                    .route("/search", web::get().to(blogs::search))
                    .route("/categories", web::get().to(blogs::categories))
                    .route("/{id}/like", web::post().to(blogs::like))
                    // Author
                    .route("/admin", web::get().to(blogs::list_admin))
                    .route("/admin/{id}", web::get().to(blogs::get_admin))
                    .route("", web::post().to(blogs::create))
                    .route("/{id}", web::put().to(blogs::update))
                    .route("/{id}", web::delete().to(blogs::delete)),
            )
            .service(
                web::scope("/comments")
                    .route("/blog/{blog_id}", web::get().to(comments::list_for_blog))
                    .route("", web::post().to(comments::create_guest))
                    .route("/author", web::post().to(comments::create_author))
                    .route("/{id}", web::delete().to(comments::delete)),
            )
            .route("/upload", web::post().to(upload::upload_image)),
    )
    .route("/uploads/{filename}", web::get().to(upload::serve_upload));
}
