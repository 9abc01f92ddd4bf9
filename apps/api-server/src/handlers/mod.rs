//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod search;
mod tags;

#[cfg(test)]
mod tests;

use actix_web::web;
use chrono::Datelike;

use quill_core::domain::Post;
use quill_shared::dto::PostSummary;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Posts
            .route("/posts", web::get().to(posts::list_posts))
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{id}/publish", web::post().to(posts::publish_post))
            .route(
                "/posts/{id}/comments",
                web::post().to(comments::create_comment),
            )
            .route(
                "/posts/{year}/{month}/{day}/{slug}",
                web::get().to(posts::get_post),
            )
            // Search & tags
            .route("/search", web::get().to(search::search_posts))
            .route("/tags", web::get().to(tags::list_tags)),
    );
}

/// Map a post to its listing shape, including the canonical URL built
/// from publish date and slug.
pub(crate) fn summarize(post: &Post) -> PostSummary {
    let date = post.published_at.date_naive();
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        published_at: post.published_at,
        url: format!(
            "/api/posts/{}/{}/{}/{}",
            date.year(),
            date.month(),
            date.day(),
            post.slug
        ),
    }
}
