use actix_web::{App, test, web};
use serde_json::json;
use uuid::Uuid;

use quill_shared::ApiResponse;
use quill_shared::dto::{PostDetailResponse, PostSummary, SearchResponse};

use crate::state::AppState;

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(super::configure_routes),
        )
        .await
    };
}

macro_rules! create_and_publish {
    ($app:expr, $title:expr, $tags:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "author_id": Uuid::new_v4(),
                "title": $title,
                "body": "Some body text",
                "tags": $tags,
            }))
            .to_request();
        let created: ApiResponse<PostDetailResponse> =
            test::call_and_read_body_json(&$app, req).await;
        let post = created.data.unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{}/publish", post.id))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert!(resp.status().is_success());

        post
    }};
}

#[actix_web::test]
async fn draft_posts_stay_out_of_the_listing() {
    let app = test_app!(AppState::in_memory());

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "author_id": Uuid::new_v4(),
            "title": "Still a draft",
            "body": "unpublished",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let listed: ApiResponse<Vec<PostSummary>> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.data.unwrap().is_empty());
}

#[actix_web::test]
async fn published_post_is_addressable_by_date_and_slug() {
    let app = test_app!(AppState::in_memory());

    let post = create_and_publish!(app, "Hello World", Vec::<&str>::new());

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let listed: ApiResponse<Vec<PostSummary>> = test::call_and_read_body_json(&app, req).await;
    let summaries = listed.data.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].slug, "hello-world");

    let req = test::TestRequest::get()
        .uri(&summaries[0].url)
        .to_request();
    let detail: ApiResponse<PostDetailResponse> = test::call_and_read_body_json(&app, req).await;
    let detail = detail.data.unwrap();
    assert_eq!(detail.id, post.id);
    assert_eq!(detail.status, "published");
    assert!(detail.comments.is_empty());
}

#[actix_web::test]
async fn comments_show_up_under_their_post() {
    let app = test_app!(AppState::in_memory());

    let post = create_and_publish!(app, "Commentable", Vec::<&str>::new());

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .set_json(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "body": "First!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let date = post.published_at.date_naive();
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/posts/{}/{}/{}/{}",
            date.format("%Y"),
            date.format("%-m"),
            date.format("%-d"),
            post.slug
        ))
        .to_request();
    let detail: ApiResponse<PostDetailResponse> = test::call_and_read_body_json(&app, req).await;
    let comments = detail.data.unwrap().comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].name, "Ann");
}

#[actix_web::test]
async fn comment_with_bad_email_is_rejected() {
    let app = test_app!(AppState::in_memory());

    let post = create_and_publish!(app, "Strict", Vec::<&str>::new());

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .set_json(json!({
            "name": "Ann",
            "email": "not-an-email",
            "body": "hi",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn comments_on_drafts_or_unknown_posts_are_a_404() {
    let app = test_app!(AppState::in_memory());

    // Created but never published: invisible to the public API.
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "author_id": Uuid::new_v4(),
            "title": "Quiet draft",
            "body": "unpublished",
        }))
        .to_request();
    let created: ApiResponse<PostDetailResponse> = test::call_and_read_body_json(&app, req).await;
    let draft = created.data.unwrap();

    let comment = json!({
        "name": "Ann",
        "email": "ann@example.com",
        "body": "hi",
    });

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", draft.id))
        .set_json(comment.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", Uuid::new_v4()))
        .set_json(comment)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn related_posts_appear_on_the_detail_page() {
    let app = test_app!(AppState::in_memory());

    let p = create_and_publish!(app, "Reference post", &["python", "django"]);
    let a = create_and_publish!(app, "Shares both", &["python", "django"]);
    let _ = create_and_publish!(app, "Unrelated", &["cooking"]);

    let date = p.published_at.date_naive();
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/posts/{}/{}/{}/{}",
            date.format("%Y"),
            date.format("%-m"),
            date.format("%-d"),
            p.slug
        ))
        .to_request();
    let detail: ApiResponse<PostDetailResponse> = test::call_and_read_body_json(&app, req).await;
    let related = detail.data.unwrap().related;
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, a.id);
}

#[actix_web::test]
async fn search_finds_published_titles() {
    let app = test_app!(AppState::in_memory());

    let post = create_and_publish!(app, "Rust in Production", Vec::<&str>::new());

    let req = test::TestRequest::get()
        .uri("/api/search?q=rust%20production")
        .to_request();
    let found: ApiResponse<SearchResponse> = test::call_and_read_body_json(&app, req).await;
    let found = found.data.unwrap();
    assert_eq!(found.query, "rust production");
    assert_eq!(found.hits.len(), 1);
    assert_eq!(found.hits[0].post.id, post.id);
    assert!(found.hits[0].score > 0.1);

    // Blank query is "no query asked", not an error.
    let req = test::TestRequest::get().uri("/api/search?q=%20").to_request();
    let blank: ApiResponse<SearchResponse> = test::call_and_read_body_json(&app, req).await;
    assert!(blank.data.unwrap().hits.is_empty());
}

#[actix_web::test]
async fn listing_by_unknown_tag_is_a_404() {
    let app = test_app!(AppState::in_memory());

    let req = test::TestRequest::get()
        .uri("/api/posts?tag=nope")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
