use std::sync::Arc;

use actix_web::{App, http::StatusCode, http::header, test, web};
use inkpost_core::ports::PostStore;
use inkpost_infra::JsonFilePostStore;
use inkpost_shared::dto::{PostForm, PostResponse};
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use super::configure_routes;
use crate::state::AppState;

async fn test_state() -> (TempDir, Arc<JsonFilePostStore>, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(
        JsonFilePostStore::open(dir.path().join("posts.json"))
            .await
            .unwrap(),
    );
    let state = AppState::new(store.clone());
    (dir, store, state)
}

fn form(title: &str, content: &str) -> PostForm {
    PostForm {
        title: title.to_string(),
        content: content.to_string(),
    }
}

async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_home_lists_newest_first() {
    let (_dir, store, state) = test_state().await;
    store.create("Hello".into(), "World".into()).await.unwrap();
    store.create("Second".into(), "Post".into()).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    let second = body.find("Second").unwrap();
    let first = body.find("Hello").unwrap();
    assert!(second < first);
}

#[actix_web::test]
async fn test_compose_renders_form() {
    let (_dir, _store, state) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/compose").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("action=\"/submit\""));
}

#[actix_web::test]
async fn test_submit_creates_post_and_redirects_home() {
    let (_dir, store, state) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/submit")
        .set_form(form("Hello", "World"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let posts = store.list().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello");
    assert_eq!(posts[0].content, "World");
}

#[actix_web::test]
async fn test_post_page_escapes_html() {
    let (_dir, store, state) = test_state().await;
    let post = store
        .create("<script>alert(1)</script>".into(), "body".into())
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[actix_web::test]
async fn test_unknown_or_malformed_id_renders_not_found() {
    let (_dir, _store, state) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    for uri in [
        format!("/posts/{}", Uuid::new_v4()),
        format!("/posts/{}/update", Uuid::new_v4()),
        "/posts/not-a-uuid".to_string(),
        "/no/such/page".to_string(),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(body_text(resp).await.contains("Not Found"));
    }
}

#[actix_web::test]
async fn test_edit_form_prefills_post() {
    let (_dir, store, state) = test_state().await;
    let post = store.create("Hello".into(), "World".into()).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/update", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("value=\"Hello\""));
    assert!(body.contains(">World</textarea>"));
}

#[actix_web::test]
async fn test_update_form_redirects_to_post() {
    let (_dir, store, state) = test_state().await;
    let post = store.create("Hello".into(), "World".into()).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/update", post.id))
        .set_form(form("Hello", "Updated"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        format!("/posts/{}", post.id).as_str()
    );
    let updated = store.get(post.id).await.unwrap();
    assert_eq!(updated.content, "Updated");
    assert_eq!(updated.created_at, post.created_at);
}

#[actix_web::test]
async fn test_update_form_for_missing_post_is_not_found() {
    let (_dir, store, state) = test_state().await;
    store.create("Hello".into(), "World".into()).await.unwrap();
    let before = std::fs::read(store.path()).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/update", Uuid::new_v4()))
        .set_form(form("x", "y"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[actix_web::test]
async fn test_delete_form_removes_post_once() {
    let (_dir, store, state) = test_state().await;
    let post = store.create("Hello".into(), "World".into()).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let uri = format!("/posts/{}/delete", post.id);
    let req = test::TestRequest::post().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    assert!(store.list().await.is_empty());

    let req = test::TestRequest::post().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unreadable_store_degrades_home_but_not_api() {
    let (_dir, store, state) = test_state().await;
    std::fs::write(store.path(), b"not json").unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("No posts yet"));

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["status"], 500);

    let req = test::TestRequest::post()
        .uri("/submit")
        .set_form(form("Hello", "World"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(std::fs::read(store.path()).unwrap(), b"not json");
}

#[actix_web::test]
async fn test_health_reports_store_status() {
    let (_dir, store, state) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let health: Value = test::read_body_json(resp).await;
    assert_eq!(health["status"], "ok");

    std::fs::write(store.path(), b"not json").unwrap();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let health: Value = test::read_body_json(resp).await;
    assert_eq!(health["status"], "degraded");
}

#[actix_web::test]
async fn test_api_crud_round() {
    let (_dir, _store, state) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(form("Hello", "World"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let post: PostResponse = serde_json::from_value(created["data"].clone()).unwrap();
    assert_eq!(post.title, "Hello");
    assert_eq!(post.created_at, post.updated_at);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", post.id))
        .set_json(form("Hello", "Updated"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["data"]["content"], "Updated");

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    let listing: Value = test::read_body_json(resp).await;
    assert_eq!(listing["success"], true);
    assert_eq!(listing["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["title"], "Not Found");
}

#[actix_web::test]
async fn test_api_rejects_malformed_json() {
    let (_dir, _store, state) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ nope")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["title"], "Bad Request");
}
