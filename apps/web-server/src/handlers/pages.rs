//! HTML page handlers.

use actix_web::{HttpResponse, http::header, web};
use inkpost_shared::dto::PostForm;
use uuid::Uuid;

use crate::state::AppState;
use crate::views::{
    ComposeTemplate, EditTemplate, HomeTemplate, PageError, PageResult, PostTemplate, PostView,
    render,
};

/// Path ids that are not UUIDs can never name a post.
fn parse_id(raw: &str) -> PageResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| PageError::NotFound)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /
pub async fn home(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let posts = state.posts.list().await;
    render(HomeTemplate {
        posts: posts.iter().map(PostView::from).collect(),
    })
}

/// GET /compose
pub async fn compose() -> PageResult<HttpResponse> {
    render(ComposeTemplate)
}

/// POST /submit
pub async fn submit(
    state: web::Data<AppState>,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let PostForm { title, content } = form.into_inner();
    state.posts.create(title, content).await?;
    Ok(redirect("/"))
}

/// GET /posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.get(id).await?;
    render(PostTemplate {
        post: PostView::from(&post),
    })
}

/// GET /posts/{id}/update
pub async fn edit(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.get(id).await?;
    render(EditTemplate {
        post: PostView::from(&post),
    })
}

/// POST /posts/{id}/update
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    let PostForm { title, content } = form.into_inner();
    state.posts.update(id, title, content).await?;
    Ok(redirect(&format!("/posts/{id}")))
}

/// POST /posts/{id}/delete
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(id).await?;
    Ok(redirect("/"))
}

/// Fallback for unknown routes.
pub async fn not_found() -> PageResult<HttpResponse> {
    Err(PageError::NotFound)
}
