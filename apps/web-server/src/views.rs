//! Server-rendered pages.

use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
};
use askama::Template;
use inkpost_core::{Post, StoreError};
use std::fmt;

/// A post prepared for display.
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub edited: bool,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: post.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            updated_at: post.updated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            edited: post.is_edited(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub posts: Vec<PostView>,
}

#[derive(Template)]
#[template(path = "compose.html")]
pub struct ComposeTemplate;

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub post: PostView,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub post: PostView,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate;

/// Failures of page handlers, rendered as HTML pages.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    Internal,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NotFound => write!(f, "Page not found"),
            PageError::Internal => write!(f, "Internal error"),
        }
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            PageError::NotFound => StatusCode::NOT_FOUND,
            PageError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            PageError::NotFound => NotFoundTemplate.render(),
            PageError::Internal => ErrorTemplate.render(),
        };

        match body {
            Ok(html) => html_response(self.status_code(), html),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                HttpResponse::build(self.status_code())
                    .content_type(ContentType::plaintext())
                    .body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => PageError::NotFound,
            StoreError::PersistFailure(msg) => {
                tracing::error!("Post store write failed: {}", msg);
                PageError::Internal
            }
            StoreError::ReadDegraded(msg) => {
                tracing::error!("Post store read failed: {}", msg);
                PageError::Internal
            }
        }
    }
}

/// Result type alias for page handlers.
pub type PageResult<T> = Result<T, PageError>;

/// Render `template` as a `200 OK` HTML page.
pub fn render<T: Template>(template: T) -> PageResult<HttpResponse> {
    template
        .render()
        .map(|html| html_response(StatusCode::OK, html))
        .map_err(|e| {
            tracing::error!(error = %e, "Template rendering failed");
            PageError::Internal
        })
}

fn html_response(status: StatusCode, html: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html)
}
