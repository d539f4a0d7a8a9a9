//! HTTP handlers and route configuration.

mod api;
mod health;
mod pages;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::json_error_handler;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(api::list_posts))
                    .route("", web::post().to(api::create_post))
                    .route("/{id}", web::get().to(api::get_post))
                    .route("/{id}", web::put().to(api::update_post))
                    .route("/{id}", web::delete().to(api::delete_post)),
            ),
    )
    .route("/", web::get().to(pages::home))
    .route("/compose", web::get().to(pages::compose))
    .route("/submit", web::post().to(pages::submit))
    .service(
        web::scope("/posts/{id}")
            .route("", web::get().to(pages::show))
            .route("/update", web::get().to(pages::edit))
            .route("/update", web::post().to(pages::update))
            .route("/delete", web::post().to(pages::delete)),
    )
    .default_service(web::to(pages::not_found));
}
