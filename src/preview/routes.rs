// src/preview/routes.rs
use actix_web::web;

use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health_check))
            .route("/dashboard", web::get().to(handlers::get_dashboard)),
    )
    .route("/report", web::get().to(handlers::get_report))
    .route("/{_:.*}", web::get().to(handlers::static_file_handler));
}
