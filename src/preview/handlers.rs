// src/preview/handlers.rs
use actix_web::{HttpRequest, HttpResponse, Responder, Result, http::header, web};
use rust_embed::RustEmbed;
use serde_json::json;
use std::borrow::Cow;

use super::PreviewState;

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "driftdeck-preview",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn get_dashboard(state: web::Data<PreviewState>) -> Result<HttpResponse> {
    let snapshot = state.read().clone();
    Ok(HttpResponse::Ok().json(snapshot))
}

/// Serves the current report under its sandbox policy, so scripts inside
/// the service's markup never run with the preview's origin.
pub async fn get_report(state: web::Data<PreviewState>) -> Result<HttpResponse> {
    let snapshot = state.read();
    match &snapshot.report {
        Some(doc) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_SECURITY_POLICY, doc.content_security_policy.clone()))
            .content_type("text/html; charset=utf-8")
            .body(doc.html.clone())),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "No report rendered yet"
        }))),
    }
}

pub async fn static_file_handler(req: HttpRequest) -> impl Responder {
    let path = if req.path() == "/" {
        "index.html"
    } else {
        &req.path()[1..]
    };

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(Cow::into_owned(content.data))
        }
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}
