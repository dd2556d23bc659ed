pub mod uploads;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/hello", web::get().to(hello))
            .route("/upload", web::post().to(uploads::upload_files)),
    );
}

/// Everything the decoder accepts is held in memory, so the total and the
/// in-memory limit are the same number. Decoder errors are rendered by the
/// upload handler, not here.
pub fn multipart_config(memory_limit: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(memory_limit)
        .memory_limit(memory_limit)
}

pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Hello, API!",
    }))
}
