use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Welcome message at the API root.
#[get("/")]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "welcome to task manager API"
    }))
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
