use axum::{Json, Router, routing::get};
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome to Go E-Commerce API";

#[derive(Debug, Serialize)]
pub struct WelcomeResp {
    pub message: &'static str,
}

pub async fn welcome() -> Json<WelcomeResp> {
    Json(WelcomeResp {
        message: WELCOME_MESSAGE,
    })
}

pub fn routes() -> Router {
    Router::new().route("/", get(welcome))
}
