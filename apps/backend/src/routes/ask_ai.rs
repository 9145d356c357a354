use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::state::app_state::AppState;

/// `POST /api/ask-ai`: the body shape decides which game protocol answers.
async fn ask_ai(
    body: ValidatedJson<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let response = app_state.gateway.ask(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(ask_ai));
}
