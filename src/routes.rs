use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tourlens_common::tour::SUPPORTED_HOSTS;

use crate::analysis::analyze_tour;
use crate::error::AnalyzeError;
use crate::provider::CompletionProvider;

/// Paths that answer analysis requests. The bare `/analyze` mirrors the
/// serverless route for pages that post to the site root.
pub const ANALYZE_PATHS: [&str; 2] = ["/api/analyze", "/analyze"];

pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub max_tokens: u32,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    url: Option<String>,
}

// ─── Handlers ───────────────────────────────────────────────────────────────

async fn analyze(
    state: web::Data<AppState>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, AnalyzeError> {
    let url = body.url.as_deref().unwrap_or_default();

    tracing::info!(url = %url, "analysis requested");

    match analyze_tour(state.provider.as_ref(), url).await {
        Ok(result) => {
            tracing::info!(
                url = %url,
                score = %result.engagement_score,
                top_space = %result.top_space,
                "analysis complete"
            );
            Ok(HttpResponse::Ok().json(result))
        }
        Err(AnalyzeError::Validation(e)) => {
            tracing::info!(url = %url, reason = %e, "tour URL rejected");
            Err(AnalyzeError::Validation(e))
        }
        Err(e) => {
            tracing::error!(url = %url, error = %e, "analysis failed");
            Err(e)
        }
    }
}

async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({
        "error": "Method not allowed"
    }))
}

async fn get_config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "model": state.provider.model(),
        "max_tokens": state.max_tokens,
        "supported_hosts": SUPPORTED_HOSTS,
    }))
}

// ─── App Wiring ─────────────────────────────────────────────────────────────

pub fn configure(cfg: &mut web::ServiceConfig) {
    for path in ANALYZE_PATHS {
        cfg.service(
            web::resource(path)
                .route(web::post().to(analyze))
                .route(web::method(Method::OPTIONS).to(preflight))
                .default_service(web::to(method_not_allowed)),
        );
    }
    cfg.route("/config", web::get().to(get_config));
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "OPTIONS", "POST"])
        .allowed_header(header::CONTENT_TYPE)
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            let detail = err.to_string();
            tracing::warn!(error = %detail, "rejected request body");
            let response = HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Invalid request: {}", detail)
            }));
            actix_web::error::InternalError::from_response(err, response).into()
        })
}
