use gloo_net::http::Request;
use serde_json::json;
use thiserror::Error;
use tourlens_common::AnalysisResult;

pub const ANALYZE_ENDPOINT: &str = "/api/analyze";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("analysis request failed: {0}")]
    Network(gloo_net::Error),

    #[error("analysis endpoint returned {0}")]
    Status(u16),

    #[error("analysis response was not a valid result: {0}")]
    Decode(gloo_net::Error),
}

/// Posts the tour URL to the analysis endpoint. The key for the model
/// lives on the server; nothing credentialed is sent from here.
pub async fn fetch_analysis(url: &str) -> Result<AnalysisResult, FetchError> {
    let resp = Request::post(ANALYZE_ENDPOINT)
        .json(&json!({ "url": url }))
        .map_err(FetchError::Network)?
        .send()
        .await
        .map_err(FetchError::Network)?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    resp.json::<AnalysisResult>().await.map_err(FetchError::Decode)
}
