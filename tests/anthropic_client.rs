//! The real reqwest client against a loopback server that plays the
//! Messages API.

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use tourlens::analysis::analyze_tour;
use tourlens::config::ProviderConfig;
use tourlens::error::AnalyzeError;
use tourlens::provider::{AnthropicClient, CompletionProvider};

#[derive(Debug, Clone)]
struct Recorded {
    api_key: Option<String>,
    version: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Upstream {
    status: u16,
    reply: Value,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

async fn messages(
    req: HttpRequest,
    body: web::Json<Value>,
    upstream: web::Data<Upstream>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    upstream.seen.lock().unwrap().push(Recorded {
        api_key: header("x-api-key"),
        version: header("anthropic-version"),
        body: body.into_inner(),
    });
    HttpResponse::build(StatusCode::from_u16(upstream.status).unwrap()).json(&upstream.reply)
}

/// Starts a one-worker server on an ephemeral port and returns the
/// messages endpoint URL plus the requests it has seen.
fn spawn_upstream(status: u16, reply: Value) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let upstream = Upstream {
        status,
        reply,
        seen: seen.clone(),
    };

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(upstream.clone()))
            .route("/v1/messages", web::post().to(messages))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    (format!("http://{addr}/v1/messages"), seen)
}

fn client(api_url: String) -> AnthropicClient {
    AnthropicClient::new(ProviderConfig {
        api_url,
        api_key: "sk-test".to_string(),
        model: "claude-sonnet-4-20250514".to_string(),
        api_version: "2023-06-01".to_string(),
        max_tokens: 1500,
        timeout: None,
    })
    .unwrap()
}

fn analysis_json() -> Value {
    json!({
        "engagementScore": "72",
        "engagementInsight": "Solid for the price band",
        "topSpace": "Outdoor Space",
        "spaceInsight": "The deck view holds attention",
        "avgDuration": "3:05",
        "durationInsight": "Typical first-visit length",
        "marketingAngle": "Entertainer's Dream",
        "angleInsight": "Show the deck at dusk",
        "marketingCopy": "Host on the deck. Cook in the open kitchen. Unwind by the fire."
    })
}

#[actix_web::test]
async fn sends_credentials_and_single_user_message() {
    let reply = json!({ "content": [{ "type": "text", "text": "hello" }] });
    let (url, seen) = spawn_upstream(200, reply);

    let text = client(url).complete("the prompt").await.unwrap();
    assert_eq!(text, "hello");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].api_key.as_deref(), Some("sk-test"));
    assert_eq!(seen[0].version.as_deref(), Some("2023-06-01"));
    assert_eq!(
        seen[0].body,
        json!({
            "model": "claude-sonnet-4-20250514",
            "max_tokens": 1500,
            "messages": [{ "role": "user", "content": "the prompt" }]
        })
    );
}

#[actix_web::test]
async fn joins_text_blocks_only() {
    let reply = json!({
        "content": [
            { "type": "text", "text": "first" },
            { "type": "tool_use", "id": "tu_1", "name": "noop", "input": {} },
            { "type": "text", "text": "second" }
        ]
    });
    let (url, _) = spawn_upstream(200, reply);

    let text = client(url).complete("p").await.unwrap();
    assert_eq!(text, "first\nsecond");
}

#[actix_web::test]
async fn error_status_becomes_upstream_error() {
    for status in [429u16, 500] {
        let reply = json!({ "type": "error", "error": { "type": "overloaded_error" } });
        let (url, _) = spawn_upstream(status, reply);

        let err = client(url).complete("p").await.unwrap_err();
        assert!(
            matches!(err, AnalyzeError::Upstream { status: s } if s == status),
            "{err:?}"
        );
        assert!(err.to_string().contains(&status.to_string()));
    }
}

#[actix_web::test]
async fn unreachable_provider_is_a_transport_error() {
    let err = client("http://127.0.0.1:1/v1/messages".to_string())
        .complete("p")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::Transport(_)), "{err:?}");
}

#[actix_web::test]
async fn fenced_reply_round_trips_through_the_client() {
    let pretty = serde_json::to_string_pretty(&analysis_json()).unwrap();
    let fenced = format!("```json\n{pretty}\n```");
    let reply = json!({ "content": [{ "type": "text", "text": fenced }] });
    let (url, seen) = spawn_upstream(200, reply);

    let tour = "https://my.matterport.com/show/?m=abc123";
    let result = analyze_tour(&client(url), tour).await.unwrap();
    assert_eq!(serde_json::to_value(&result).unwrap(), analysis_json());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let prompt = seen[0].body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains(tour));
}

#[actix_web::test]
async fn rejected_url_sends_nothing() {
    let (url, seen) = spawn_upstream(200, json!({ "content": [] }));

    let err = analyze_tour(&client(url), "https://example.com/not-a-tour")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::Validation(_)));
    assert!(seen.lock().unwrap().is_empty());
}
