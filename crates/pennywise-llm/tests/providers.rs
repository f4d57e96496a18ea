//! Provider tests against local mock chat-completion servers

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use pennywise_llm::{
    CompletionRequest, EuriConfig, EuriProvider, GroqConfig, GroqProvider, LLMError,
    LLMProvider, LLMRouterBuilder, ProviderKind,
};

#[derive(Clone)]
struct MockReply {
    status: StatusCode,
    body: Value,
    delay: Duration,
}

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl Recorded {
    fn take(&self) -> Vec<(Option<String>, Value)> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

/// Serve `POST /chat/completions` with a fixed reply on an ephemeral port
async fn mock_server(reply: MockReply) -> (String, Recorded) {
    let recorded = Recorded::default();

    async fn handler(
        State((reply, recorded)): State<(MockReply, Recorded)>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        recorded.requests.lock().unwrap().push((auth, body));

        tokio::time::sleep(reply.delay).await;
        (reply.status, Json(reply.body))
    }

    let app = Router::new()
        .route("/chat/completions", post(handler))
        .with_state((reply, recorded.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}

fn ok(body: Value) -> MockReply {
    MockReply {
        status: StatusCode::OK,
        body,
        delay: Duration::ZERO,
    }
}

fn euri_body(text: &str) -> Value {
    json!({"data": {"choices": [{"message": {"role": "assistant", "content": text}}]}})
}

fn groq_body(text: &str) -> Value {
    json!({"choices": [{"message": {"role": "assistant", "content": text}}]})
}

fn euri(base: &str) -> EuriProvider {
    EuriProvider::new(EuriConfig {
        base_url: Some(base.to_string()),
        api_token: Some("euri-token".to_string()),
        ..Default::default()
    })
}

fn groq(base: &str) -> GroqProvider {
    GroqProvider::new(GroqConfig {
        base_url: base.to_string(),
        api_key: Some("groq-key".to_string()),
        ..Default::default()
    })
}

#[tokio::test]
async fn euri_sends_prompt_as_sole_user_message() {
    let (base, recorded) = mock_server(ok(euri_body("Build an emergency fund."))).await;

    let response = euri(&base)
        .complete(CompletionRequest::prompt("What now?"), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(response.content, "Build an emergency fund.");
    assert_eq!(response.model.as_deref(), Some("gpt-4.1-nano"));

    let requests = recorded.take();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer euri-token"));
    assert_eq!(body["model"], "gpt-4.1-nano");
    assert_eq!(body["max_tokens"], 300);
    assert_eq!(
        body["messages"],
        json!([{"role": "user", "content": "What now?"}])
    );
}

#[tokio::test]
async fn groq_prepends_advisor_system_message() {
    let (base, recorded) = mock_server(ok(groq_body("Cut dining out."))).await;

    let response = groq(&base)
        .complete(CompletionRequest::prompt("Tips?"), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(response.content, "Cut dining out.");

    let (auth, body) = recorded.take().remove(0);
    assert_eq!(auth.as_deref(), Some("Bearer groq-key"));
    assert_eq!(body["model"], "mixtral-8x7b-32768");
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "You are a financial advisor."},
            {"role": "user", "content": "Tips?"}
        ])
    );
}

#[tokio::test]
async fn groq_request_system_and_max_tokens_override_defaults() {
    let (base, recorded) = mock_server(ok(groq_body("Noted."))).await;

    let request = CompletionRequest::prompt("Tips?")
        .with_system("Answer in one sentence.")
        .with_max_tokens(50);
    groq(&base)
        .complete(request, Duration::from_secs(5))
        .await
        .unwrap();

    let (_, body) = recorded.take().remove(0);
    assert_eq!(body["max_tokens"], 50);
    assert_eq!(body["messages"][0]["content"], "Answer in one sentence.");
    assert!(body.get("temperature").is_none());
}

#[tokio::test]
async fn non_200_status_is_an_error() {
    let (base, _) = mock_server(MockReply {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: json!({"error": "overloaded"}),
        delay: Duration::ZERO,
    })
    .await;

    let err = euri(&base)
        .complete(CompletionRequest::prompt("hi"), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::RequestFailed { status: 503, .. }));
}

#[tokio::test]
async fn wrong_envelope_is_invalid_response() {
    // Groq-shaped body sent to the Euri adapter: `data` is missing
    let (base, _) = mock_server(ok(groq_body("hello"))).await;

    let err = euri(&base)
        .complete(CompletionRequest::prompt("hi"), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::InvalidResponse { .. }));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let (base, _) = mock_server(MockReply {
        status: StatusCode::OK,
        body: groq_body("too late"),
        delay: Duration::from_secs(2),
    })
    .await;

    let err = groq(&base)
        .complete(CompletionRequest::prompt("hi"), Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::Timeout { .. }));
}

#[tokio::test]
async fn unreachable_provider_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = groq(&format!("http://{}", addr))
        .complete(CompletionRequest::prompt("hi"), Duration::from_secs(2))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::NetworkError { .. }));
}

#[tokio::test]
async fn router_falls_back_from_503_to_groq() {
    let (euri_base, euri_calls) = mock_server(MockReply {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: json!({}),
        delay: Duration::ZERO,
    })
    .await;
    let (groq_base, groq_calls) = mock_server(ok(groq_body("Spend less on food."))).await;

    let router = LLMRouterBuilder::new()
        .with_provider(Arc::new(euri(&euri_base)))
        .with_provider(Arc::new(groq(&groq_base)))
        .build();

    let (response, kind) = router
        .complete_with_fallback(CompletionRequest::prompt("Advice?"))
        .await
        .unwrap();

    assert_eq!(kind, ProviderKind::Groq);
    assert_eq!(response.content, "Spend less on food.");
    assert_eq!(euri_calls.take().len(), 1);
    assert_eq!(groq_calls.take().len(), 1);
}

#[tokio::test]
async fn router_gives_up_when_everything_fails() {
    let (euri_base, _) = mock_server(MockReply {
        status: StatusCode::OK,
        body: euri_body("late"),
        delay: Duration::from_secs(2),
    })
    .await;
    let (groq_base, _) = mock_server(MockReply {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({}),
        delay: Duration::ZERO,
    })
    .await;

    let router = LLMRouterBuilder::new()
        .with_provider(Arc::new(euri(&euri_base)))
        .with_provider(Arc::new(groq(&groq_base)))
        .with_timeout(Duration::from_millis(200))
        .build();

    assert!(router
        .complete_with_fallback(CompletionRequest::prompt("Advice?"))
        .await
        .is_none());
}

#[tokio::test]
async fn empty_euri_reply_falls_through_to_groq() {
    let (euri_base, euri_calls) = mock_server(ok(euri_body(""))).await;
    let (groq_base, groq_calls) = mock_server(ok(groq_body("from groq"))).await;

    let err = euri(&euri_base)
        .complete(CompletionRequest::prompt("Advice?"), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::InvalidResponse { .. }));
    euri_calls.take();

    let router = LLMRouterBuilder::new()
        .with_provider(Arc::new(euri(&euri_base)))
        .with_provider(Arc::new(groq(&groq_base)))
        .build();

    let (response, kind) = router
        .complete_with_fallback(CompletionRequest::prompt("Advice?"))
        .await
        .unwrap();

    assert_eq!(kind, ProviderKind::Groq);
    assert_eq!(response.content, "from groq");
    assert_eq!(euri_calls.take().len(), 1);
    assert_eq!(groq_calls.take().len(), 1);
}
