//! End-to-end tests: router, pipeline and the real collaborator clients, talking to
//! stubbed providers over loopback HTTP.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chat_transcript::{HttpTransport, Origin, SendOutcome, Transcript};
use common::{
    types::{
        chat::{default_greeting, SUGGESTION_COUNT},
        language::Language,
    },
    utils::config::AppConfig,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use test_utils::*;

async fn post_chat(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn test_partner_question_end_to_end() {
    let upstream = Upstream::start(&partners_completion()).await;
    let app = build_app(&test_config(&upstream));

    let (status, body) = post_chat(
        app,
        "/api/chat",
        json!({
            "message": "Quels sont vos partenaires ?",
            "language": "fr",
            "isInitialMessage": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Voici nos partenaires..."));
    assert_eq!(
        body["suggestedQuestions"],
        json!(["Q1", "Q2", "Avez-vous d'autres questions ?"])
    );
    assert_eq!(body["confidence"], json!(0.8));
}

#[tokio::test]
async fn test_collaborators_receive_expected_requests() {
    let upstream = Upstream::start(&partners_completion()).await;
    let app = build_app(&test_config(&upstream));

    post_chat(
        app,
        "/api/chat-bubble",
        json!({"message": "Sopra Steria stage", "language": "en"}),
    )
    .await;

    let searches = upstream.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0]["api_key"], json!("tvly-test"));
    assert_eq!(
        searches[0]["query"],
        json!("Ingénieur-e Au Féminin Sopra Steria stage")
    );
    assert_eq!(searches[0]["max_results"], json!(5));

    let completions = upstream.completions();
    assert_eq!(completions.len(), 1);
    let request = &completions[0];
    assert_eq!(request["model"], json!("llama-3.2-90b-vision-preview"));
    assert_eq!(request["response_format"]["type"], json!("json_object"));

    let roles: Vec<&str> = request["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .filter_map(|message| message["role"].as_str())
        .collect();
    assert_eq!(roles, vec!["system", "system", "user"]);
    assert_eq!(request["messages"][2]["content"], json!("Sopra Steria stage"));
    assert!(request["messages"][1]["content"]
        .as_str()
        .is_some_and(|content| content.contains("https://example.org/iaf")));
}

#[tokio::test]
async fn test_related_entities_are_matched_end_to_end() {
    let upstream = Upstream::start(&partners_completion()).await;
    let app = build_app(&test_config(&upstream));

    let (_, body) = post_chat(
        app,
        "/api/chat",
        json!({"message": "Sopra Steria stage", "language": "fr"}),
    )
    .await;

    let partners = body["relatedPartners"].as_array().expect("partners");
    assert!(partners
        .iter()
        .any(|partner| partner["name"]["fr"] == json!("Sopra Steria")));
    assert!(partners.iter().all(|partner| partner["type"] == json!("partner")));
}

#[tokio::test]
async fn test_search_failure_yields_fallback_without_completion() {
    let upstream =
        Upstream::start_with(&partners_completion(), StatusCode::INTERNAL_SERVER_ERROR).await;
    let app = build_app(&test_config(&upstream));

    let (status, body) = post_chat(
        app,
        "/api/chat",
        json!({"message": "Hello", "language": "en"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["confidence"], json!(0.0));
    assert_eq!(body["suggestedQuestions"].as_array().map(Vec::len), Some(3));
    assert!(upstream.completions().is_empty());
}

#[tokio::test]
async fn test_non_json_completion_yields_fallback() {
    let upstream = Upstream::start("not json").await;
    let app = build_app(&test_config(&upstream));

    let (status, body) = post_chat(
        app,
        "/api/chat",
        json!({"message": "Bonjour", "language": "fr"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("Désolé, je n'ai pas pu traiter votre demande. Veuillez réessayer.")
    );
}

#[tokio::test]
async fn test_search_results_can_be_echoed() {
    let upstream = Upstream::start(&partners_completion()).await;
    let config = AppConfig {
        expose_search_results: true,
        ..test_config(&upstream)
    };
    let app = build_app(&config);

    let (_, body) = post_chat(
        app,
        "/api/chat",
        json!({"message": "Bonjour", "language": "fr"}),
    )
    .await;

    assert_eq!(body["searchResults"][0]["url"], json!("https://example.org/iaf"));
}

#[tokio::test]
async fn test_transcript_over_http() {
    let upstream = Upstream::start(&partners_completion()).await;
    let server = spawn(build_app(&test_config(&upstream))).await;

    let transport = HttpTransport::new(&format!("{server}/api"));
    let mut transcript = Transcript::open(transport, Language::Fr).await;

    assert_eq!(transcript.messages().len(), 1);
    assert_eq!(transcript.messages()[0].text, "Voici nos partenaires...");

    let outcome = transcript
        .send("Quels sont vos partenaires ?")
        .await
        .expect("send");
    assert_eq!(outcome, SendOutcome::Answered);

    let messages = transcript.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].origin, Origin::User);
    assert_eq!(
        messages[2].suggested_questions.as_ref().map(Vec::len),
        Some(SUGGESTION_COUNT)
    );

    let completions = upstream.completions();
    let opening_prompt = completions[0]["messages"][0]["content"]
        .as_str()
        .expect("system prompt");
    assert!(opening_prompt.contains("Commence par un accueil chaleureux"));
    assert_eq!(completions[0]["messages"][2]["content"], json!("initialize chat"));
}

#[tokio::test]
async fn test_transcript_survives_failing_assistant() {
    let upstream = Upstream::start("not json").await;
    let server = spawn(build_app(&test_config(&upstream))).await;

    let mut transcript =
        Transcript::open(HttpTransport::new(&format!("{server}/api")), Language::En).await;
    assert_eq!(transcript.messages()[0].text, default_greeting(Language::En));

    let outcome = transcript.send("Hello").await.expect("send");
    assert_eq!(outcome, SendOutcome::Failed);
    assert_eq!(
        transcript.messages().last().map(|m| m.text.as_str()),
        Some("An error occurred. Please try again later.")
    );
    assert!(transcript.accepts_input());
}
