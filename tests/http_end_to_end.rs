use pricebot::ai::config::AiConfig;
use pricebot::ai::prompts::{CLASSIFIER_ROLE, FALLBACK_ROLE, SHOPPING_ROLE};
use pricebot::tests::util::sample_catalog;
use pricebot::{Catalog, ChatClient, Dispatcher};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

fn client_for(server: &MockServer) -> ChatClient {
    ChatClient::new(AiConfig {
        api_key: None,
        model: "test-model".into(),
        chat_url: format!("{}/v1/chat/completions", server.uri()),
        timeout_secs: Some(5),
    })
    .unwrap()
}

#[tokio::test]
async fn shopping_list_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(CLASSIFIER_ROLE))
        .respond_with(chat_reply(
            "<think>they list quantities</think>{\"type\":\"shopping_list\",\"explanation\":\"quantities\"}",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(SHOPPING_ROLE))
        .respond_with(chat_reply(
            "```json\n{\"items\":[{\"name\":\"milk\",\"quantity\":2,\"unit\":\"liters\"},{\"name\":\"onions\",\"quantity\":\"750\",\"unit\":\"g\"}],\"total\":148.75}\n```",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::new(client_for(&server), sample_catalog());
    let answer = dispatcher
        .answer("I want to buy 2 liters of milk and 750g onions")
        .await;

    assert!(answer.contains("| Onions | ₹25.00 per 1 kg | 750 g | ₹18.75 |"));
    assert!(answer.ends_with("**Total: ₹148.75**"));
}

#[tokio::test]
async fn server_errors_end_in_fallback_then_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(CLASSIFIER_ROLE))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains(FALLBACK_ROLE))
        .respond_with(chat_reply("Milk costs ₹65 per liter"))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::new(client_for(&server), sample_catalog());
    assert_eq!(
        dispatcher.answer("price of milk?").await,
        "Milk costs ₹65 per liter"
    );
}

#[tokio::test]
async fn fallback_uses_configured_currency_for_empty_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(CLASSIFIER_ROLE))
        .respond_with(chat_reply(r#"{"type":"unknown"}"#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains(FALLBACK_ROLE))
        .and(body_string_contains("Milk costs $65 per liter"))
        .respond_with(chat_reply("The catalog is empty."))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher =
        Dispatcher::new(client_for(&server), Catalog::default()).with_currency("USD");
    assert_eq!(
        dispatcher.answer("What do you sell?").await,
        "The catalog is empty."
    );
}

#[tokio::test]
async fn unreachable_model_yields_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::new(client_for(&server), sample_catalog());
    let answer = dispatcher.answer("price of milk?").await;
    assert!(answer.starts_with("Sorry, I couldn't answer that right now"));
}
