use pricebot::ai::config::AiConfig;
use pricebot::{classify, AiError, ChatClient, Intent};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> ChatClient {
    ChatClient::new(AiConfig {
        api_key: api_key.map(str::to_string),
        model: "test-model".into(),
        chat_url: format!("{}/v1/chat/completions", server.uri()),
        timeout_secs: Some(5),
    })
    .unwrap()
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "content": content } }]
    }))
}

#[tokio::test]
async fn price_question_classified_as_price_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer k"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "temperature": 0,
            "response_format": { "type": "json_object" }
        })))
        .respond_with(chat_reply(
            r#"{"type":"price_query","explanation":"asks for the price of milk"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("k"));
    let result = classify(&client, "What is the price of milk?").await.unwrap();
    assert_eq!(result.intent, Intent::PriceQuery);
    assert_eq!(result.explanation, "asks for the price of milk");
    server.verify().await;
}

#[tokio::test]
async fn reasoning_block_and_fence_are_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_reply(
            "<think>The user lists {quantities}.</think>\n```json\n{\"type\": \"shopping_list\"}\n```",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let result = classify(&client, "2kg rice and 3 packets of bread").await.unwrap();
    assert_eq!(result.intent, Intent::ShoppingList);
    assert_eq!(result.explanation, "");
}

#[tokio::test]
async fn unrecognized_or_missing_type_is_unknown() {
    for content in [
        r#"{"type":"budget_query","explanation":"x"}"#,
        r#"{"explanation":"no type"}"#,
        r#"{"type":42}"#,
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(chat_reply(content))
            .mount(&server)
            .await;
        let client = client_for(&server, None);
        let result = classify(&client, "If I have ₹500, how many kg of potatoes?")
            .await
            .unwrap();
        assert_eq!(result.intent, Intent::Unknown, "reply: {content}");
    }
}

#[tokio::test]
async fn unparsable_reply_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_reply("I think this is a price query."))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = classify(&client, "price of milk").await.unwrap_err();
    assert!(matches!(err, AiError::Malformed(_)));
}

#[tokio::test]
async fn api_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = classify(&client, "price of milk").await.unwrap_err();
    match err {
        AiError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model loading");
        }
        other => panic!("unexpected error: {other}"),
    }
}
