//! Integration tests for the REST client against a mocked backend.

use caffeine_core::{ApiError, CaffeineApi, CoreError, NewCaffeineLog, ValidationError};
use mockito::Matcher;

const LOG_JSON: &str = r#"{
    "id": "0b6c1f7e-54a2-4c1e-9a3f-3f1d2a7c9e10",
    "user": 1,
    "beverage_name": "Espresso",
    "serving_size": "1 shot",
    "caffeine_mg": 63,
    "total_fat_g": null,
    "sodium_mg": null,
    "total_carbohydrates_g": null,
    "sugars_g": null,
    "added_sugars_g": null,
    "protein_g": null,
    "taurine_mg": null,
    "calories_kcal": 1,
    "b_vitamins": null,
    "other_ingredients": null,
    "image_url": null,
    "additional_notes": null,
    "confirmed": true,
    "created_at": "2025-03-10T08:05:00Z"
}"#;

#[tokio::test]
async fn test_fetch_intake_history_sends_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/caffeine/caffeine-over-time/")
        .match_header("authorization", "Token abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"date": "2025-03-10T08:00:00Z", "caffeine_mg": 95},
                {"date": "2025-03-10T13:00:00Z", "caffeine_mg": 40}]"#,
        )
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), Some("abc123".into())).unwrap();
    let events = api.fetch_intake_history().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[1].amount_mg, 40.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_without_token_omits_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/caffeine/caffeine-over-time/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), None).unwrap();
    assert!(api.fetch_intake_history().await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_rejects_negative_amounts() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/caffeine/caffeine-over-time/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"date": "2025-03-10T08:00:00Z", "caffeine_mg": -10}]"#)
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), None).unwrap();
    let err = api.fetch_intake_history().await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::InvalidAmount { index: 0, .. })
    ));
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/caffeine/logs")
        .with_status(401)
        .with_body(r#"{"detail": "Invalid token."}"#)
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), Some("stale".into())).unwrap();
    let err = api.fetch_logs().await.unwrap_err();
    match err {
        CoreError::Api(ApiError::Status { status, url }) => {
            assert_eq!(status, 401);
            assert!(url.ends_with("/api/caffeine/logs"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fetch_logs() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/caffeine/logs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("[{LOG_JSON}]"))
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), Some("abc123".into())).unwrap();
    let logs = api.fetch_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].display_name(), "Espresso");
    assert_eq!(logs[0].intake_event().amount_mg, 63.0);
}

#[tokio::test]
async fn test_create_log_posts_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/caffeine/logs/create/")
        .match_header("authorization", "Token abc123")
        .match_body(Matcher::PartialJsonString(
            r#"{"caffeine_mg": 63.0, "beverage_name": "Espresso"}"#.to_string(),
        ))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(LOG_JSON)
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), Some("abc123".into())).unwrap();
    let created = api
        .create_log(&NewCaffeineLog::new(63.0).with_beverage_name("Espresso"))
        .await
        .unwrap();
    assert!(created.confirmed);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_log_requires_token() {
    let api = CaffeineApi::new("http://127.0.0.1:9", None).unwrap();
    let err = api.create_log(&NewCaffeineLog::new(50.0)).await.unwrap_err();
    assert!(matches!(err, CoreError::Api(ApiError::NotAuthenticated)));
}

#[tokio::test]
async fn test_create_log_validates_amount() {
    let api = CaffeineApi::new("http://127.0.0.1:9", Some("abc123".into())).unwrap();
    let err = api.create_log(&NewCaffeineLog::new(-1.0)).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[tokio::test]
async fn test_chat_returns_assistant_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/ai/chat/")
        .match_header("authorization", "Token abc123")
        .match_body(Matcher::Json(
            serde_json::json!({"message": "Is a second coffee ok?"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response": "You are at 95 mg today, so yes."}"#)
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), Some("abc123".into())).unwrap();
    let reply = api.chat("  Is a second coffee ok? ").await.unwrap();
    assert_eq!(reply, "You are at 95 mg today, so yes.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_without_response_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/ai/chat/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), Some("abc123".into())).unwrap();
    assert_eq!(api.chat("hello").await.unwrap(), caffeine_core::api::NO_RESPONSE);
}

#[tokio::test]
async fn test_chat_reports_server_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/ai/chat/")
        .with_status(500)
        .with_body(r#"{"error": "upstream failed"}"#)
        .create_async()
        .await;

    let api = CaffeineApi::new(&server.url(), Some("abc123".into())).unwrap();
    let err = api.chat("hello").await.unwrap_err();
    assert!(matches!(err, CoreError::Api(ApiError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_chat_rejects_empty_message_and_missing_token() {
    let api = CaffeineApi::new("http://127.0.0.1:9", Some("abc123".into())).unwrap();
    let err = api.chat("   ").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::InvalidValue { .. })
    ));

    let anonymous = CaffeineApi::new("http://127.0.0.1:9", None).unwrap();
    let err = anonymous.chat("hello").await.unwrap_err();
    assert!(matches!(err, CoreError::Api(ApiError::NotAuthenticated)));
}
