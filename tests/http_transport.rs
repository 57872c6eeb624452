use mockito::Matcher;
use serde_json::json;
use skygear_container::{Container, ContainerConfig, ContainerError, HttpTransport};
use std::net::TcpListener;

const SESSION: &str = r#"{"result": {"user_id": "user:id1", "access_token": "uuid1"}}"#;

fn container_for(server: &mockito::ServerGuard) -> Container {
    let config = ContainerConfig::default()
        .with_end_point(server.url())
        .with_api_key("correctApiKey");
    Container::from_config(config).unwrap()
}

#[tokio::test]
async fn signup_posts_json_with_api_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/signup")
        .match_header("x-skygear-api-key", "correctApiKey")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "action": "auth:signup",
            "user_id": "user@email.com",
            "email": "user@email.com",
            "password": "passwd",
        })))
        .with_header("content-type", "application/json")
        .with_body(SESSION)
        .create_async()
        .await;

    let container = container_for(&server);
    let token = container
        .signup_with_email("user@email.com", "user@email.com", "passwd")
        .await
        .unwrap();

    assert_eq!(token, "uuid1");
    mock.assert_async().await;
}

#[tokio::test]
async fn error_body_on_400_is_classified() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::PartialJson(json!({"user_id": "registered", "password": "wrong"})))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error": {"type": "AuthenticationError", "code": 102, "message": "invalid authentication information"}}"#,
        )
        .create_async()
        .await;

    let container = container_for(&server);
    let err = container.login("registered", "wrong").await.unwrap_err();

    let api_error = err.api_error().expect("backend error");
    assert_eq!(api_error.error_type, "AuthenticationError");
    assert_eq!(api_error.code, 102);
    assert_eq!(api_error.message, "invalid authentication information");
    mock.assert_async().await;
}

#[tokio::test]
async fn lambda_passes_args_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hello/args")
        .match_body(Matcher::PartialJson(json!({"args": ["hello", "world"]})))
        .with_body(r#"{"result": {"hello": ["hello", "world"]}}"#)
        .create_async()
        .await;

    let container = container_for(&server);
    let result = container
        .lambda("hello:args", Some(json!(["hello", "world"])))
        .await
        .unwrap();

    assert_eq!(result, json!({"hello": ["hello", "world"]}));
    mock.assert_async().await;
}

#[tokio::test]
async fn only_latest_api_key_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hello/world")
        .match_header("x-skygear-api-key", "newApiKey")
        .with_body(r#"{"result": {"hello": "world"}}"#)
        .expect(1)
        .create_async()
        .await;

    let mut container = container_for(&server);
    container.config_api_key("newApiKey").unwrap();
    let result = container.lambda("hello:world", None).await.unwrap();

    assert_eq!(result, json!({"hello": "world"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn no_api_key_header_before_configuration() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hello/world")
        .match_header("x-skygear-api-key", Matcher::Missing)
        .with_body(r#"{"result": {"hello": "world"}}"#)
        .create_async()
        .await;

    let container = Container::with_end_point(&server.url()).unwrap();
    container.lambda("hello:world", None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn shapeless_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/hello/world")
        .with_body(r#"{"hello": "world"}"#)
        .create_async()
        .await;

    let container = container_for(&server);
    let err = container.lambda("hello:world", None).await.unwrap_err();

    assert!(matches!(err, ContainerError::MalformedResponse { .. }));
}

#[tokio::test]
async fn non_json_error_page_is_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/hello/world")
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let container = container_for(&server);
    let err = container.lambda("hello:world", None).await.unwrap_err();

    match err {
        ContainerError::HttpError { status, body, url } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "Service Unavailable");
            assert!(url.unwrap().ends_with("/hello/world"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_network_issue() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let end_point = format!("http://127.0.0.1:{port}/");
    let container = Container::with_transport(&end_point, HttpTransport::new().unwrap()).unwrap();
    let err = container.lambda("hello:world", None).await.unwrap_err();

    assert!(matches!(err, ContainerError::NetworkIssue(_)));
}
