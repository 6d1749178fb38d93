use clockify_client::{Client, ClientError, Pagination};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Tag {
    name: String,
}

impl clockify_client::RequestBody for Tag {}

fn base(server: &MockServer) -> String {
    format!("{}/api/v1", server.uri())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_sends_key_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces"))
        .and(header("x-api-key", "secret"))
        .and(header("accept", "application/json"))
        .and(query_param("page", "1"))
        .and(query_param("page-size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![Tag {
            name: "rust".to_string(),
        }]))
        .expect(1)
        .mount(&server)
        .await;

    let base = base(&server);
    let tags = tokio::task::spawn_blocking(move || {
        let client = Client::new(&base, "secret").unwrap();
        let req = client
            .new_request_with(Method::GET, "workspaces", &Pagination::new(1, 5))
            .unwrap();
        let mut tags: Vec<Tag> = Vec::new();
        client.execute_into(req, &mut tags).unwrap();
        tags
    })
    .await
    .unwrap();

    assert_eq!(
        tags,
        vec![Tag {
            name: "rust".to_string()
        }]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workspaces/w1/tags"))
        .and(header("x-api-key", "secret"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"name": "rust"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"name": "rust"})))
        .expect(1)
        .mount(&server)
        .await;

    let base = base(&server);
    let (status, tag) = tokio::task::spawn_blocking(move || {
        let client = Client::new(&base, "secret").unwrap();
        let body = Tag {
            name: "rust".to_string(),
        };
        let req = client
            .new_request_with(Method::POST, "workspaces/w1/tags", &body)
            .unwrap();
        let mut tag = Tag {
            name: String::new(),
        };
        let response = client.execute_into(req, &mut tag).unwrap();
        (response.status, tag)
    })
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tag.name, "rust");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_statuses() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not here</html>"))
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/broken"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"message": "bad input", "code": 501})),
        )
        .mount(&server)
        .await;

    let base = base(&server);
    let (missing, broken) = tokio::task::spawn_blocking(move || {
        let client = Client::new(&base, "secret").unwrap();
        let missing = client
            .execute(client.new_request(Method::GET, "missing").unwrap())
            .unwrap_err();
        let broken = client
            .execute(client.new_request(Method::DELETE, "broken").unwrap())
            .unwrap_err();
        (missing, broken)
    })
    .await
    .unwrap();

    assert!(missing.is_not_found());
    let api = broken.api_error().unwrap();
    assert_eq!(api.message, "bad input");
    assert_eq!(api.code, 501);
    assert_eq!(broken.response().unwrap().status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_connection_failure_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = Client::new(&format!("http://127.0.0.1:{}/api/v1", port), "secret").unwrap();
    let err = client
        .execute(client.new_request(Method::GET, "user").unwrap())
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.location().is_none());
}
