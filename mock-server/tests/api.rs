use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_path_and_query() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo/search?a=1&a=2")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo/search");
    assert_eq!(echo.query.as_deref(), Some("a=1&a=2"));
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_reports_headers_and_body() {
    let resp = app()
        .oneshot(json_request("PATCH", "/echo", r#"{"name":"morpheus"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.query, None);
    assert_eq!(echo.headers["content-type"], "application/json");
    assert_eq!(echo.body, r#"{"name":"morpheus"}"#);
}

#[tokio::test]
async fn echo_accepts_delete() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/echo/users/2")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "DELETE");
    assert_eq!(echo.path, "/echo/users/2");
}

// --- status ---

#[tokio::test]
async fn status_route_returns_requested_code() {
    let resp = app()
        .oneshot(json_request("POST", "/status/400", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/status/teapot")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- empty / text ---

#[tokio::test]
async fn empty_returns_204_without_body() {
    let resp = app()
        .oneshot(Request::builder().uri("/empty").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn text_returns_plain_body() {
    let resp = app()
        .oneshot(Request::builder().uri("/text").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app()
        .oneshot(Request::builder().uri("/nope").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
