use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Path, Request},
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

/// Description of a received request, returned by the echo routes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/status/{code}", any(status))
        .route("/empty", any(empty))
        .route("/text", any(text))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(request: Request) -> Result<Json<Echo>, StatusCode> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let echo = describe(&parts.method, &parts.uri, &parts.headers, &body);
    info!(method = %echo.method, path = %echo.path, "echoing request");
    Ok(Json(echo))
}

fn describe(method: &Method, uri: &axum::http::Uri, headers: &HeaderMap, body: &Bytes) -> Echo {
    Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(serde_json::json!({ "status": code }))))
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn text() -> impl IntoResponse {
    "plain text, not json"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_collects_request_parts() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "secret".parse().unwrap());
        let uri: axum::http::Uri = "/echo/users?a=1&a=2".parse().unwrap();

        let echo = describe(&Method::POST, &uri, &headers, &Bytes::from_static(b"{}"));

        assert_eq!(echo.method, "POST");
        assert_eq!(echo.path, "/echo/users");
        assert_eq!(echo.query.as_deref(), Some("a=1&a=2"));
        assert_eq!(echo.headers["x-api-key"], "secret");
        assert_eq!(echo.body, "{}");
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let echo = Echo {
            method: "GET".to_string(),
            path: "/echo".to_string(),
            query: None,
            headers: BTreeMap::new(),
            body: String::new(),
        };
        let json = serde_json::to_string(&echo).unwrap();
        let back: Echo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, echo);
    }
}
