//! Echo handlers: reflect the request back as JSON.

use std::collections::BTreeMap;

use axum::{extract::Request, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::handlers::body::{read_body, BodyEcho};
use crate::http::{HandlerError, RequestInfo};

/// JSON body returned by the echo routes.
#[derive(Debug, Clone, Serialize)]
pub struct EchoResponse {
    pub args: BTreeMap<String, String>,
    #[serde(flatten)]
    pub body: Option<BodyEcho>,
    pub headers: BTreeMap<String, String>,
    pub method: String,
    pub origin: String,
    pub url: String,
}

impl EchoResponse {
    pub fn new(info: RequestInfo, body: Option<BodyEcho>) -> Self {
        Self {
            args: info.args,
            body,
            headers: info.headers,
            method: info.method.to_string(),
            origin: info.origin,
            url: info.url,
        }
    }
}

fn log_echo(info: &RequestInfo) {
    tracing::debug!(
        request_id = info.request_id.as_deref().unwrap_or("unknown"),
        method = %info.method,
        path = %info.path,
        "Echoing request"
    );
}

/// `GET /get`
pub async fn get(info: RequestInfo) -> Json<EchoResponse> {
    log_echo(&info);
    Json(EchoResponse::new(info, None))
}

/// `POST /post`, `PUT /put`, `PATCH /patch`, `DELETE /delete` and `/anything`.
pub async fn with_body(
    info: RequestInfo,
    request: Request,
) -> Result<Json<EchoResponse>, HandlerError> {
    log_echo(&info);
    let body = read_body(request).await?;
    Ok(Json(EchoResponse::new(info, Some(body))))
}

/// `GET /headers`
pub async fn headers(info: RequestInfo) -> Json<Value> {
    Json(json!({ "headers": info.headers }))
}

/// `GET /ip`
pub async fn ip(info: RequestInfo) -> Json<Value> {
    Json(json!({ "origin": info.origin }))
}

/// `GET /user-agent`
pub async fn user_agent(info: RequestInfo) -> Json<Value> {
    let agent = info.header("user-agent").unwrap_or_default();
    Json(json!({ "user-agent": agent }))
}
