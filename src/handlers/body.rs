//! Request body interpretation for the echo routes.
//!
//! The body is read according to its `content-type`:
//! - `multipart/form-data`: text parts go to `form`, file parts to `files`
//! - `application/x-www-form-urlencoded`: pairs go to `form`
//! - anything else: raw text goes to `data`, and to `json` when it parses
//!
//! Malformed multipart input ends parsing early; what was read is kept.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::HandlerError;

/// The body half of an echo response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BodyEcho {
    pub data: String,
    pub files: BTreeMap<String, String>,
    pub form: BTreeMap<String, String>,
    pub json: Option<Value>,
}

/// Read and interpret the request body.
pub async fn read_body(request: Request) -> Result<BodyEcho, HandlerError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        return Ok(read_multipart(request).await);
    }

    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX).await?;
    if content_type.starts_with("application/x-www-form-urlencoded") {
        Ok(BodyEcho {
            form: parse_urlencoded(&bytes),
            ..BodyEcho::default()
        })
    } else {
        Ok(raw_body(&bytes))
    }
}

/// Decode `application/x-www-form-urlencoded` pairs; a repeated key keeps its last value.
pub fn parse_urlencoded(bytes: &[u8]) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(bytes).into_owned().collect()
}

fn raw_body(bytes: &Bytes) -> BodyEcho {
    BodyEcho {
        data: String::from_utf8_lossy(bytes).into_owned(),
        json: serde_json::from_slice(bytes).ok(),
        ..BodyEcho::default()
    }
}

async fn read_multipart(request: Request) -> BodyEcho {
    let mut echo = BodyEcho::default();

    let mut multipart = match Multipart::from_request(request, &()).await {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed multipart request");
            return echo;
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Stopped reading multipart body");
                break;
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let is_file = field.file_name().is_some();

        match field.bytes().await {
            Ok(bytes) => {
                let value = String::from_utf8_lossy(&bytes).into_owned();
                if is_file {
                    echo.files.insert(name, value);
                } else {
                    echo.form.insert(name, value);
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, field = %name, "Dropped unreadable multipart field");
                break;
            }
        }
    }

    echo
}
