//! `GET /gzip`: a JSON echo delivered gzip-encoded.

use std::collections::BTreeMap;
use std::io::Write;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use flate2::{write::GzEncoder, Compression};
use serde::Serialize;

use crate::http::{HandlerError, RequestInfo};

#[derive(Debug, Serialize)]
struct GzipEcho {
    gzipped: bool,
    headers: BTreeMap<String, String>,
    method: String,
    origin: String,
}

/// Gzip-compress a buffer.
pub fn compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// `GET /gzip`
pub async fn gzip(info: RequestInfo) -> Result<Response, HandlerError> {
    let echo = GzipEcho {
        gzipped: true,
        headers: info.headers,
        method: info.method.to_string(),
        origin: info.origin,
    };
    let compressed = compress(&serde_json::to_vec(&echo)?)?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_ENCODING, HeaderValue::from_static("gzip")),
            (header::CONTENT_LENGTH, HeaderValue::from(compressed.len())),
        ],
        compressed,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::http::HttpServer;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tower::ServiceExt;

    #[test]
    fn test_compress_produces_gzip_stream() {
        let compressed = compress(b"{\"a\":1}").unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoded = String::new();
        GzDecoder::new(&compressed[..])
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_gzip_route() {
        let response = HttpServer::new(ServiceConfig::default())
            .router()
            .oneshot(Request::builder().uri("/gzip").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_reader(GzDecoder::new(&body[..])).unwrap();
        assert_eq!(json["gzipped"], true);
        assert_eq!(json["method"], "GET");
        assert!(json["headers"].is_object());
    }
}
