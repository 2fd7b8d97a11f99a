//! The dispatch table from (method, path) to handler.

use axum::{
    routing::{any, delete, get, patch, post, put},
    Router,
};

use crate::handlers::{self, content, echo, gzip, status};

/// Build the routing table. Middleware is applied by the HTTP server.
pub fn build_routes() -> Router {
    Router::new()
        // Echo family
        .route("/get", get(echo::get))
        .route("/post", post(echo::with_body))
        .route("/put", put(echo::with_body))
        .route("/patch", patch(echo::with_body))
        .route("/delete", delete(echo::with_body))
        .route("/anything", any(echo::with_body))
        .route("/anything/{*path}", any(echo::with_body))
        .route("/headers", get(echo::headers))
        .route("/ip", get(echo::ip))
        .route("/user-agent", get(echo::user_agent))
        .route("/status/{code}", any(status::status))
        // Fixed content
        .route("/html", get(content::html))
        .route("/image/png", get(content::png))
        .route("/image/jpeg", get(content::jpeg))
        .route("/json", get(content::json))
        .route("/jsonp", get(content::jsonp))
        .route("/gzip", get(gzip::gzip))
        .fallback(handlers::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Literal paths that answer 200 to a plain request of their verb.
    const LITERAL_ROUTES: &[&str] = &[
        "/get",
        "/post",
        "/put",
        "/patch",
        "/delete",
        "/anything",
        "/headers",
        "/ip",
        "/user-agent",
        "/html",
        "/image/png",
        "/image/jpeg",
        "/json",
        "/jsonp",
        "/gzip",
    ];

    #[tokio::test]
    async fn test_every_literal_route_is_registered() {
        for path in LITERAL_ROUTES {
            let method = match *path {
                "/post" => "POST",
                "/put" => "PUT",
                "/patch" => "PATCH",
                "/delete" => "DELETE",
                _ => "GET",
            };
            let response = build_routes()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(*path)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{method} {path}");
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = build_routes()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"error":"not found"}"#);
    }
}
