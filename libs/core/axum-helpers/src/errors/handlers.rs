use axum::{http::StatusCode, http::Uri, response::Response};

use super::error_response;

/// Fallback for unmatched routes: 404 envelope naming the requested path.
pub async fn not_found(uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    tracing::debug!(%target, "No route matched");
    error_response(StatusCode::NOT_FOUND, format!("Route {} not found", target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_not_found_names_route() {
        let response = not_found(Uri::from_static("/api/orders?page=2")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Route /api/orders?page=2 not found");
    }
}
