use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer for the read-only catalog API.
///
/// - Origins: exactly `allowed_origins`
/// - Methods: GET, OPTIONS
/// - Headers: Content-Type, Authorization
/// - Credentials allowed, 1 hour max age
///
/// Fails when the list is empty or an origin is not a valid header value.
pub fn create_cors_layer(allowed_origins: &[String]) -> io::Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS origin '{}': {}", origin, e),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "At least one CORS origin is required",
        ));
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_configured_origins() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ];
        assert!(create_cors_layer(&origins).is_ok());
    }

    #[test]
    fn test_rejects_empty_origin_list() {
        let err = create_cors_layer(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_rejects_invalid_origin() {
        let err = create_cors_layer(&["http://bad\norigin".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"));
    }
}
