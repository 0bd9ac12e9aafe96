//! CORS handling that leaves plain `OPTIONS` requests to the routes.

use std::convert::Infallible;

use anyhow::Context;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use farmlive_config::CorsOrigins;
use tower::{Layer, ServiceExt};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Builds the CORS layer for the configured origins.
pub fn cors_layer(origins: &CorsOrigins) -> anyhow::Result<CorsLayer> {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => {
            let values = list
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {o:?}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            AllowOrigin::list(values)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// A browser preflight carries both `Origin` and `Access-Control-Request-Method`.
pub fn is_preflight(request: &Request) -> bool {
    let headers = request.headers();
    request.method() == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Middleware applying `cors` to everything except bare `OPTIONS` requests.
///
/// `CorsLayer` answers every `OPTIONS` itself, so non-preflight ones skip it
/// and reach the handler.
pub async fn apply(State(cors): State<CorsLayer>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS && !is_preflight(&request) {
        return next.run(request).await;
    }

    let result: Result<Response, Infallible> = cors.layer(next).oneshot(request).await;
    match result {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn options(headers: &[(&str, &str)]) -> Request {
        let mut builder = Request::builder().method(Method::OPTIONS).uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_preflight_needs_origin_and_request_method() {
        assert!(is_preflight(&options(&[
            ("origin", "https://farmlive.app"),
            ("access-control-request-method", "GET"),
        ])));
        assert!(!is_preflight(&options(&[])));
        assert!(!is_preflight(&options(&[("origin", "https://farmlive.app")])));
        assert!(!is_preflight(&options(&[("access-control-request-method", "GET")])));
    }

    #[test]
    fn test_get_is_never_preflight() {
        let request = Request::builder()
            .uri("/")
            .header("origin", "https://farmlive.app")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap();
        assert!(!is_preflight(&request));
    }
}
