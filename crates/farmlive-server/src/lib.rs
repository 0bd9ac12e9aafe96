//! HTTP status server for the FarmLive Disease Detection API.

pub mod cors;
pub mod dto;
pub mod error;
pub mod handlers;

use std::future::Future;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware;
use axum::routing::any;
use axum::Router;
use farmlive_config::ServerConfig;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const HEALTH_PATH: &str = "/api/health";
pub const PREDICT_PATH: &str = "/api/predict";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assembles the router with CORS, request ids and request tracing.
///
/// Fails only when a configured CORS origin is not a valid header value.
pub fn build_router(config: &ServerConfig) -> anyhow::Result<Router> {
    let cors = cors::cors_layer(&config.cors_origins)?;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let request_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
                request_id = %request_id,
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let app = Router::new()
        .route(HEALTH_PATH, any(handlers::health))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(cors, cors::apply))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    Ok(app)
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_router_with_default_config() {
        assert!(build_router(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_build_router_rejects_bad_origin() {
        use farmlive_config::CorsOrigins;

        let config = ServerConfig {
            cors_origins: CorsOrigins::List(vec!["https://ok.test".into(), "bad\norigin".into()]),
            ..ServerConfig::default()
        };
        let err = build_router(&config).unwrap_err();
        assert!(err.to_string().contains("invalid CORS origin"));
    }
}
