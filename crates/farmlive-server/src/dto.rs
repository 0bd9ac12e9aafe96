use serde::Serialize;

use crate::HEALTH_PATH;

// === HTTP DTOs ===

/// Payload returned by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub endpoints: EndpointMap,
}

/// Public endpoints of the Disease Detection API, keyed by logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndpointMap {
    pub health: &'static str,
    pub predict: &'static str,
}

impl StatusResponse {
    pub const fn current() -> Self {
        Self {
            status: "API is running",
            message: "FarmLive Disease Detection API",
            endpoints: EndpointMap {
                health: HEALTH_PATH,
                predict: "/api/predict (POST with image)",
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PREDICT_PATH;

    #[test]
    fn test_status_response_serializes_in_field_order() {
        let body = serde_json::to_string(&StatusResponse::current()).unwrap();
        assert_eq!(
            body,
            r#"{"status":"API is running","message":"FarmLive Disease Detection API","endpoints":{"health":"/api/health","predict":"/api/predict (POST with image)"}}"#
        );
    }

    #[test]
    fn test_endpoint_map_matches_routes() {
        let endpoints = StatusResponse::current().endpoints;
        assert_eq!(endpoints.health, HEALTH_PATH);
        assert!(endpoints.predict.starts_with(PREDICT_PATH));
    }
}
