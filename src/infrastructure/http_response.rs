// HTTP response utilities for the proxy endpoints
use crate::application::proxy_service::ProxyError;
use crate::application::weather_provider::ProviderReply;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameters
            | Self::InvalidCoordinates
            | Self::InvalidUnits
            | Self::MalformedQuery => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

/// Relay the provider's status and JSON body unchanged
pub fn relay_reply(reply: ProviderReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or_else(|_| {
        tracing::warn!(status = reply.status, "Provider returned an invalid status code");
        StatusCode::BAD_GATEWAY
    });

    (status, Json(reply.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::WeatherResource;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ProxyError::MissingParameters.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::InvalidUnits.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::MalformedQuery.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::Upstream(WeatherResource::CurrentWeather).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_relay_keeps_upstream_status() {
        let response = relay_reply(ProviderReply {
            status: 404,
            body: json!({ "cod": "404", "message": "city not found" }),
        });
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
