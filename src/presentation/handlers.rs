// HTTP request handlers
use crate::application::proxy_service::{ProxyError, ProxyRequest};
use crate::domain::resource::WeatherResource;
use crate::infrastructure::http_response::relay_reply;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

type ProxyQuery = Result<Query<ProxyRequest>, QueryRejection>;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current weather for `q` or `lat`/`lon`
pub async fn current_weather(query: ProxyQuery, State(state): State<Arc<AppState>>) -> Response {
    forward(&state, WeatherResource::CurrentWeather, query).await
}

/// 5-day / 3-hour forecast for `q` or `lat`/`lon`
pub async fn forecast(query: ProxyQuery, State(state): State<Arc<AppState>>) -> Response {
    forward(&state, WeatherResource::Forecast, query).await
}

async fn forward(state: &AppState, resource: WeatherResource, query: ProxyQuery) -> Response {
    let request = match query {
        Ok(Query(request)) => request,
        Err(rejection) => {
            tracing::info!(resource = resource.path(), error = %rejection, "Undecodable query string");
            return ProxyError::MalformedQuery.into_response();
        }
    };

    match state.proxy_service.forward(resource, &request).await {
        Ok(reply) => relay_reply(reply),
        Err(e) => {
            tracing::info!(resource = resource.path(), error = %e, "Rejected proxy request");
            e.into_response()
        }
    }
}
