// Proxy service - Validates locator parameters and forwards upstream
use crate::application::weather_provider::{ProviderReply, WeatherProvider};
use crate::domain::resource::WeatherResource;
use crate::domain::subject::QuerySubject;
use crate::domain::units::UnitSystem;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing required parameters")]
    MissingParameters,
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("Invalid units parameter")]
    InvalidUnits,
    #[error("Invalid query parameters")]
    MalformedQuery,
    #[error("{}", .0.failure_message())]
    Upstream(WeatherResource),
}

/// Query string accepted by `/api/weather` and `/api/forecast`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyRequest {
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub units: Option<String>,
}

impl ProxyRequest {
    /// A non-empty `q` wins; otherwise both `lat` and `lon` are required.
    pub fn resolve(&self) -> Result<(QuerySubject, UnitSystem), ProxyError> {
        let units = match non_empty(&self.units) {
            Some(raw) => raw.parse().map_err(|_| ProxyError::InvalidUnits)?,
            None => UnitSystem::default(),
        };

        if let Some(place) = non_empty(&self.q) {
            return Ok((QuerySubject::Place(place.to_string()), units));
        }

        match (non_empty(&self.lat), non_empty(&self.lon)) {
            (Some(lat), Some(lon)) => {
                let latitude = parse_degrees(lat, 90.0)?;
                let longitude = parse_degrees(lon, 180.0)?;
                Ok((QuerySubject::coordinates(latitude, longitude), units))
            }
            _ => Err(ProxyError::MissingParameters),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_degrees(raw: &str, limit: f64) -> Result<f64, ProxyError> {
    let value: f64 = raw.parse().map_err(|_| ProxyError::InvalidCoordinates)?;
    if value.is_finite() && value.abs() <= limit {
        Ok(value)
    } else {
        Err(ProxyError::InvalidCoordinates)
    }
}

#[derive(Clone)]
pub struct ProxyService {
    provider: Arc<dyn WeatherProvider>,
}

impl ProxyService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Validate the request before contacting upstream; never retries.
    pub async fn forward(
        &self,
        resource: WeatherResource,
        request: &ProxyRequest,
    ) -> Result<ProviderReply, ProxyError> {
        let (subject, units) = request.resolve()?;
        tracing::debug!(resource = resource.path(), %subject, %units, "Forwarding to provider");

        self.provider
            .fetch(resource, &subject, units)
            .await
            .map_err(|err| {
                tracing::error!(resource = resource.path(), error = ?err, "Upstream request failed");
                ProxyError::Upstream(resource)
            })
    }
}
