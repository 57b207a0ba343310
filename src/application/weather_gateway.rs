// Gateway trait for reaching the weather proxy from the dashboard
use crate::domain::resource::WeatherResource;
use crate::domain::subject::QuerySubject;
use crate::domain::units::UnitSystem;
use async_trait::async_trait;
use serde::Deserialize;

/// Raw HTTP reply from the proxy
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl GatewayResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-empty string `message` field of a JSON body, as the provider
    /// reports e.g. `{"cod":"404","message":"city not found"}`
    pub fn error_message(&self) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(&self.body).ok()?;
        match parsed.message? {
            serde_json::Value::String(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("weather service unreachable: {0}")]
    Transport(String),
}

#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Request one resource for a subject in the given unit system
    async fn fetch(
        &self,
        resource: WeatherResource,
        subject: &QuerySubject,
        units: UnitSystem,
    ) -> Result<GatewayResponse, GatewayError>;
}
