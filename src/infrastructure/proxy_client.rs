// HTTP gateway from the dashboard to the weather proxy
use crate::application::weather_gateway::{GatewayError, GatewayResponse, WeatherGateway};
use crate::domain::resource::WeatherResource;
use crate::domain::subject::QuerySubject;
use crate::domain::units::UnitSystem;
use anyhow::Context;
use async_trait::async_trait;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

#[derive(Debug, Clone)]
pub struct ProxyClient {
    api_base: String,
    http: reqwest::Client,
}

impl ProxyClient {
    pub fn new(api_base: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client for the weather proxy")?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// e.g. `{api_base}/weather?q=New%20York&units=metric`
    pub fn endpoint_url(
        &self,
        resource: WeatherResource,
        subject: &QuerySubject,
        units: UnitSystem,
    ) -> String {
        let locator: Vec<String> = subject
            .query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(&value)))
            .collect();

        format!(
            "{}/{}?{}&units={}",
            self.api_base,
            resource.path(),
            locator.join("&"),
            units
        )
    }
}

#[async_trait]
impl WeatherGateway for ProxyClient {
    async fn fetch(
        &self,
        resource: WeatherResource,
        subject: &QuerySubject,
        units: UnitSystem,
    ) -> Result<GatewayResponse, GatewayError> {
        let url = self.endpoint_url(resource, subject, units);
        tracing::debug!(%url, "Requesting from proxy");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Ok(GatewayResponse::new(status, body))
    }
}
