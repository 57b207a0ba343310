// OpenWeather provider implementation
use crate::application::weather_provider::{ProviderReply, WeatherProvider};
use crate::domain::resource::WeatherResource;
use crate::domain::subject::QuerySubject;
use crate::domain::units::UnitSystem;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }

    fn resource_url(&self, resource: WeatherResource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(
        &self,
        resource: WeatherResource,
        subject: &QuerySubject,
        units: UnitSystem,
    ) -> Result<ProviderReply> {
        let mut query: Vec<(&str, String)> = vec![
            ("appid", self.api_key.clone()),
            ("units", units.as_str().to_string()),
        ];
        query.extend(subject.query_pairs());

        let response = self
            .http
            .get(self.resource_url(resource))
            .query(&query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({})", resource.path()))?;

        let status = response.status();
        let body = response
            .json::<serde_json::Value>()
            .await
            .with_context(|| format!("Failed to parse OpenWeather {} response", resource.path()))?;

        tracing::debug!(
            resource = resource.path(),
            status = status.as_u16(),
            "OpenWeather responded"
        );

        Ok(ProviderReply {
            status: status.as_u16(),
            body,
        })
    }
}
