// Provider trait for the upstream weather service behind the proxy
use crate::domain::resource::WeatherResource;
use crate::domain::subject::QuerySubject;
use crate::domain::units::UnitSystem;
use async_trait::async_trait;

/// Upstream status and JSON body, relayed verbatim by the proxy
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub status: u16,
    pub body: serde_json::Value,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Forward one request upstream, credential included. Network failures
    /// and unreadable bodies are errors; non-success statuses are not.
    async fn fetch(
        &self,
        resource: WeatherResource,
        subject: &QuerySubject,
        units: UnitSystem,
    ) -> anyhow::Result<ProviderReply>;
}
