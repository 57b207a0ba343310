// Geolocation collaborator
use crate::domain::subject::Coordinates;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct GeolocationError {
    pub reason: String,
}

impl GeolocationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Reports a position known up front, e.g. given on the command line
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation {
    position: Coordinates,
}

impl FixedGeolocation {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.position)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocation;

#[async_trait]
impl GeolocationProvider for UnsupportedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::new(
            "Geolocation is not supported on this device.",
        ))
    }
}
