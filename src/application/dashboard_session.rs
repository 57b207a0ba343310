// Dashboard session - Orchestrates paired weather/forecast fetches
use crate::application::geolocation::GeolocationProvider;
use crate::application::session_state::{PresentationState, WeatherReport};
use crate::application::weather_gateway::{GatewayError, GatewayResponse, WeatherGateway};
use crate::domain::forecast::{reduce_forecast, LocalZone};
use crate::domain::resource::WeatherResource;
use crate::domain::subject::{Coordinates, QuerySubject};
use crate::domain::units::UnitSystem;
use crate::domain::weather::{CurrentConditions, ForecastPayload, PayloadError};
use futures::future::join;
use std::sync::Arc;

const EMPTY_SUBJECT_MESSAGE: &str = "Please enter a city name.";
const LOADING_MESSAGE: &str = "Loading weather data...";
const LOCATING_MESSAGE: &str = "Getting your location...";
const CITY_NOT_FOUND_MESSAGE: &str = "City not found. Please check the city name.";
const LOCATION_FAILURE_MESSAGE: &str = "Unable to fetch weather data for your location.";
const UNREACHABLE_MESSAGE: &str = "Unable to reach the weather service.";
const PARSE_FAILURE_MESSAGE: &str = "Unexpected response from the weather service.";

type FetchResult = Result<GatewayResponse, GatewayError>;

/// Failures surfaced to the user as a status message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Geolocation(String),
    #[error("{0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(WeatherReport),
    Failure(DashboardError),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Owns the dashboard's unit, last subject and status, and drives every
/// query cycle through the gateway. Each cycle requests current weather and
/// forecast together and only succeeds when both do.
pub struct DashboardSession {
    gateway: Arc<dyn WeatherGateway>,
    geolocation: Arc<dyn GeolocationProvider>,
    zone: LocalZone,
    state: PresentationState,
}

impl DashboardSession {
    pub fn new(
        gateway: Arc<dyn WeatherGateway>,
        geolocation: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self {
            gateway,
            geolocation,
            zone: LocalZone::default(),
            state: PresentationState::default(),
        }
    }

    pub fn with_zone(mut self, zone: LocalZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_unit(mut self, unit: UnitSystem) -> Self {
        self.state.set_unit(unit);
        self
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Search by place name. Blank input fails without touching the network.
    pub async fn query_by_subject(&mut self, input: &str) -> RequestOutcome {
        let Some(subject) = QuerySubject::place(input) else {
            return self.fail(DashboardError::Validation(EMPTY_SUBJECT_MESSAGE.to_string()));
        };

        let units = self.state.unit();
        self.state.begin(LOADING_MESSAGE);
        tracing::info!(%subject, %units, "Querying weather by place");

        let (current, forecast) = self.fetch_pair(&subject, units).await;
        let report = check_subject_replies(current, forecast)
            .and_then(|(current, forecast)| self.build_report(&current, &forecast, units));

        match report {
            Ok(report) => {
                let message = format!(
                    "Weather data for {}, {}",
                    report.current.place_name, report.current.country
                );
                self.succeed(report, message, Some(subject.to_string()))
            }
            Err(err) => self.fail(err),
        }
    }

    /// Look up weather at a position. The resolved place name, not the
    /// coordinates, becomes the last subject.
    pub async fn query_by_coordinates(&mut self, coordinates: Coordinates) -> RequestOutcome {
        let subject = QuerySubject::Coordinates(coordinates);
        let units = self.state.unit();
        self.state.begin(LOADING_MESSAGE);
        tracing::info!(%coordinates, %units, "Querying weather by coordinates");

        let (current, forecast) = self.fetch_pair(&subject, units).await;
        let report = check_coordinate_replies(current, forecast)
            .and_then(|(current, forecast)| self.build_report(&current, &forecast, units));

        match report {
            Ok(report) => {
                let message = format!(
                    "Weather data for your location: {}, {}",
                    report.current.place_name, report.current.country
                );
                let resolved = Some(report.current.place_name.clone()).filter(|n| !n.is_empty());
                self.succeed(report, message, resolved)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Switch units and re-run the last successful place query, if any.
    /// Returns `None` when nothing was re-queried.
    pub async fn set_unit(&mut self, unit: UnitSystem) -> Option<RequestOutcome> {
        self.state.set_unit(unit);
        let subject = self.state.last_subject()?.to_string();
        tracing::debug!(%unit, %subject, "Unit changed, re-querying");
        Some(self.query_by_subject(&subject).await)
    }

    pub async fn request_geolocation(&mut self) -> RequestOutcome {
        self.state.begin(LOCATING_MESSAGE);

        match self.geolocation.current_position().await {
            Ok(position) => self.query_by_coordinates(position).await,
            Err(err) => self.fail(DashboardError::Geolocation(format!(
                "Unable to retrieve your location. {}",
                err.reason
            ))),
        }
    }

    async fn fetch_pair(
        &self,
        subject: &QuerySubject,
        units: UnitSystem,
    ) -> (FetchResult, FetchResult) {
        join(
            self.gateway.fetch(WeatherResource::CurrentWeather, subject, units),
            self.gateway.fetch(WeatherResource::Forecast, subject, units),
        )
        .await
    }

    fn build_report(
        &self,
        current: &GatewayResponse,
        forecast: &GatewayResponse,
        units: UnitSystem,
    ) -> Result<WeatherReport, DashboardError> {
        let current = CurrentConditions::parse(&current.body).map_err(parse_failure)?;
        let samples = ForecastPayload::parse(&forecast.body)
            .and_then(ForecastPayload::into_samples)
            .map_err(parse_failure)?;
        let daily = reduce_forecast(&samples, self.zone);

        tracing::debug!(
            samples = samples.len(),
            days = daily.len(),
            "Reduced forecast"
        );

        Ok(WeatherReport {
            current,
            daily,
            units,
        })
    }

    fn succeed(
        &mut self,
        report: WeatherReport,
        message: String,
        subject: Option<String>,
    ) -> RequestOutcome {
        self.state.succeed(report.clone(), message, subject);
        RequestOutcome::Success(report)
    }

    fn fail(&mut self, err: DashboardError) -> RequestOutcome {
        tracing::warn!(error = %err, "Weather query failed");
        self.state.fail(err.to_string());
        RequestOutcome::Failure(err)
    }
}

/// Either reply failing fails the cycle. The message comes from the
/// current-weather body only, even when the forecast is what failed.
fn check_subject_replies(
    current: FetchResult,
    forecast: FetchResult,
) -> Result<(GatewayResponse, GatewayResponse), DashboardError> {
    let (current, forecast) = match (current, forecast) {
        (Ok(current), Ok(forecast)) => (current, forecast),
        (Err(err), _) | (_, Err(err)) => {
            tracing::warn!(error = %err, "Proxy request did not complete");
            return Err(DashboardError::Upstream(UNREACHABLE_MESSAGE.to_string()));
        }
    };

    if !current.is_success() || !forecast.is_success() {
        let message = current
            .error_message()
            .unwrap_or_else(|| CITY_NOT_FOUND_MESSAGE.to_string());
        return Err(DashboardError::Upstream(message));
    }

    Ok((current, forecast))
}

fn check_coordinate_replies(
    current: FetchResult,
    forecast: FetchResult,
) -> Result<(GatewayResponse, GatewayResponse), DashboardError> {
    match (current, forecast) {
        (Ok(current), Ok(forecast)) if current.is_success() && forecast.is_success() => {
            Ok((current, forecast))
        }
        _ => Err(DashboardError::Upstream(LOCATION_FAILURE_MESSAGE.to_string())),
    }
}

fn parse_failure(err: PayloadError) -> DashboardError {
    tracing::warn!(error = %err, "Could not parse weather payload");
    DashboardError::Parse(PARSE_FAILURE_MESSAGE.to_string())
}
