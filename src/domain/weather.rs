// Upstream payload schemas and the current-conditions model
use serde::Deserialize;

use super::forecast::RawForecastSample;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("malformed weather payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("weather payload has no condition entry")]
    MissingCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionPayload {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindPayload {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SysPayload {
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMainPayload {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
}

/// Body of the `weather` resource
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: String,
    pub sys: SysPayload,
    pub main: CurrentMainPayload,
    pub weather: Vec<ConditionPayload>,
    pub wind: WindPayload,
    #[serde(default)]
    pub visibility: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastMainPayload {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntryPayload {
    pub dt: i64,
    pub main: ForecastMainPayload,
    pub weather: Vec<ConditionPayload>,
    pub wind: WindPayload,
}

/// Body of the `forecast` resource (5 days in 3-hour steps)
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastEntryPayload>,
}

impl ForecastPayload {
    pub fn parse(body: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn into_samples(self) -> Result<Vec<RawForecastSample>, PayloadError> {
        self.list
            .into_iter()
            .map(|entry| {
                let condition = entry
                    .weather
                    .into_iter()
                    .next()
                    .ok_or(PayloadError::MissingCondition)?;
                Ok(RawForecastSample {
                    timestamp: entry.dt,
                    temperature: entry.main.temp,
                    humidity: entry.main.humidity,
                    wind_speed: entry.wind.speed,
                    description: condition.description,
                    icon: condition.icon,
                })
            })
            .collect()
    }
}

/// Validated current weather for a resolved place
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub place_name: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub visibility_m: Option<u32>,
    pub description: String,
    pub icon: String,
}

impl CurrentConditions {
    pub fn parse(body: &str) -> Result<Self, PayloadError> {
        let payload: CurrentWeatherPayload = serde_json::from_str(body)?;
        Self::try_from(payload)
    }

    pub fn rounded_temperature(&self) -> i64 {
        self.temperature.round() as i64
    }

    pub fn rounded_feels_like(&self) -> i64 {
        self.feels_like.round() as i64
    }

    /// Visibility in kilometres with one decimal, if the provider reported it
    pub fn visibility_km(&self) -> Option<String> {
        self.visibility_m
            .map(|metres| format!("{:.1}", f64::from(metres) / 1000.0))
    }

    pub fn icon_url(&self, scale: u8) -> String {
        icon_url(&self.icon, scale)
    }
}

impl TryFrom<CurrentWeatherPayload> for CurrentConditions {
    type Error = PayloadError;

    fn try_from(payload: CurrentWeatherPayload) -> Result<Self, Self::Error> {
        let condition = payload
            .weather
            .into_iter()
            .next()
            .ok_or(PayloadError::MissingCondition)?;

        Ok(Self {
            place_name: payload.name,
            country: payload.sys.country,
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            wind_speed: payload.wind.speed,
            visibility_m: payload.visibility,
            description: condition.description,
            icon: condition.icon,
        })
    }
}

pub fn icon_url(icon: &str, scale: u8) -> String {
    format!("{ICON_BASE_URL}/{icon}@{scale}x.png")
}
