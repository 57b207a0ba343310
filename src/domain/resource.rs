// Weather resources exposed by the proxy and the upstream provider

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherResource {
    CurrentWeather,
    Forecast,
}

impl WeatherResource {
    /// Path segment shared by the proxy (`/api/{path}`) and the provider
    pub fn path(&self) -> &'static str {
        match self {
            Self::CurrentWeather => "weather",
            Self::Forecast => "forecast",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::CurrentWeather => "Failed to fetch weather data",
            Self::Forecast => "Failed to fetch forecast data",
        }
    }
}
