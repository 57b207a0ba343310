// Plain-text rendering of the dashboard state
use crate::application::session_state::{PresentationState, WeatherReport};
use std::fmt;

/// Borrowed view of the state that formats as the terminal dashboard
pub struct StateView<'a>(pub &'a PresentationState);

impl fmt::Display for StateView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "Units: {}", state.unit().label())?;

        let status = state.status();
        if let Some(message) = status.message() {
            if state.is_loading() {
                writeln!(f, "… {message}")?;
            } else if status.is_error() {
                writeln!(f, "✖ Error: {message}")?;
            } else {
                writeln!(f, "✔ {message}")?;
            }
        }

        match state.report() {
            Some(report) => {
                writeln!(f)?;
                write_report(f, report)
            }
            None => Ok(()),
        }
    }
}

pub fn render_state(state: &PresentationState) -> String {
    StateView(state).to_string()
}

fn write_report(f: &mut fmt::Formatter<'_>, report: &WeatherReport) -> fmt::Result {
    let current = &report.current;
    let temp_unit = report.units.temperature_symbol();
    let wind_unit = report.units.wind_speed_unit();

    writeln!(f, "{}, {}", current.place_name, current.country)?;
    writeln!(
        f,
        "  {}{temp_unit}  {} (feels like {}{temp_unit})",
        current.rounded_temperature(),
        current.description,
        current.rounded_feels_like()
    )?;
    writeln!(
        f,
        "  Humidity {}%  Wind {} {wind_unit}  Pressure {} hPa  Visibility {}",
        current.humidity,
        current.wind_speed,
        current.pressure,
        current
            .visibility_km()
            .map(|km| format!("{km} km"))
            .unwrap_or_else(|| "n/a".to_string())
    )?;
    writeln!(f, "  {}", current.icon_url(4))?;

    if report.daily.is_empty() {
        return Ok(());
    }

    writeln!(f, "\n{}-day forecast", report.daily.len())?;
    for day in &report.daily {
        writeln!(
            f,
            "  {:<12} {:>4}{temp_unit}  {:<20} 💧 {}%  💨 {} {wind_unit}  {}",
            day.label,
            day.rounded_temperature(),
            day.description,
            day.humidity,
            day.wind_speed,
            day.icon_url()
        )?;
    }
    Ok(())
}
