//! Terminal front end for the weather proxy.
//!
//! Each subcommand runs one dashboard flow (search, geolocation, unit
//! toggle) and prints the resulting state.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::FixedOffset;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use weather_dashboard::application::dashboard_session::DashboardSession;
use weather_dashboard::application::geolocation::{
    FixedGeolocation, GeolocationProvider, UnsupportedGeolocation,
};
use weather_dashboard::domain::forecast::LocalZone;
use weather_dashboard::domain::subject::Coordinates;
use weather_dashboard::domain::units::UnitSystem;
use weather_dashboard::infrastructure::proxy_client::{ProxyClient, DEFAULT_API_BASE};
use weather_dashboard::presentation::terminal::render_state;

#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard")]
struct Cli {
    /// Base URL of the weather proxy API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// "metric" or "imperial"
    #[arg(long, default_value = "metric")]
    units: UnitSystem,

    /// Group forecast days by this UTC offset instead of the host time zone
    #[arg(long, allow_negative_numbers = true)]
    utc_offset_hours: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show weather for a city.
    Search { city: String },

    /// Show weather for the current position.
    Locate {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Show weather for a city, then again in the other unit system.
    Toggle { city: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let zone = match cli.utc_offset_hours {
        Some(hours) => LocalZone::Fixed(
            FixedOffset::east_opt(hours * 3600)
                .ok_or_else(|| anyhow::anyhow!("UTC offset out of range: {hours}"))?,
        ),
        None => LocalZone::System,
    };

    let geolocation: Arc<dyn GeolocationProvider> = match &cli.command {
        Command::Locate {
            lat: Some(lat),
            lon: Some(lon),
        } => Arc::new(FixedGeolocation::new(Coordinates::new(*lat, *lon))),
        _ => Arc::new(UnsupportedGeolocation),
    };

    let gateway = Arc::new(ProxyClient::new(cli.api_base)?);
    let mut session = DashboardSession::new(gateway, geolocation)
        .with_unit(cli.units)
        .with_zone(zone);

    match cli.command {
        Command::Search { city } => {
            session.query_by_subject(&city).await;
        }
        Command::Locate { .. } => {
            session.request_geolocation().await;
        }
        Command::Toggle { city } => {
            session.query_by_subject(&city).await;
            println!("{}", render_state(session.state()));
            let other = session.state().unit().toggled();
            session.set_unit(other).await;
        }
    }

    println!("{}", render_state(session.state()));

    if session.state().status().is_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
