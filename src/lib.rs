//! Weather dashboard.
//!
//! Two halves share this crate:
//! - a proxy that forwards current-weather and forecast queries to
//!   OpenWeather with a server-held API key (`weather-proxy` binary)
//! - a dashboard session that drives searches, unit switching and
//!   geolocation lookups against that proxy and condenses the 3-hour
//!   forecast into one sample per day (`weather-dashboard` binary)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
