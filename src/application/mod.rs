// Application layer - Use cases and the seams they depend on
pub mod dashboard_session;
pub mod geolocation;
pub mod proxy_service;
pub mod session_state;
pub mod weather_gateway;
pub mod weather_provider;
