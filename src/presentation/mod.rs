// Presentation layer - HTTP surface of the proxy and terminal rendering
pub mod app_state;
pub mod handlers;
pub mod router;
pub mod terminal;
