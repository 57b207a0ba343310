// Domain layer - Weather models and the forecast reduction
pub mod forecast;
pub mod resource;
pub mod subject;
pub mod units;
pub mod weather;
