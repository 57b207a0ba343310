// Query subject domain model
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// What a query is about: a free-text place name or a coordinate pair, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum QuerySubject {
    Place(String),
    Coordinates(Coordinates),
}

impl QuerySubject {
    /// Build a place subject from user input, rejecting blank text.
    pub fn place(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::Place(trimmed.to_string()))
        }
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates(Coordinates::new(latitude, longitude))
    }

    /// Locator query parameters shared by the proxy and the upstream provider
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Place(name) => vec![("q", name.clone())],
            Self::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        }
    }
}

impl fmt::Display for QuerySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place(name) => f.write_str(name),
            Self::Coordinates(c) => write!(f, "({c})"),
        }
    }
}
