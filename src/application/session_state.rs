// Presentation state consumed by renderers
use crate::domain::forecast::DailySummary;
use crate::domain::units::UnitSystem;
use crate::domain::weather::CurrentConditions;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

impl Status {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading(message) | Self::Success(message) | Self::Error(message) => {
                Some(message.as_str())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Current conditions plus the reduced daily forecast, in the units they were
/// requested with
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailySummary>,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, Default)]
pub struct PresentationState {
    unit: UnitSystem,
    last_subject: Option<String>,
    status: Status,
    report: Option<WeatherReport>,
}

impl PresentationState {
    pub fn new(unit: UnitSystem) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    /// Place name of the last successful query, if any
    pub fn last_subject(&self) -> Option<&str> {
        self.last_subject.as_deref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub(crate) fn set_unit(&mut self, unit: UnitSystem) {
        self.unit = unit;
    }

    pub(crate) fn begin(&mut self, message: &str) {
        self.status = Status::Loading(message.to_string());
        self.report = None;
    }

    pub(crate) fn succeed(
        &mut self,
        report: WeatherReport,
        message: String,
        subject: Option<String>,
    ) {
        self.status = Status::Success(message);
        self.report = Some(report);
        self.last_subject = subject;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.status = Status::Error(message);
    }
}
