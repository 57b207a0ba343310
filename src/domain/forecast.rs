// Forecast domain models and the noon-anchored daily reduction
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::weather::icon_url;

/// Upper bound on the number of daily summaries in one forecast
pub const MAX_FORECAST_DAYS: usize = 5;

/// Local hours (inclusive) a sample must fall in to represent its day
const NOON_WINDOW: RangeInclusive<u32> = 11..=13;

/// One entry of the upstream 3-hour forecast series
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastSample {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// e.g. "Mon, Dec 1"
    pub label: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

impl DailySummary {
    fn from_sample(sample: &RawForecastSample, date: NaiveDate) -> Self {
        Self {
            date,
            label: date.format("%a, %b %-d").to_string(),
            temperature: sample.temperature,
            description: sample.description.clone(),
            icon: sample.icon.clone(),
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
        }
    }

    pub fn rounded_temperature(&self) -> i64 {
        self.temperature.round() as i64
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon, 2)
    }
}

/// Which wall clock decides a sample's calendar date and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// The host's local time zone
    #[default]
    System,
    Fixed(FixedOffset),
}

impl LocalZone {
    pub fn localize(&self, timestamp: i64) -> Option<NaiveDateTime> {
        let utc = DateTime::from_timestamp(timestamp, 0)?;
        Some(match self {
            Self::System => utc.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => utc.with_timezone(offset).naive_local(),
        })
    }
}

/// Condense a 3-hour forecast series into at most [`MAX_FORECAST_DAYS`]
/// daily summaries.
///
/// Samples are scanned in timestamp order. The first sample of each local
/// calendar date whose local hour lies in 11..=13 represents that date; dates
/// without such a sample are skipped rather than backfilled.
pub fn reduce_forecast(samples: &[RawForecastSample], zone: LocalZone) -> Vec<DailySummary> {
    let mut ordered: Vec<&RawForecastSample> = samples.iter().collect();
    ordered.sort_by_key(|sample| sample.timestamp);

    let mut recorded: HashSet<NaiveDate> = HashSet::new();

    ordered
        .into_iter()
        .filter_map(|sample| zone.localize(sample.timestamp).map(|local| (sample, local)))
        .filter(|(_, local)| NOON_WINDOW.contains(&local.hour()))
        .filter(|(_, local)| recorded.insert(local.date()))
        .take(MAX_FORECAST_DAYS)
        .map(|(sample, local)| DailySummary::from_sample(sample, local.date()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> LocalZone {
        LocalZone::Fixed(FixedOffset::east_opt(0).unwrap())
    }

    fn sample_at(day: u32, hour: u32, temperature: f64) -> RawForecastSample {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();
        RawForecastSample {
            timestamp,
            temperature,
            humidity: 50,
            wind_speed: 2.5,
            description: format!("sample {day}-{hour}"),
            icon: "01d".to_string(),
        }
    }

    fn three_hourly(days: std::ops::RangeInclusive<u32>) -> Vec<RawForecastSample> {
        days.flat_map(|day| (0..24).step_by(3).map(move |hour| sample_at(day, hour, hour as f64)))
            .collect()
    }

    #[test]
    fn test_picks_noon_sample_and_skips_days_without_one() {
        let samples = vec![
            sample_at(4, 9, 5.0),
            sample_at(4, 12, 10.0),
            sample_at(4, 15, 8.0),
            sample_at(5, 10, 6.0),
            sample_at(5, 14, 9.0),
        ];

        let daily = reduce_forecast(&samples, utc());

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(daily[0].label, "Mon, Mar 4");
        assert_eq!(daily[0].temperature, 10.0);
    }

    #[test]
    fn test_first_sample_in_window_wins() {
        let samples = vec![sample_at(4, 11, 1.0), sample_at(4, 13, 2.0)];

        let daily = reduce_forecast(&samples, utc());

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].temperature, 1.0);
    }

    #[test]
    fn test_caps_at_five_days() {
        let samples = three_hourly(1..=7);

        let daily = reduce_forecast(&samples, utc());

        assert_eq!(daily.len(), MAX_FORECAST_DAYS);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(daily[4].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(daily.iter().all(|d| d.temperature == 12.0));
    }

    #[test]
    fn test_dates_strictly_increasing_for_unordered_input() {
        let mut samples = three_hourly(1..=6);
        samples.reverse();
        samples.swap(3, 17);

        let daily = reduce_forecast(&samples, utc());

        assert!(daily.len() <= MAX_FORECAST_DAYS);
        assert!(daily.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn test_uses_local_hour_of_zone() {
        // 03:00 UTC is noon in UTC+9
        let samples = vec![sample_at(4, 3, 7.0), sample_at(4, 12, 9.0)];
        let tokyo = LocalZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap());

        let daily = reduce_forecast(&samples, tokyo);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].temperature, 7.0);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_reduction_is_repeatable() {
        let samples = three_hourly(2..=5);

        assert_eq!(reduce_forecast(&samples, utc()), reduce_forecast(&samples, utc()));
    }

    #[test]
    fn test_empty_input() {
        assert!(reduce_forecast(&[], LocalZone::System).is_empty());
    }
}
