//! Demand projection over the booking and cancellation history.
//!
//! A [`Forecast`] is a pure read-side report: it is computed from the
//! append-only timestamp series and the current seat count, and never
//! mutates the ledger. Projecting twice without an intervening booking or
//! cancellation yields an identical report.

use busline_types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Minimum number of recorded bookings before a forecast can be produced.
pub const MIN_FORECAST_SAMPLES: usize = 2;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Projected demand for the bus.
///
/// The cancellation probability is the clamped ratio of total
/// cancellations to total bookings. It is a deliberately crude heuristic,
/// kept as-is; treat it as a rough signal, not an estimator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Seats currently held by confirmed passengers.
    pub booked_seats: u32,
    /// Total seats on the bus.
    pub capacity: u32,
    /// Mean interval between consecutive recorded bookings, truncated to
    /// whole milliseconds. Cancelled bookings still count; the series is
    /// never pruned.
    pub mean_booking_interval_ms: u64,
    /// Estimated minutes until every seat is taken. Zero when already full.
    pub minutes_to_full: f64,
    /// Clamped cancellations-per-booking ratio in `0.0..=1.0`.
    pub cancel_probability: f64,
}

impl Forecast {
    /// Project demand from the recorded series.
    ///
    /// Requires at least [`MIN_FORECAST_SAMPLES`] booking timestamps; the
    /// cancellation series may be any length, including longer than the
    /// booking series.
    pub fn project(
        bookings: &[Timestamp],
        cancellations: &[Timestamp],
        booked_seats: u32,
        capacity: u32,
    ) -> Result<Self> {
        if bookings.len() < MIN_FORECAST_SAMPLES {
            return Err(LedgerError::InsufficientData {
                have: bookings.len(),
                need: MIN_FORECAST_SAMPLES,
            });
        }

        let mean_booking_interval_ms = mean_interval_ms(bookings);
        let remaining = capacity.saturating_sub(booked_seats);
        let minutes_to_full =
            (mean_booking_interval_ms * u64::from(remaining)) as f64 / MILLIS_PER_MINUTE;

        let cancel_probability = if cancellations.is_empty() {
            0.0
        } else {
            (cancellations.len() as f64 / bookings.len() as f64).min(1.0)
        };

        Ok(Self {
            booked_seats,
            capacity,
            mean_booking_interval_ms,
            minutes_to_full,
            cancel_probability,
        })
    }

    /// Cancellation probability as a percentage, for display.
    pub fn cancel_probability_percent(&self) -> f64 {
        self.cancel_probability * 100.0
    }
}

/// Average of consecutive differences across the full series, truncated
/// to whole milliseconds.
fn mean_interval_ms(times: &[Timestamp]) -> u64 {
    let total: u64 = times
        .windows(2)
        .map(|pair| pair[1].millis_since(pair[0]))
        .sum();
    total / (times.len() - 1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: &[u64]) -> Vec<Timestamp> {
        millis.iter().copied().map(Timestamp::from_millis).collect()
    }

    #[test]
    fn too_few_bookings_is_insufficient_data() {
        let err = Forecast::project(&at(&[1000]), &[], 1, 5).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientData { have: 1, need: 2 });
    }

    #[test]
    fn one_second_cadence_three_seats_left() {
        let forecast = Forecast::project(&at(&[1000, 2000]), &[], 2, 5).unwrap();
        assert_eq!(forecast.mean_booking_interval_ms, 1000);
        assert!((forecast.minutes_to_full - 0.05).abs() < 1e-12);
        assert_eq!(forecast.cancel_probability, 0.0);
    }

    #[test]
    fn full_bus_projects_zero_minutes() {
        let bookings = at(&[0, 1000, 2000, 3000, 4000]);
        let forecast = Forecast::project(&bookings, &[], 5, 5).unwrap();
        assert_eq!(forecast.minutes_to_full, 0.0);
    }

    #[test]
    fn mean_interval_averages_uneven_gaps() {
        // Gaps of 100ms and 300ms average to 200ms.
        let forecast = Forecast::project(&at(&[0, 100, 400]), &[], 3, 5).unwrap();
        assert_eq!(forecast.mean_booking_interval_ms, 200);
    }

    #[test]
    fn mean_interval_truncates_before_the_multiply() {
        // Gaps of 100ms and 101ms: the mean truncates to 100ms, so two
        // remaining seats project 200ms, not 201ms.
        let forecast = Forecast::project(&at(&[0, 100, 201]), &[], 3, 5).unwrap();
        assert_eq!(forecast.mean_booking_interval_ms, 100);
        assert!((forecast.minutes_to_full - 200.0 / 60_000.0).abs() < 1e-12);
    }

    #[test]
    fn cancel_probability_is_ratio_of_counts() {
        let bookings = at(&[0, 1000, 2000, 3000]);
        let cancels = at(&[2500]);
        let forecast = Forecast::project(&bookings, &cancels, 3, 5).unwrap();
        assert_eq!(forecast.cancel_probability, 0.25);
        assert_eq!(forecast.cancel_probability_percent(), 25.0);
    }

    #[test]
    fn cancel_probability_clamps_at_one() {
        let bookings = at(&[0, 1000]);
        let cancels = at(&[100, 200, 300]);
        let forecast = Forecast::project(&bookings, &cancels, 0, 5).unwrap();
        assert_eq!(forecast.cancel_probability, 1.0);
    }

    #[test]
    fn projection_is_deterministic() {
        let bookings = at(&[0, 500, 900]);
        let cancels = at(&[600]);
        let first = Forecast::project(&bookings, &cancels, 2, 5).unwrap();
        let second = Forecast::project(&bookings, &cancels, 2, 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serde_roundtrip() {
        let forecast = Forecast::project(&at(&[0, 1000]), &at(&[500]), 1, 5).unwrap();
        let json = serde_json::to_string(&forecast).unwrap();
        let parsed: Forecast = serde_json::from_str(&json).unwrap();
        assert_eq!(forecast, parsed);
    }
}
