use std::f64::consts::PI;

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::domain::forecast::ForecastPoint;
use crate::services::forecast_engine::ForecastError;

const BASE_DEMAND: f64 = 1000.0;
const DAILY_GROWTH: f64 = 0.5;
const ANNUAL_AMPLITUDE: f64 = 100.0;
const WEEKLY_AMPLITUDE: f64 = 50.0;
const NOISE_SPREAD: f64 = 50.0;

/// Synthetic daily demand for the `days` days before `today`.
pub fn generate_synthetic_history(
    days: usize,
    today: NaiveDate,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    let mut rng = rand::thread_rng();
    generate_synthetic_history_with_rng(days, today, &mut rng)
}

/// Linear trend plus annual and weekly sinusoids plus uniform noise,
/// rounded and floored at zero. Fails when the first day would fall before
/// the earliest representable date.
pub fn generate_synthetic_history_with_rng<R: Rng + ?Sized>(
    days: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    let noise = Uniform::new(-NOISE_SPREAD, NOISE_SPREAD);
    let start = today
        .checked_sub_days(Days::new(days as u64))
        .ok_or(ForecastError::DateOutOfRange { from: today, days })?;

    (0..days)
        .map(|day| {
            let step = day as f64;
            let trend = BASE_DEMAND + step * DAILY_GROWTH;
            let annual = ANNUAL_AMPLITUDE * (step / 365.0 * 2.0 * PI).sin();
            let weekly = WEEKLY_AMPLITUDE * (step / 7.0 * 2.0 * PI).sin();
            let actual = (trend + annual + weekly + noise.sample(rng)).max(0.0).round();
            let date = start
                .checked_add_days(Days::new(day as u64))
                .ok_or(ForecastError::DateOutOfRange { from: start, days: day })?;
            Ok(ForecastPoint::Historical { date, actual })
        })
        .collect()
}
