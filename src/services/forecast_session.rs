use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ForecastingConfig;
use crate::domain::forecast::{ForecastPoint, ModelId};
use crate::domain::insights::DemandInsights;
use crate::domain::metrics::AccuracyMetrics;
use crate::services::forecast_engine::{ForecastError, ForecastRequest, backtest, generate_forecast};
use crate::services::insights::derive_insights;
use crate::services::busy_guard::BusyGuard;
use crate::services::synthetic_history::generate_synthetic_history_with_rng;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastSessionError {
    #[error("a forecast is already being generated")]
    Busy,
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Everything derived from one successful generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSnapshot {
    pub model: Option<ModelId>,
    /// Historical points followed by the forecast, in date order.
    pub series: Vec<ForecastPoint>,
    pub metrics: Option<AccuracyMetrics>,
    pub insights: Option<DemandInsights>,
    pub last_generated: Option<DateTime<Utc>>,
}

impl ForecastSnapshot {
    pub fn forecast_points(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.series.iter().filter(|point| point.prediction().is_some())
    }
}

/// Forecast state store. A generation either replaces the whole snapshot or
/// leaves it untouched.
pub struct ForecastSession {
    validation_days: usize,
    simulated_delay: Duration,
    generating: AtomicBool,
    history: Mutex<Vec<ForecastPoint>>,
    snapshot: Mutex<ForecastSnapshot>,
}

impl ForecastSession {
    pub fn new(config: &ForecastingConfig) -> Self {
        Self {
            validation_days: config.validation_days,
            simulated_delay: Duration::from_millis(config.simulated_delay_ms),
            generating: AtomicBool::new(false),
            history: Mutex::new(Vec::new()),
            snapshot: Mutex::new(ForecastSnapshot::default()),
        }
    }

    /// Replaces the observed history used by later generations.
    pub fn load_history(&self, history: Vec<ForecastPoint>) {
        let mut history = history;
        history.retain(|point| point.actual().is_some());
        history.sort_by_key(ForecastPoint::date);
        info!(points = history.len(), "loaded demand history");
        *self.history.lock().unwrap_or_else(PoisonError::into_inner) = history;
    }

    pub fn load_synthetic_history<R: Rng + ?Sized>(
        &self,
        days: usize,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<(), ForecastError> {
        self.load_history(generate_synthetic_history_with_rng(days, today, rng)?);
        Ok(())
    }

    pub fn history(&self) -> Vec<ForecastPoint> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> ForecastSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generates a forecast from the loaded history, back-tests the model
    /// and derives insights, then publishes all of it at once.
    ///
    /// Fails with `Busy` while another generation runs and with `Cancelled`
    /// when `cancel` fires before the work completes.
    pub async fn generate(
        &self,
        request: ForecastRequest,
        today: NaiveDate,
        cancel: CancellationToken,
    ) -> Result<ForecastSnapshot, ForecastSessionError> {
        request.validate()?;
        let _guard = BusyGuard::acquire(&self.generating).ok_or(ForecastSessionError::Busy)?;
        info!(
            model = request.model.as_str(),
            horizon_days = request.horizon_days,
            confidence_level = request.confidence_level,
            "generating forecast"
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                warn!(model = request.model.as_str(), "forecast generation cancelled");
                return Err(ForecastError::Cancelled.into());
            }
            _ = tokio::time::sleep(self.simulated_delay) => {}
        }

        let history = self.history();
        let forecast = generate_forecast(&request, &history, today)?;
        let metrics = backtest(request.model, &history, self.validation_days)?;

        let mut series = history;
        series.extend(forecast);
        let insights = derive_insights(&series);

        let snapshot = ForecastSnapshot {
            model: Some(request.model),
            series,
            metrics: Some(metrics),
            insights: Some(insights),
            last_generated: Some(Utc::now()),
        };
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
        info!(
            points = snapshot.series.len(),
            accuracy = snapshot.metrics.as_ref().map(|m| m.accuracy),
            "forecast generated"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn config(simulated_delay_ms: u64) -> ForecastingConfig {
        ForecastingConfig {
            simulated_delay_ms,
            ..ForecastingConfig::default()
        }
    }

    fn request(horizon_days: usize) -> ForecastRequest {
        ForecastRequest {
            model: ModelId::Prophet,
            horizon_days,
            confidence_level: 95.0,
        }
    }

    fn seeded_session(simulated_delay_ms: u64) -> ForecastSession {
        let session = ForecastSession::new(&config(simulated_delay_ms));
        let mut rng = StdRng::seed_from_u64(5);
        session.load_synthetic_history(365, today(), &mut rng).unwrap();
        session
    }

    #[tokio::test]
    async fn generate_publishes_series_metrics_and_insights() {
        let session = seeded_session(0);

        let snapshot = session
            .generate(request(90), today(), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(snapshot.series.len(), 365 + 90);
        assert_eq!(snapshot.forecast_points().count(), 90);
        assert_eq!(snapshot.model, Some(ModelId::Prophet));
        assert!(snapshot.metrics.is_some());
        let insights = snapshot.insights.as_ref().unwrap();
        assert_ne!(insights.trend_change, "n/a");
        assert!(snapshot.last_generated.is_some());
        assert_eq!(session.snapshot(), snapshot);
        assert!(!session.is_generating());

        let first_forecast = snapshot.forecast_points().next().unwrap();
        assert_eq!(first_forecast.date(), today());
    }

    #[tokio::test]
    async fn failed_generation_leaves_state_untouched() {
        let session = seeded_session(0);
        let before = session
            .generate(request(30), today(), CancellationToken::new())
            .await
            .unwrap();

        session.load_history(Vec::new());
        let error = session
            .generate(request(30), today(), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ForecastSessionError::Forecast(ForecastError::InsufficientHistory { .. })
        ));
        assert_eq!(session.snapshot(), before);
    }

    #[tokio::test]
    async fn cancelled_generation_publishes_nothing() {
        let session = seeded_session(5_000);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = session
            .generate(request(30), today(), cancel)
            .await
            .unwrap_err();

        assert_eq!(error, ForecastSessionError::Forecast(ForecastError::Cancelled));
        assert_eq!(session.snapshot(), ForecastSnapshot::default());
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn concurrent_generation_is_rejected_as_busy() {
        let session = Arc::new(seeded_session(300));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                session
                    .generate(request(10), today(), CancellationToken::new())
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(session.is_generating());

        let second = session
            .generate(request(10), today(), CancellationToken::new())
            .await;
        assert_eq!(second.unwrap_err(), ForecastSessionError::Busy);

        assert!(first.await.unwrap().is_ok());
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn invalid_requests_fail_before_taking_the_busy_flag() {
        let session = seeded_session(0);
        let error = session
            .generate(request(0), today(), CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(error, ForecastSessionError::Forecast(ForecastError::InvalidHorizon));
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn history_dated_at_the_calendar_end_fails_with_a_typed_error() {
        let session = ForecastSession::new(&config(0));
        let last = NaiveDate::MAX;
        session.load_history(vec![ForecastPoint::Historical {
            date: last,
            actual: 10.0,
        }]);

        let error = session
            .generate(request(3), today(), CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ForecastSessionError::Forecast(ForecastError::DateOutOfRange { from: last, days: 1 })
        );
        assert_eq!(session.snapshot(), ForecastSnapshot::default());
        assert!(!session.is_generating());
    }

    #[test]
    fn oversized_synthetic_history_is_rejected() {
        let session = ForecastSession::new(&config(0));
        let mut rng = StdRng::seed_from_u64(5);

        let error = session
            .load_synthetic_history(200_000_000, today(), &mut rng)
            .unwrap_err();

        assert!(matches!(error, ForecastError::DateOutOfRange { .. }));
        assert!(session.history().is_empty());
    }

    #[test]
    fn history_is_sorted_and_limited_to_observed_points() {
        let session = ForecastSession::new(&config(0));
        let later = ForecastPoint::Historical {
            date: today(),
            actual: 2.0,
        };
        let earlier = ForecastPoint::Historical {
            date: today() - chrono::Duration::days(1),
            actual: 1.0,
        };
        let predicted_only = ForecastPoint::Forecast {
            date: today(),
            prediction: crate::domain::forecast::Prediction {
                predicted: 3.0,
                upper_bound: 3.0,
                lower_bound: 3.0,
                confidence: 0.9,
            },
        };
        session.load_history(vec![later.clone(), predicted_only, earlier.clone()]);
        assert_eq!(session.history(), vec![earlier, later]);
    }
}
