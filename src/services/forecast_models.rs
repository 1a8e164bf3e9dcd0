use std::f64::consts::PI;

use crate::domain::forecast::{Complexity, ForecastModel, ModelId};

pub static FORECAST_MODELS: [ForecastModel; 5] = [
    ForecastModel {
        id: ModelId::Prophet,
        name: "Prophet",
        family: "prophet",
        description: "Additive trend and seasonality model, strong on holiday effects",
        accuracy: 94.2,
        training_time: 30,
        complexity: Complexity::Medium,
        best_for: &["Seasonal patterns", "Holiday effects", "Trend changes"],
    },
    ForecastModel {
        id: ModelId::Lstm,
        name: "LSTM Neural Network",
        family: "lstm",
        description: "Deep learning model for complex patterns",
        accuracy: 91.8,
        training_time: 120,
        complexity: Complexity::High,
        best_for: &["Complex patterns", "Non-linear trends", "Large datasets"],
    },
    ForecastModel {
        id: ModelId::Arima,
        name: "ARIMA",
        family: "arima",
        description: "Classical time series model",
        accuracy: 88.5,
        training_time: 15,
        complexity: Complexity::Medium,
        best_for: &["Stationary data", "Linear trends", "Fast predictions"],
    },
    ForecastModel {
        id: ModelId::Linear,
        name: "Linear Regression",
        family: "linear",
        description: "Simple linear trend model",
        accuracy: 82.1,
        training_time: 5,
        complexity: Complexity::Low,
        best_for: &["Simple trends", "Quick estimates", "Baseline models"],
    },
    ForecastModel {
        id: ModelId::Ensemble,
        name: "Ensemble Model",
        family: "ensemble",
        description: "Combination of multiple models for best accuracy",
        accuracy: 96.1,
        training_time: 90,
        complexity: Complexity::High,
        best_for: &["Maximum accuracy", "Robust predictions", "Critical forecasts"],
    },
];

pub fn model_descriptor(id: ModelId) -> &'static ForecastModel {
    match id {
        ModelId::Prophet => &FORECAST_MODELS[0],
        ModelId::Lstm => &FORECAST_MODELS[1],
        ModelId::Arima => &FORECAST_MODELS[2],
        ModelId::Linear => &FORECAST_MODELS[3],
        ModelId::Ensemble => &FORECAST_MODELS[4],
    }
}

/// Trend slope, optional seasonal sinusoid and band width of a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelCoefficients {
    pub slope: f64,
    pub amplitude: f64,
    /// Days per seasonal cycle; `None` for a pure trend.
    pub period: Option<f64>,
    /// Half-width of the uncertainty band as a fraction of the prediction.
    pub band: f64,
}

impl ModelCoefficients {
    pub fn for_model(id: ModelId) -> Self {
        match id {
            ModelId::Prophet => Self {
                slope: 0.5,
                amplitude: 100.0,
                period: Some(365.0),
                band: 0.08,
            },
            ModelId::Lstm => Self {
                slope: 0.7,
                amplitude: 80.0,
                period: Some(30.0),
                band: 0.06,
            },
            ModelId::Arima => Self {
                slope: 0.4,
                amplitude: 0.0,
                period: None,
                band: 0.12,
            },
            ModelId::Ensemble => Self {
                slope: 0.6,
                amplitude: 90.0,
                period: Some(365.0),
                band: 0.05,
            },
            ModelId::Linear => Self {
                slope: 0.3,
                amplitude: 0.0,
                period: None,
                band: 0.15,
            },
        }
    }

    /// Unclamped prediction `step` days past the base level.
    pub fn predict(&self, base: f64, step: usize) -> f64 {
        let step = step as f64;
        let seasonal = match self.period {
            Some(period) => self.amplitude * (step / period * 2.0 * PI).sin(),
            None => 0.0,
        };
        base + step * self.slope + seasonal
    }
}
