use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted: f64,
    pub upper_bound: f64,
    pub lower_bound: f64,
    /// Fraction in `(0, 1]`.
    pub confidence: f64,
}

/// One day of a demand series. Every point carries an observed value,
/// a prediction, or both.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastPoint {
    Historical {
        date: NaiveDate,
        actual: f64,
    },
    Forecast {
        date: NaiveDate,
        prediction: Prediction,
    },
    Both {
        date: NaiveDate,
        actual: f64,
        prediction: Prediction,
    },
}

impl ForecastPoint {
    /// Returns `None` when neither an actual nor a prediction is given.
    pub fn from_parts(
        date: NaiveDate,
        actual: Option<f64>,
        prediction: Option<Prediction>,
    ) -> Option<Self> {
        match (actual, prediction) {
            (Some(actual), Some(prediction)) => Some(ForecastPoint::Both {
                date,
                actual,
                prediction,
            }),
            (Some(actual), None) => Some(ForecastPoint::Historical { date, actual }),
            (None, Some(prediction)) => Some(ForecastPoint::Forecast { date, prediction }),
            (None, None) => None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            ForecastPoint::Historical { date, .. }
            | ForecastPoint::Forecast { date, .. }
            | ForecastPoint::Both { date, .. } => *date,
        }
    }

    pub fn actual(&self) -> Option<f64> {
        match self {
            ForecastPoint::Historical { actual, .. } | ForecastPoint::Both { actual, .. } => {
                Some(*actual)
            }
            ForecastPoint::Forecast { .. } => None,
        }
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            ForecastPoint::Forecast { prediction, .. } | ForecastPoint::Both { prediction, .. } => {
                Some(prediction)
            }
            ForecastPoint::Historical { .. } => None,
        }
    }

    pub fn predicted(&self) -> Option<f64> {
        self.prediction().map(|prediction| prediction.predicted)
    }
}

/// Collects the observed values of a series in order.
pub fn actual_values(series: &[ForecastPoint]) -> Vec<f64> {
    series.iter().filter_map(ForecastPoint::actual).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    Prophet,
    Lstm,
    Arima,
    Ensemble,
    Linear,
}

impl ModelId {
    pub const ALL: [ModelId; 5] = [
        ModelId::Prophet,
        ModelId::Lstm,
        ModelId::Arima,
        ModelId::Linear,
        ModelId::Ensemble,
    ];

    /// Strict lookup by id.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "prophet" => Some(ModelId::Prophet),
            "lstm" => Some(ModelId::Lstm),
            "arima" => Some(ModelId::Arima),
            "ensemble" => Some(ModelId::Ensemble),
            "linear" => Some(ModelId::Linear),
            _ => None,
        }
    }

    /// Lenient lookup: unknown ids use the linear model.
    pub fn from_id(value: &str) -> Self {
        Self::parse(value).unwrap_or(ModelId::Linear)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Prophet => "prophet",
            ModelId::Lstm => "lstm",
            ModelId::Arima => "arima",
            ModelId::Ensemble => "ensemble",
            ModelId::Linear => "linear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

/// Static description of a forecasting model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastModel {
    pub id: ModelId,
    pub name: &'static str,
    pub family: &'static str,
    pub description: &'static str,
    pub accuracy: f64,
    /// Seconds.
    pub training_time: u32,
    pub complexity: Complexity,
    pub best_for: &'static [&'static str],
}
