use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::forecast::{ForecastPoint, Prediction};

pub const CSV_HEADER: [&str; 6] = [
    "date",
    "actual",
    "predicted",
    "upperBound",
    "lowerBound",
    "confidence",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ForecastCsvError {
    #[error("cannot export an empty series")]
    EmptySeries,
    #[error("failed to write forecast csv: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid forecast csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("unexpected csv header: {found}")]
    InvalidHeader { found: String },
    #[error("row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: prediction is missing bounds or confidence")]
    IncompletePrediction { row: usize },
    #[error("row {row}: neither actual nor predicted value is present")]
    EmptyRow { row: usize },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    actual: Option<f64>,
    predicted: Option<f64>,
    #[serde(rename = "upperBound")]
    upper_bound: Option<f64>,
    #[serde(rename = "lowerBound")]
    lower_bound: Option<f64>,
    confidence: Option<f64>,
}

/// Writes one row per point. Absent values are written as empty fields.
pub fn write_series_csv<W: Write>(
    writer: W,
    series: &[ForecastPoint],
) -> Result<(), ForecastCsvError> {
    if series.is_empty() {
        return Err(ForecastCsvError::EmptySeries);
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for point in series {
        let prediction = point.prediction();
        csv_writer.write_record([
            point.date().format(DATE_FORMAT).to_string(),
            format_value(point.actual()),
            format_value(prediction.map(|p| p.predicted)),
            format_value(prediction.map(|p| p.upper_bound)),
            format_value(prediction.map(|p| p.lower_bound)),
            format_value(prediction.map(|p| p.confidence)),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_series_csv(series: &[ForecastPoint]) -> Result<Vec<u8>, ForecastCsvError> {
    let mut buffer = Vec::new();
    write_series_csv(&mut buffer, series)?;
    Ok(buffer)
}

pub fn export_series_csv_file<P: AsRef<Path>>(
    path: P,
    series: &[ForecastPoint],
) -> Result<(), ForecastCsvError> {
    let bytes = export_series_csv(series)?;
    std::fs::write(path.as_ref(), bytes)?;
    debug!(
        path = %path.as_ref().display(),
        rows = series.len(),
        "exported forecast csv"
    );
    Ok(())
}

/// Reads a series written by [`write_series_csv`].
pub fn parse_series_csv<R: Read>(reader: R) -> Result<Vec<ForecastPoint>, ForecastCsvError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    if !headers.iter().eq(CSV_HEADER) {
        return Err(ForecastCsvError::InvalidHeader {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut series = Vec::new();
    for (index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        series.push(point_from_row(row, record?)?);
    }
    Ok(series)
}

fn point_from_row(row: usize, record: CsvRow) -> Result<ForecastPoint, ForecastCsvError> {
    let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).map_err(|_| {
        ForecastCsvError::InvalidDate {
            row,
            value: record.date.clone(),
        }
    })?;

    let prediction = match record.predicted {
        None => None,
        Some(predicted) => match (record.upper_bound, record.lower_bound, record.confidence) {
            (Some(upper_bound), Some(lower_bound), Some(confidence)) => Some(Prediction {
                predicted,
                upper_bound,
                lower_bound,
                confidence,
            }),
            _ => return Err(ForecastCsvError::IncompletePrediction { row }),
        },
    };

    ForecastPoint::from_parts(date, record.actual, prediction)
        .ok_or(ForecastCsvError::EmptyRow { row })
}

fn format_value(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}
