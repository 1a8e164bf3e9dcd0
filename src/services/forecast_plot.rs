use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::domain::forecast::ForecastPoint;

#[derive(Error, Debug)]
pub enum ForecastPlotError {
    #[error("forecast series is empty")]
    EmptySeries,
    #[error("failed to render forecast plot: {0}")]
    Plot(String),
}

/// Renders observed demand, the forecast and its confidence band to a PNG.
pub async fn plot_forecast_png<P: AsRef<Path>>(
    output_path: P,
    series: &[ForecastPoint],
) -> Result<(), ForecastPlotError> {
    if series.is_empty() {
        return Err(ForecastPlotError::EmptySeries);
    }
    let output_path = output_path.as_ref().to_path_buf();
    let series = series.to_vec();
    tokio::task::spawn_blocking(move || render_plot_png(&output_path, &series))
        .await
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))??;
    Ok(())
}

fn render_plot_png(output_path: &Path, series: &[ForecastPoint]) -> Result<(), ForecastPlotError> {
    let max_value = series
        .iter()
        .flat_map(|point| {
            [
                point.actual(),
                point.prediction().map(|prediction| prediction.upper_bound),
            ]
        })
        .flatten()
        .fold(0.0_f64, f64::max);
    let max_y = (max_value * 1.1).max(1.0);
    let max_x = series.len().max(2) as i32 - 1;

    let root = BitMapBackend::new(output_path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Demand Forecast", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(75)
        .build_cartesian_2d(0..max_x, 0.0..max_y)
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Date")
        .y_desc("Demand")
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 20))
        .x_labels(series.len().min(8))
        .x_label_formatter(&|index| {
            usize::try_from(*index)
                .ok()
                .and_then(|idx| series.get(idx))
                .map(|point| point.date().format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    let predicted: Vec<(i32, f64, f64, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(idx, point)| {
            point.prediction().map(|prediction| {
                (
                    idx as i32,
                    prediction.lower_bound,
                    prediction.predicted,
                    prediction.upper_bound,
                )
            })
        })
        .collect();

    if !predicted.is_empty() {
        let band: Vec<(i32, f64)> = predicted
            .iter()
            .map(|(x, _, _, upper)| (*x, *upper))
            .chain(predicted.iter().rev().map(|(x, lower, _, _)| (*x, *lower)))
            .collect();
        let band_color = RGBColor(255, 160, 60).mix(0.25);
        chart
            .draw_series(std::iter::once(Polygon::new(band, band_color.filled())))
            .map_err(|e| ForecastPlotError::Plot(e.to_string()))?
            .label("Confidence band")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], band_color.filled())
            });

        let predicted_color = RGBColor(230, 110, 20);
        chart
            .draw_series(LineSeries::new(
                predicted.iter().map(|(x, _, value, _)| (*x, *value)),
                predicted_color.stroke_width(2),
            ))
            .map_err(|e| ForecastPlotError::Plot(e.to_string()))?
            .label("Predicted")
            .legend(move |(x, y)| PathElement::new([(x, y), (x + 15, y)], predicted_color));
    }

    let actual_color = RGBColor(30, 122, 204);
    let actual: Vec<(i32, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(idx, point)| point.actual().map(|value| (idx as i32, value)))
        .collect();
    if !actual.is_empty() {
        chart
            .draw_series(LineSeries::new(actual, actual_color.stroke_width(2)))
            .map_err(|e| ForecastPlotError::Plot(e.to_string()))?
            .label("Actual")
            .legend(move |(x, y)| PathElement::new([(x, y), (x + 15, y)], actual_color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| ForecastPlotError::Plot(e.to_string()))?;
    Ok(())
}
