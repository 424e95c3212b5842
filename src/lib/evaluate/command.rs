/*
 * Dengue Patterns, case reporting and LSTM forecasting of dengue outbreaks
 * Copyright (C) 2025 Athaariq A. Ramadhani <foss@athaariq.my.id>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use chrono::{Datelike, NaiveDate};
use parse_datetime::parse_datetime;
use std::path::Path;

use super::chart::*;
use super::helper::*;
use super::typedef::*;
use crate::data::command::{load_table, parse_week_keys};
use crate::error::{Error, Result};
use crate::preprocess::command::prepare_series;
use crate::preprocess::typedef::PreparedSeries;
use crate::train::command::start_train;
use crate::train::typedef::TrainedModel;
use crate::typedef::ForecastOptions;

pub const HOLDOUT_CHART: &'static str = "holdout.svg";
pub const FORECAST_CHART: &'static str = "forecast.svg";
pub const DEFAULT_END_DATE: &'static str = "2025-12-31";

/// Accepts a plain `YYYY-MM-DD` date or anything `parse_datetime` understands,
/// such as `2025-12-31 00:00` or `next year`.
pub fn parse_end_date(text: &str) -> Result<NaiveDate> {
	let trimmed = text.trim();
	if let Ok(found) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
		return Ok(found);
	}

	parse_datetime(trimmed)
		.map(|found| found.date_naive())
		.map_err(|_| Error::InvalidDate(trimmed.to_string()))
}

/// Scores the model on the held-out windows, then extrapolates week by week
/// from the last `seq_length` known values up to `end_date`.
pub fn evaluate<M: NextStepModel>(
	model: &M,
	evaluation_predictions: &[f64],
	prepared: &PreparedSeries,
	end_date: NaiveDate,
) -> Result<EvaluationReport> {
	let scaler = prepared.scaler;
	let evaluation = &prepared.split.evaluation;

	let actual = evaluation
		.targets
		.iter()
		.map(|each| scaler.unscale(*each))
		.collect::<Vec<_>>();
	let predicted = evaluation_predictions
		.iter()
		.map(|each| scaler.unscale(*each))
		.collect::<Vec<_>>();
	let rmse = rmse(&actual, &predicted);

	let holdout = actual
		.iter()
		.zip(&predicted)
		.enumerate()
		.filter_map(|(index, (y0, y1))| {
			let x = *prepared
				.series
				.dates
				.get(evaluation.first_index + index + prepared.seq_length)?;
			Some(ComparisonPoint {
				x,
				y0: Some(*y0),
				y1: Some(*y1),
			})
		})
		.collect::<Vec<_>>();

	let last_date = prepared.series.last_date().ok_or(Error::EmptySeries)?;
	let seed_window = &prepared.scaled[prepared.scaled.len() - prepared.seq_length..];
	let steps = forecast_steps(last_date, end_date);

	let forecast = future_dates(last_date, steps)
		.into_iter()
		.zip(extrapolate(model, seed_window, steps))
		.map(|(x, y)| ComparisonPoint {
			x,
			y0: None,
			y1: Some(scaler.unscale(y)),
		})
		.collect::<Vec<_>>();

	let history = prepared
		.series
		.dates
		.iter()
		.zip(&prepared.series.counts)
		.map(|(x, y)| ComparisonPoint {
			x: *x,
			y0: Some(*y),
			y1: None,
		})
		.collect::<Vec<_>>();

	Ok(EvaluationReport {
		rmse,
		holdout,
		history,
		forecast,
		progress: Default::default(),
	})
}

/// Writes the extrapolated weeks as `Date,Predicted Cases` rows.
pub fn save_prediction(path: &Path, forecast: &[ComparisonPoint]) -> Result<()> {
	let mut writer = csv::Writer::from_path(path)?;
	writer.write_record(["Date", "Predicted Cases"])?;

	for each in forecast {
		let value = match each.y1 {
			Some(found) => found,
			None => continue,
		};
		writer.write_record([each.x.to_string(), value.to_string()])?;
	}

	writer.flush()?;
	Ok(())
}

/// The whole forecasting run: load, prepare, train, evaluate, draw and export.
pub fn run_forecast(options: &ForecastOptions) -> Result<EvaluationReport> {
	let table = load_table(&options.input_path)?;
	let keys = parse_week_keys(&table)?;
	let prepared = prepare_series(&keys, options.seq_length, options.train_ratio)?;

	let TrainedModel { network, progress } = start_train(&prepared.split.train, &options.training)?;

	let evaluation_predictions = predict_windows(&network, &prepared.split.evaluation.inputs);
	let mut report = evaluate(&network, &evaluation_predictions, &prepared, options.end_date)?;
	report.progress = progress;

	tracing::info!(
		rmse = report.rmse,
		future_weeks = report.forecast.len(),
		"evaluation finished"
	);

	std::fs::create_dir_all(&options.output_dir)?;
	draw_holdout(&options.output_dir.join(HOLDOUT_CHART), &report.holdout)?;
	draw_forecast(
		&options.output_dir.join(FORECAST_CHART),
		&report.history,
		&report.forecast,
		options.end_date.year(),
	)?;

	if let Some(export_path) = &options.export_path {
		save_prediction(export_path, &report.forecast)?;
		tracing::info!(path = %export_path.display(), "prediction exported");
	}

	Ok(report)
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	fn prepared() -> PreparedSeries {
		let counts = [10usize, 12, 9, 15, 20, 18, 14, 11, 13, 16];
		let keys = counts
			.iter()
			.enumerate()
			.flat_map(|(week, count)| std::iter::repeat((2023, week as i32 + 1)).take(*count))
			.collect::<Vec<_>>();

		prepare_series(&keys, 3, 0.5).unwrap()
	}

	#[test]
	fn perfect_predictions_score_zero() {
		let prepared = prepared();
		let persistence = |window: &[f64]| window.last().cloned().unwrap_or_default();
		let targets = prepared.split.evaluation.targets.clone();

		let end_date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
		let report = evaluate(&persistence, &targets, &prepared, end_date).unwrap();

		assert_abs_diff_eq!(report.rmse, 0f64, epsilon = 1e-9);
		assert_eq!(report.holdout.len(), prepared.split.evaluation.len());
		assert_eq!(report.holdout.last().map(|found| found.x), prepared.series.last_date());
		assert_eq!(report.history.len(), 10);
	}

	#[test]
	fn forecast_reaches_the_target_date() {
		let prepared = prepared();
		let last_date = prepared.series.last_date().unwrap();
		let end_date = last_date + chrono::Duration::days(30);
		let persistence = |window: &[f64]| window.last().cloned().unwrap_or_default();

		let report = evaluate(&persistence, &[], &prepared, end_date).unwrap();

		assert_eq!(report.forecast.len(), 5);
		assert_eq!(report.forecast[0].x, last_date + chrono::Duration::weeks(1));
		// Persistence repeats the last observed count
		assert!(report
			.forecast
			.iter()
			.all(|each| (each.y1.unwrap() - 16f64).abs() < 1e-9));
	}

	#[test]
	fn end_date_accepts_plain_and_timestamped_input() {
		let expected = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
		assert_eq!(parse_end_date(DEFAULT_END_DATE).unwrap(), expected);
		assert_eq!(parse_end_date(" 2025-12-31 ").unwrap(), expected);
		assert_eq!(parse_end_date("2025-12-31 10:00").unwrap(), expected);
		assert!(matches!(parse_end_date("someday"), Err(Error::InvalidDate(_))));
	}

	#[test]
	fn exports_prediction_rows() {
		let directory = tempfile::tempdir().unwrap();
		let path = directory.path().join("prediction.csv");
		let forecast = vec![ComparisonPoint {
			x: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
			y0: None,
			y1: Some(12.5f64),
		}];

		save_prediction(&path, &forecast).unwrap();

		let content = std::fs::read_to_string(&path).unwrap();
		assert_eq!(content, "Date,Predicted Cases\n2024-01-01,12.5\n");
	}
}
