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

use chrono::NaiveDate;
use serde::Serialize;

use crate::train::typedef::TrainProgress;

/// `y0` is the observed case count, `y1` the predicted one. Either may be missing.
#[derive(Default, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPoint {
	pub x: NaiveDate,
	pub y0: Option<f64>,
	pub y1: Option<f64>,
}

#[derive(Default, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
	/// Root-mean-squared error on the held-out windows, in cases.
	pub rmse: f64,
	pub holdout: Vec<ComparisonPoint>,
	pub history: Vec<ComparisonPoint>,
	pub forecast: Vec<ComparisonPoint>,
	pub progress: TrainProgress,
}

/// Anything that maps the latest `seq_length` scaled values to the next one.
pub trait NextStepModel {
	fn predict_next(&self, window: &[f64]) -> f64;
}

impl<F: Fn(&[f64]) -> f64> NextStepModel for F {
	fn predict_next(&self, window: &[f64]) -> f64 {
		self(window)
	}
}
