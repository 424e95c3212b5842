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

use burn::{
	backend::{ndarray::NdArrayDevice, NdArray},
	tensor::{Tensor, TensorData},
};
use chrono::{Duration, NaiveDate};
use std::collections::VecDeque;

use super::typedef::*;
use crate::train::model::LstmNetwork;

impl NextStepModel for LstmNetwork<NdArray> {
	fn predict_next(&self, window: &[f64]) -> f64 {
		predict_windows(self, &[window.to_vec()])
			.first()
			.cloned()
			.unwrap_or_default()
	}
}

/// Runs every window through the network in one batch, in scaled units.
pub(crate) fn predict_windows(model: &LstmNetwork<NdArray>, windows: &[Vec<f64>]) -> Vec<f64> {
	if windows.is_empty() {
		return Vec::new();
	}

	let device = NdArrayDevice::Cpu;
	let seq_length = windows[0].len();
	let flatten = windows
		.iter()
		.flatten()
		.map(|each| *each as f32)
		.collect::<Vec<_>>();

	let tensor = Tensor::<NdArray, 3>::from_data(
		TensorData::new(flatten, [windows.len(), seq_length, 1]),
		&device,
	);

	let (predicted, _) = model.forward(&tensor, None);
	predicted.into_data().iter::<f64>().collect()
}

pub(crate) fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
	let count = actual.len().min(predicted.len());
	if count == 0 {
		return 0f64;
	}

	let squared_sum = actual
		.iter()
		.zip(predicted)
		.fold(0f64, |last_value, (y, y_hat)| last_value + (y - y_hat).powi(2));

	(squared_sum / count as f64).sqrt()
}

/// Weekly steps needed to reach `end` from `last`, rounded up, never below one.
pub(crate) fn forecast_steps(last: NaiveDate, end: NaiveDate) -> usize {
	let days = (end - last).num_days();
	if days <= 0 {
		return 1;
	}

	((days + 6) / 7).max(1) as usize
}

pub(crate) fn future_dates(last: NaiveDate, steps: usize) -> Vec<NaiveDate> {
	(1..=steps as i64)
		.map(|week| last + Duration::weeks(week))
		.collect()
}

/// Walk-forward extrapolation. After the first step the window holds
/// predictions, so the error of each step feeds into the next one and grows
/// with the horizon.
pub(crate) fn extrapolate<M: NextStepModel>(model: &M, seed_window: &[f64], steps: usize) -> Vec<f64> {
	let mut window = seed_window.iter().cloned().collect::<VecDeque<_>>();
	let mut predictions = Vec::<f64>::with_capacity(steps);

	for _ in 0..steps {
		let next = model.predict_next(window.make_contiguous());
		predictions.push(next);

		window.pop_front();
		window.push_back(next);
	}

	predictions
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use std::cell::RefCell;

	fn date(year: i32, month: u32, day: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(year, month, day).unwrap()
	}

	struct RecordingModel {
		seen: RefCell<Vec<Vec<f64>>>,
	}

	impl NextStepModel for RecordingModel {
		fn predict_next(&self, window: &[f64]) -> f64 {
			self.seen.borrow_mut().push(window.to_vec());
			window.last().cloned().unwrap_or_default() + 1f64
		}
	}

	#[test]
	fn horizon_rounds_up_to_whole_weeks() {
		let last = date(2023, 12, 25);
		assert_eq!(forecast_steps(last, date(2024, 1, 1)), 1);
		assert_eq!(forecast_steps(last, date(2024, 1, 2)), 2);
		assert_eq!(forecast_steps(last, date(2024, 1, 8)), 2);
		assert_eq!(forecast_steps(last, last), 1);
		assert_eq!(forecast_steps(last, date(2023, 1, 1)), 1);
	}

	#[test]
	fn horizon_to_end_of_2025() {
		// 737 days, 105 full weeks and one partial
		assert_eq!(forecast_steps(date(2023, 12, 25), date(2025, 12, 31)), 106);
	}

	#[test]
	fn future_dates_start_one_week_later() {
		let dates = future_dates(date(2023, 12, 25), 3);
		assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]);
	}

	#[test]
	fn window_slides_over_its_own_predictions() {
		let model = RecordingModel {
			seen: RefCell::new(Vec::new()),
		};
		let seed = [0.1f64, 0.2f64, 0.3f64];
		let predictions = extrapolate(&model, &seed, 4);

		assert_eq!(predictions.len(), 4);

		let seen = model.seen.borrow();
		assert_eq!(seen.len(), 4);
		assert!(seen.iter().all(|each| each.len() == seed.len()));
		assert_eq!(seen[0], seed.to_vec());
		for step in 1..seen.len() {
			assert_eq!(seen[step].last().cloned(), Some(predictions[step - 1]));
			assert_eq!(&seen[step][..2], &seen[step - 1][1..]);
		}
	}

	#[test]
	fn error_compounds_with_the_horizon() {
		// The true process stays at zero, the model is biased by 0.1 on top of a window mean.
		let biased_mean = |window: &[f64]| window.iter().sum::<f64>() / window.len() as f64 + 0.1f64;
		let predictions = extrapolate(&biased_mean, &[0f64, 0f64, 0f64], 8);

		assert_abs_diff_eq!(predictions[0], 0.1f64, epsilon = 1e-12);
		assert!(predictions.windows(2).all(|pair| pair[1].abs() >= pair[0].abs()));
		assert!(predictions[7] > predictions[0] * 2f64);
	}

	#[test]
	fn rmse_in_case_units() {
		assert_abs_diff_eq!(rmse(&[1f64, 2f64, 3f64], &[1f64, 2f64, 3f64]), 0f64);
		assert_abs_diff_eq!(rmse(&[0f64, 0f64], &[3f64, 4f64]), (12.5f64).sqrt(), epsilon = 1e-12);
		assert_eq!(rmse(&[], &[]), 0f64);
	}
}
