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

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

use super::typedef::*;
use crate::error::{Error, Result};

/// Monday of week `week` of `year`, weeks counted from the first Monday
/// (`%W`). Week 0 is the Monday on or before the 1st of January.
pub(crate) fn week_start_date(year: i32, week: i32) -> Result<NaiveDate> {
	let invalid = || Error::InvalidDate(format!("{}-W{:02}", year, week));

	if !(0..=53).contains(&week) {
		return Err(invalid());
	}

	let new_year = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
	let weekday_offset = new_year.weekday().num_days_from_monday() as i64;

	let monday = if week == 0 {
		new_year.checked_sub_signed(Duration::days(weekday_offset))
	} else {
		let first_monday = (7 - weekday_offset) % 7;
		new_year.checked_add_signed(Duration::days(first_monday + 7 * (week as i64 - 1)))
	};

	monday.ok_or_else(invalid)
}

/// Counts one case per `(year, week)` key and orders the weeks by date.
pub(super) fn build_weekly_series(keys: &[(i32, i32)]) -> Result<WeeklySeries> {
	if keys.is_empty() {
		return Err(Error::EmptySeries);
	}

	let mut counter = BTreeMap::<NaiveDate, u64>::new();
	for (year, week) in keys {
		*counter.entry(week_start_date(*year, *week)?).or_default() += 1;
	}

	let (dates, counts): (Vec<_>, Vec<_>) = counter
		.into_iter()
		.map(|(date, count)| (date, count as f64))
		.unzip();

	Ok(WeeklySeries { dates, counts })
}

pub(super) fn fit_min_max(values: &[f64]) -> Result<MinMaxParam> {
	if values.is_empty() {
		return Err(Error::EmptySeries);
	}

	let [min, max] = values
		.iter()
		.fold([f64::MAX, f64::MIN], |[last_min, last_max], each| {
			[last_min.min(*each), last_max.max(*each)]
		});

	Ok(MinMaxParam { min, max })
}

/// Slides a window of `seq_length` over `data`, one position at a time,
/// labelling each window with the value right after it.
pub(crate) fn create_sequences(data: &[f64], seq_length: usize) -> Result<SequenceSet> {
	if seq_length == 0 || data.len() <= seq_length {
		return Err(Error::SeriesTooShort {
			length: data.len(),
			window: seq_length,
		});
	}

	let inputs = data
		.windows(seq_length)
		.take(data.len() - seq_length)
		.map(|each| each.to_vec())
		.collect::<Vec<_>>();
	let targets = data[seq_length..].to_vec();

	Ok(SequenceSet {
		inputs,
		targets,
		first_index: 0,
	})
}

/// Chronological split: the earliest `train_ratio` of the windows train the
/// model, the rest evaluate it. Nothing is shuffled.
pub(crate) fn split_sequences(set: SequenceSet, train_ratio: f64) -> Result<WindowSplit> {
	if !(train_ratio > 0f64 && train_ratio < 1f64) {
		return Err(Error::Config(format!(
			"train ratio must be between 0 and 1, got {}",
			train_ratio
		)));
	}

	let total = set.len();
	let train_size = (total as f64 * train_ratio) as usize;
	if train_size == 0 || train_size == total {
		return Err(Error::InsufficientWindows { windows: total });
	}

	let SequenceSet {
		mut inputs,
		mut targets,
		first_index,
	} = set;

	let evaluation = SequenceSet {
		inputs: inputs.split_off(train_size),
		targets: targets.split_off(train_size),
		first_index: first_index + train_size,
	};

	let train = SequenceSet {
		inputs,
		targets,
		first_index,
	};

	Ok(WindowSplit { train, evaluation })
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use proptest::prelude::*;

	#[test]
	fn windows_of_the_reference_series() {
		let series = [10f64, 12f64, 9f64, 15f64, 20f64, 18f64, 14f64];
		let set = create_sequences(&series, 3).unwrap();

		assert_eq!(
			set.inputs,
			vec![
				vec![10f64, 12f64, 9f64],
				vec![12f64, 9f64, 15f64],
				vec![9f64, 15f64, 20f64],
				vec![15f64, 20f64, 18f64],
			]
		);
		assert_eq!(set.targets, vec![15f64, 20f64, 18f64, 14f64]);
	}

	#[test]
	fn window_as_long_as_series_fails() {
		assert!(matches!(
			create_sequences(&[1f64, 2f64, 3f64], 3),
			Err(Error::SeriesTooShort {
				length: 3,
				window: 3
			})
		));
		assert!(create_sequences(&[1f64, 2f64], 0).is_err());
	}

	#[test]
	fn reference_scaling() {
		let param = fit_min_max(&[10f64, 12f64, 9f64, 15f64, 20f64, 18f64, 14f64]).unwrap();

		assert_eq!(param, MinMaxParam { min: 9f64, max: 20f64 });
		assert_abs_diff_eq!(param.scale(20f64), 1f64, epsilon = 1e-9);
		assert_abs_diff_eq!(param.scale(9f64), 0f64, epsilon = 1e-9);
		assert_abs_diff_eq!(param.scale(14.5f64), 0.5f64, epsilon = 1e-9);
	}

	#[test]
	fn flat_series_scales_to_zero() {
		let param = fit_min_max(&[4f64, 4f64, 4f64]).unwrap();
		assert_eq!(param.scale(4f64), 0f64);
		assert_eq!(param.unscale(0f64), 4f64);
	}

	#[test]
	fn overshooting_predictions_are_not_clamped() {
		let param = MinMaxParam { min: 0f64, max: 10f64 };
		assert_abs_diff_eq!(param.unscale(1.2f64), 12f64, epsilon = 1e-9);
		assert_abs_diff_eq!(param.unscale(-0.1f64), -1f64, epsilon = 1e-9);
	}

	#[test]
	fn split_is_contiguous_and_chronological() {
		let series = (0..20).map(|each| each as f64).collect::<Vec<_>>();
		let split = split_sequences(create_sequences(&series, 4).unwrap(), 0.8).unwrap();

		assert_eq!(split.train.len(), 12);
		assert_eq!(split.evaluation.len(), 4);
		assert_eq!(
			split.evaluation.first_index,
			split.train.first_index + split.train.len()
		);
		// Window i starts at value i, so the first evaluation window follows the last training one.
		assert_eq!(split.train.inputs.last().unwrap()[0] + 1f64, split.evaluation.inputs[0][0]);
	}

	#[test]
	fn split_needs_both_sides() {
		let set = create_sequences(&[1f64, 2f64, 3f64], 2).unwrap();
		assert!(matches!(
			split_sequences(set, 0.8),
			Err(Error::InsufficientWindows { windows: 1 })
		));
	}

	#[test]
	fn weeks_start_on_monday() {
		// 2021-01-01 is a Friday, so week 1 starts on the 4th.
		assert_eq!(
			week_start_date(2021, 1).unwrap(),
			NaiveDate::from_ymd_opt(2021, 1, 4).unwrap()
		);
		assert_eq!(
			week_start_date(2021, 0).unwrap(),
			NaiveDate::from_ymd_opt(2020, 12, 28).unwrap()
		);
		// 2024-01-01 is a Monday.
		assert_eq!(
			week_start_date(2024, 1).unwrap(),
			NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
		);
		assert_eq!(
			week_start_date(2024, 0).unwrap(),
			NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
		);
		assert!(week_start_date(2021, 54).is_err());
	}

	#[test]
	fn weekly_series_counts_cases_in_order() {
		let keys = [(2022, 2), (2021, 10), (2022, 2), (2021, 10), (2022, 2)];
		let series = build_weekly_series(&keys).unwrap();

		assert_eq!(series.counts, vec![2f64, 3f64]);
		assert!(series.dates.windows(2).all(|pair| pair[0] < pair[1]));
	}

	proptest! {
		#[test]
		fn window_count_and_alignment(
			data in prop::collection::vec(-1e6f64..1e6f64, 2..200),
			seq_length in 1usize..50,
		) {
			prop_assume!(seq_length < data.len());
			let set = create_sequences(&data, seq_length).unwrap();

			prop_assert_eq!(set.len(), data.len() - seq_length);
			for (index, (input, target)) in set.inputs.iter().zip(&set.targets).enumerate() {
				prop_assert_eq!(input.as_slice(), &data[index..index + seq_length]);
				prop_assert_eq!(*target, data[index + seq_length]);
			}
		}

		#[test]
		fn scaling_round_trip(
			data in prop::collection::vec(-1e4f64..1e4f64, 2..100),
			pick in 0f64..1f64,
		) {
			let param = fit_min_max(&data).unwrap();
			let value = param.min + (param.max - param.min) * pick;

			prop_assert!((param.unscale(param.scale(value)) - value).abs() < 1e-6);
			prop_assert!(param.scale(value) >= -1e-12 && param.scale(value) <= 1f64 + 1e-12);
		}
	}
}
