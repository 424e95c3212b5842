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

use super::helper::*;
use super::typedef::*;
use crate::error::Result;

/// Turns raw `(year, week)` case keys into a scaled, windowed and split series.
pub fn prepare_series(
	keys: &[(i32, i32)],
	seq_length: usize,
	train_ratio: f64,
) -> Result<PreparedSeries> {
	let series = build_weekly_series(keys)?;
	let scaler = fit_min_max(&series.counts)?;
	let scaled = series
		.counts
		.iter()
		.map(|each| scaler.scale(*each))
		.collect::<Vec<_>>();

	let sequences = create_sequences(&scaled, seq_length)?;
	let split = split_sequences(sequences, train_ratio)?;

	tracing::info!(
		weeks = series.len(),
		min = scaler.min,
		max = scaler.max,
		train_windows = split.train.len(),
		evaluation_windows = split.evaluation.len(),
		"series prepared"
	);

	Ok(PreparedSeries {
		series,
		scaler,
		scaled,
		split,
		seq_length,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	fn keys_for(counts: &[usize]) -> Vec<(i32, i32)> {
		counts
			.iter()
			.enumerate()
			.flat_map(|(week, count)| std::iter::repeat((2021, week as i32 + 1)).take(*count))
			.collect()
	}

	#[test]
	fn prepared_series_keeps_every_piece_aligned() {
		let prepared = prepare_series(&keys_for(&[10, 12, 9, 15, 20, 18, 14]), 3, 0.5).unwrap();

		assert_eq!(prepared.series.counts, vec![10f64, 12f64, 9f64, 15f64, 20f64, 18f64, 14f64]);
		assert_eq!(prepared.scaler, MinMaxParam { min: 9f64, max: 20f64 });
		assert_eq!(prepared.scaled.len(), 7);
		assert_eq!(prepared.split.train.len() + prepared.split.evaluation.len(), 4);
		assert_eq!(prepared.split.train.len(), 2);
		assert_eq!(prepared.split.evaluation.first_index, 2);
		assert_eq!(prepared.split.evaluation.targets[0], prepared.scaled[5]);
	}

	#[test]
	fn empty_keys_fail() {
		assert!(matches!(prepare_series(&[], 3, 0.8), Err(Error::EmptySeries)));
	}
}
