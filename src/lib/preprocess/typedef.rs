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

/// Weekly case counts, one entry per distinct week, oldest first.
#[derive(Default, Serialize, Clone, Debug, PartialEq)]
pub struct WeeklySeries {
	pub dates: Vec<NaiveDate>,
	pub counts: Vec<f64>,
}

impl WeeklySeries {
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn last_date(&self) -> Option<NaiveDate> {
		self.dates.last().cloned()
	}
}

/// Min-max parameters fitted once on the full history.
///
/// Every scaled value in a run, including predictions, is produced and
/// inverted with the same instance.
#[derive(Default, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct MinMaxParam {
	pub min: f64,
	pub max: f64,
}

impl MinMaxParam {
	fn range(&self) -> f64 {
		let range = self.max - self.min;
		if range == 0f64 {
			1f64
		} else {
			range
		}
	}

	pub fn scale(&self, value: f64) -> f64 {
		(value - self.min) / self.range()
	}

	/// Predictions may overshoot the fitted range, so no clamping happens here.
	pub fn unscale(&self, scaled: f64) -> f64 {
		scaled * self.range() + self.min
	}
}

/// Aligned windows and labels. Window `i` starts at series index `first_index + i`.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct SequenceSet {
	pub inputs: Vec<Vec<f64>>,
	pub targets: Vec<f64>,
	pub first_index: usize,
}

impl SequenceSet {
	pub fn len(&self) -> usize {
		self.targets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.targets.is_empty()
	}

	pub fn seq_length(&self) -> usize {
		self.inputs.first().map(|found| found.len()).unwrap_or_default()
	}
}

#[derive(Default, Clone, Debug)]
pub struct WindowSplit {
	pub train: SequenceSet,
	pub evaluation: SequenceSet,
}

/// The scaled history plus its windows, ready for training.
#[derive(Default, Clone, Debug)]
pub struct PreparedSeries {
	pub series: WeeklySeries,
	pub scaler: MinMaxParam,
	pub scaled: Vec<f64>,
	pub split: WindowSplit,
	pub seq_length: usize,
}
