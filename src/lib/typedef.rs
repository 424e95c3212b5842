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
use std::{borrow::Cow, ops::RangeInclusive, path::PathBuf};

use crate::train::typedef::TrainingConfig;

/// Years kept by the reporting pipeline. Forecasting uses every year.
pub const REPORT_YEARS: RangeInclusive<i32> = 2020..=2023;

#[derive(Default, Serialize, Clone, Debug)]
pub struct ErrorInfo {
	pub title: Cow<'static, str>,
	pub message: String,
}

/// One row of the surveillance data.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseRecord {
	pub year: i32,
	pub week: i32,
	pub department: String,
	pub age: f64,
	pub sex: String,
	pub diagnosis: String,
	pub month: Option<i32>,
}

/// Everything a forecasting run needs, passed in instead of read from globals.
#[derive(Clone)]
pub struct ForecastOptions {
	pub input_path: PathBuf,
	pub end_date: NaiveDate,
	pub seq_length: usize,
	pub train_ratio: f64,
	pub output_dir: PathBuf,
	pub export_path: Option<PathBuf>,
	pub training: TrainingConfig,
}
