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

use serde::Serialize;
use strum_macros::{Display, EnumIter};

pub const MONTH_NAMES: [&'static str; 12] = [
	"Enero",
	"Febrero",
	"Marzo",
	"Abril",
	"Mayo",
	"Junio",
	"Julio",
	"Agosto",
	"Septiembre",
	"Octubre",
	"Noviembre",
	"Diciembre",
];

pub const TOP_DEPARTMENTS: usize = 5;

#[derive(PartialEq, Eq, PartialOrd, Ord, EnumIter, Display, Serialize, Clone, Copy, Debug)]
pub enum AgeGroup {
	#[strum(to_string = "0–11 meses")]
	Infant,
	#[strum(to_string = "1–4 años")]
	Toddler,
	#[strum(to_string = "5–14 años")]
	Child,
	#[strum(to_string = "15–29 años")]
	Youth,
	#[strum(to_string = "30–59 años")]
	Adult,
	#[strum(to_string = "60+ años")]
	Senior,
}

impl AgeGroup {
	/// Right-closed bin `(lower, upper]`.
	pub fn bounds(&self) -> (f64, f64) {
		match self {
			AgeGroup::Infant => (-1f64, 0f64),
			AgeGroup::Toddler => (0f64, 4f64),
			AgeGroup::Child => (4f64, 14f64),
			AgeGroup::Youth => (14f64, 29f64),
			AgeGroup::Adult => (29f64, 59f64),
			AgeGroup::Senior => (59f64, 150f64),
		}
	}
}

#[derive(Default, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
	pub total_cases: usize,
	pub cases_by_year: Vec<(i32, usize)>,
	pub top_departments: Vec<(String, usize)>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AgeRow {
	pub group: AgeGroup,
	pub total: usize,
	pub severe: usize,
	pub female: usize,
	pub male: usize,
	pub percent: String,
}

#[derive(Default, Serialize, Clone, Debug, PartialEq)]
pub struct MonthlyTable {
	pub years: Vec<i32>,
	pub rows: Vec<(String, Vec<usize>)>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DepartmentRow {
	pub department: String,
	pub per_year: Vec<usize>,
	pub total: usize,
	pub severe: usize,
}

#[derive(Default, Serialize, Clone, Debug, PartialEq)]
pub struct DepartmentTable {
	pub years: Vec<i32>,
	pub rows: Vec<DepartmentRow>,
}

/// Everything the results page shows. Charts are inline SVG documents.
#[derive(Default, Clone, Debug)]
pub struct Report {
	pub summary: Summary,
	pub trends_plot: String,
	pub total_by_department_plot: String,
	pub monthly_plot: String,
	pub age_table: Vec<AgeRow>,
	pub monthly_table: MonthlyTable,
	pub department_table: DepartmentTable,
}
