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

pub const COLUMN_YEAR: &'static str = "ano";
pub const COLUMN_WEEK: &'static str = "semana";
pub const COLUMN_DEPARTMENT: &'static str = "departamento";
pub const COLUMN_AGE: &'static str = "edad";
pub const COLUMN_SEX: &'static str = "sexo";
pub const COLUMN_DIAGNOSIS: &'static str = "diagnostic";
pub const COLUMN_MONTH: &'static str = "mes";

/// Delimiters tried while sniffing a text upload, in order of preference.
pub(super) const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How many non-empty lines are inspected to decide the delimiter.
pub(super) const SNIFF_LINES: usize = 10;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub(crate) enum SourceKind {
	Delimited,
	Spreadsheet,
}

/// A decoded upload: normalized header names and raw cell text.
#[derive(Default, Serialize, Clone, Debug)]
pub struct RawTable {
	pub headers: Vec<String>,
	pub rows: Vec<Vec<String>>,
}

impl RawTable {
	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.headers.iter().position(|each| each == name)
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}
