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

use std::borrow::Cow;

use crate::typedef::ErrorInfo;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("The uploaded file is empty")]
	EmptyUpload,

	#[error("Required column \"{0}\" is missing")]
	MissingColumn(String),

	#[error("Row {row} has an invalid year \"{value}\"")]
	InvalidYear { row: usize, value: String },

	#[error("Row {row} has a non-numeric value \"{value}\" in column \"{column}\"")]
	InvalidNumericField {
		row: usize,
		column: &'static str,
		value: String,
	},

	#[error("Cannot parse \"{0}\" file extension")]
	UnsupportedFileType(String),

	#[error("The file is not UTF-8 text, first undecodable byte at offset {offset}")]
	InvalidEncoding { offset: usize },

	#[error(transparent)]
	Csv(#[from] csv::Error),

	#[error(transparent)]
	Spreadsheet(#[from] calamine::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("A series of {length} points cannot fill a window of {window}")]
	SeriesTooShort { length: usize, window: usize },

	#[error("{windows} windows cannot be split into non-empty training and evaluation sets")]
	InsufficientWindows { windows: usize },

	#[error("There is no case to build a series from")]
	EmptySeries,

	#[error("Cannot understand \"{0}\" as a date")]
	InvalidDate(String),

	#[error("Invalid configuration: {0}")]
	Config(String),

	#[error("Chart rendering failed: {0}")]
	Chart(String),
}

impl Error {
	pub fn title(&self) -> Cow<'static, str> {
		match self {
			Error::EmptyUpload => Cow::Borrowed("Nothing to Analyze"),
			Error::MissingColumn(_) => Cow::Borrowed("Missing Column"),
			Error::InvalidYear { .. } => Cow::Borrowed("Invalid Year"),
			Error::InvalidNumericField { .. } => Cow::Borrowed("Invalid Numeric Field"),
			Error::UnsupportedFileType(_) => Cow::Borrowed("File Type Unsupported"),
			Error::InvalidEncoding { .. } => Cow::Borrowed("Unsupported Text Encoding"),
			Error::Csv(_) => Cow::Borrowed("Failed to Read CSV File"),
			Error::Spreadsheet(_) => Cow::Borrowed("Failed to Read Spreadsheet"),
			Error::Io(_) => Cow::Borrowed("Input/Output Failure"),
			Error::SeriesTooShort { .. } | Error::InsufficientWindows { .. } => {
				Cow::Borrowed("Unable to Spot The Pattern")
			}
			Error::EmptySeries => Cow::Borrowed("Data is Incomplete"),
			Error::InvalidDate(_) => Cow::Borrowed("Invalid Date"),
			Error::Config(_) => Cow::Borrowed("Invalid Configuration"),
			Error::Chart(_) => Cow::Borrowed("Cannot Draw Chart"),
		}
	}

	/// Whether the failure was caused by the submitted data rather than the server.
	pub fn is_input_error(&self) -> bool {
		!matches!(self, Error::Io(_) | Error::Chart(_) | Error::Config(_))
	}
}

impl From<&Error> for ErrorInfo {
	fn from(err: &Error) -> Self {
		ErrorInfo {
			title: err.title(),
			message: err.to_string(),
		}
	}
}
