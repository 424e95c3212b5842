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

use std::ops::RangeInclusive;
use std::path::Path;

use super::helper::*;
use super::typedef::*;
use crate::error::{Error, Result};
use crate::typedef::CaseRecord;

/// Decodes an upload into a table, choosing the reader from the file name.
pub fn read_table(bytes: Vec<u8>, file_name: &str) -> Result<RawTable> {
	if bytes.is_empty() {
		return Err(Error::EmptyUpload);
	}

	let table = match source_kind_of(file_name)? {
		SourceKind::Delimited => read_delimited(&bytes)?,
		SourceKind::Spreadsheet => read_spreadsheet(bytes)?,
	};

	tracing::info!(
		file = file_name,
		columns = table.headers.len(),
		rows = table.rows.len(),
		"table decoded"
	);

	Ok(table)
}

pub fn load_table(path: &Path) -> Result<RawTable> {
	let bytes = std::fs::read(path)?;
	let name = path
		.file_name()
		.and_then(|name| name.to_str())
		.unwrap_or("(unknown)");

	read_table(bytes, name)
}

/// Validates the full case schema and converts every row whose year falls in
/// `years`. Other rows only need a readable year and are skipped.
pub fn parse_case_records(table: &RawTable, years: &RangeInclusive<i32>) -> Result<Vec<CaseRecord>> {
	let year_index = require_column(table, COLUMN_YEAR)?;
	let week_index = require_column(table, COLUMN_WEEK)?;
	let department_index = require_column(table, COLUMN_DEPARTMENT)?;
	let age_index = require_column(table, COLUMN_AGE)?;
	let sex_index = require_column(table, COLUMN_SEX)?;
	let diagnosis_index = require_column(table, COLUMN_DIAGNOSIS)?;
	let month_index = table.column_index(COLUMN_MONTH);

	let mut records = Vec::new();
	for (index, row) in table.rows.iter().enumerate() {
		let row_number = index + 1;

		let year = parse_year(row, year_index, row_number)?;
		if !years.contains(&year) {
			continue;
		}

		let month = match month_index {
			Some(found) => Some(parse_whole_field(row, found, COLUMN_MONTH, row_number)?),
			None => None,
		};

		records.push(CaseRecord {
			year,
			week: parse_whole_field(row, week_index, COLUMN_WEEK, row_number)?,
			department: text_field(row, department_index),
			age: parse_number_field(row, age_index, COLUMN_AGE, row_number)?,
			sex: text_field(row, sex_index),
			diagnosis: text_field(row, diagnosis_index),
			month,
		});
	}

	Ok(records)
}

/// Only year and week matter for the weekly series, so nothing else is checked.
pub fn parse_week_keys(table: &RawTable) -> Result<Vec<(i32, i32)>> {
	let year_index = require_column(table, COLUMN_YEAR)?;
	let week_index = require_column(table, COLUMN_WEEK)?;

	table
		.rows
		.iter()
		.enumerate()
		.map(|(index, row)| {
			let row_number = index + 1;
			Ok((
				parse_year(row, year_index, row_number)?,
				parse_whole_field(row, week_index, COLUMN_WEEK, row_number)?,
			))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::typedef::REPORT_YEARS;

	const SAMPLE: &'static str = "Ano;Semana;Departamento;Edad;Sexo;Diagnostic\n\
		2021;5;LIMA;34;F;DENGUE SIN SIGNOS DE ALARMA\n\
		2022;12;PIURA;3;M;DENGUE CON SIGNOS DE ALARMA\n";

	#[test]
	fn parses_case_records() {
		let table = read_table(SAMPLE.as_bytes().to_vec(), "casos.csv").unwrap();
		let records = parse_case_records(&table, &REPORT_YEARS).unwrap();

		assert_eq!(records.len(), 2);
		assert_eq!(
			records[1],
			CaseRecord {
				year: 2022,
				week: 12,
				department: String::from("PIURA"),
				age: 3.0,
				sex: String::from("M"),
				diagnosis: String::from("DENGUE CON SIGNOS DE ALARMA"),
				month: None,
			}
		);
	}

	#[test]
	fn missing_column_is_named() {
		let table = read_table(b"ano,semana,edad\n2021,1,3\n".to_vec(), "casos.csv").unwrap();
		match parse_case_records(&table, &REPORT_YEARS) {
			Err(Error::MissingColumn(found)) => assert_eq!(found, "departamento"),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn invalid_age_names_row_and_column() {
		let text = "ano,semana,departamento,edad,sexo,diagnostic\n2021,1,LIMA,abc,F,DENGUE\n";
		let table = read_table(text.as_bytes().to_vec(), "casos.csv").unwrap();
		assert!(matches!(
			parse_case_records(&table, &REPORT_YEARS),
			Err(Error::InvalidNumericField {
				row: 1,
				column: "edad",
				..
			})
		));
	}

	#[test]
	fn rows_outside_the_years_skip_validation() {
		let text = "ano,semana,departamento,edad,sexo,diagnostic\n\
			2019,1,LIMA,,F,DENGUE\n\
			2020,2,LIMA,30,F,DENGUE\n\
			2024,x,ICA,,M,DENGUE\n";
		let table = read_table(text.as_bytes().to_vec(), "casos.csv").unwrap();
		let records = parse_case_records(&table, &REPORT_YEARS).unwrap();

		assert_eq!(records.len(), 1);
		assert_eq!(records[0].year, 2020);
	}

	#[test]
	fn unreadable_year_is_still_rejected() {
		let text = "ano,semana,departamento,edad,sexo,diagnostic\nabc,1,LIMA,3,F,DENGUE\n";
		let table = read_table(text.as_bytes().to_vec(), "casos.csv").unwrap();
		assert!(matches!(
			parse_case_records(&table, &REPORT_YEARS),
			Err(Error::InvalidYear { row: 1, .. })
		));
	}

	#[test]
	fn week_keys_ignore_other_columns() {
		let table = read_table(b"ano,semana\n2021,1\n2021,2\n".to_vec(), "serie.csv").unwrap();
		assert_eq!(parse_week_keys(&table).unwrap(), vec![(2021, 1), (2021, 2)]);
	}

	#[test]
	fn loads_from_disk() {
		let directory = tempfile::tempdir().unwrap();
		let path = directory.path().join("casos.csv");
		std::fs::write(&path, SAMPLE).unwrap();

		let table = load_table(&path).unwrap();
		assert_eq!(table.headers[0], "ano");
		assert_eq!(table.rows.len(), 2);
	}

	#[test]
	fn empty_bytes_are_rejected() {
		assert!(matches!(
			read_table(Vec::new(), "casos.csv"),
			Err(Error::EmptyUpload)
		));
	}
}
