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

use calamine::Reader;
use std::io::Cursor;

use super::typedef::*;
use crate::error::{Error, Result};

pub(super) fn source_kind_of(file_name: &str) -> Result<SourceKind> {
	let extension = std::path::Path::new(file_name)
		.extension()
		.and_then(|found| found.to_str())
		.map(|found| found.to_lowercase())
		.unwrap_or_default();

	match extension.as_str() {
		"" | "csv" | "tsv" | "txt" => Ok(SourceKind::Delimited),
		"xlsx" | "xls" | "xlsb" | "ods" => Ok(SourceKind::Spreadsheet),
		_ => Err(Error::UnsupportedFileType(extension)),
	}
}

pub(super) fn normalize_header(raw: &str) -> String {
	raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Counts a delimiter on one line, ignoring anything inside double quotes.
fn count_unquoted(line: &str, delimiter: u8) -> usize {
	let mut quoted = false;
	line.bytes()
		.filter(|each| {
			if *each == b'"' {
				quoted = !quoted;
			}
			!quoted && *each == delimiter
		})
		.count()
}

/// Picks the delimiter that appears the same, non-zero number of times on
/// every sampled line. Falls back to the most frequent one on the header,
/// then to a comma.
pub(super) fn sniff_delimiter(text: &str) -> u8 {
	let lines = text
		.lines()
		.filter(|each| !each.trim().is_empty())
		.take(SNIFF_LINES)
		.collect::<Vec<_>>();

	let header = match lines.first() {
		Some(found) => *found,
		None => return b',',
	};

	let consistent = DELIMITER_CANDIDATES
		.iter()
		.filter_map(|delimiter| {
			let expected = count_unquoted(header, *delimiter);
			let is_consistent = expected > 0
				&& lines
					.iter()
					.all(|each| count_unquoted(each, *delimiter) == expected);

			is_consistent.then_some((*delimiter, expected))
		})
		.max_by_key(|(_, count)| *count);

	if let Some((delimiter, _)) = consistent {
		return delimiter;
	}

	DELIMITER_CANDIDATES
		.iter()
		.map(|delimiter| (*delimiter, count_unquoted(header, *delimiter)))
		.filter(|(_, count)| *count > 0)
		.max_by_key(|(_, count)| *count)
		.map(|(delimiter, _)| delimiter)
		.unwrap_or(b',')
}

pub(super) fn read_delimited(bytes: &[u8]) -> Result<RawTable> {
	let text = std::str::from_utf8(bytes)
		.map_err(|err| Error::InvalidEncoding { offset: err.valid_up_to() })?;
	if text.trim().is_empty() {
		return Err(Error::EmptyUpload);
	}

	let delimiter = sniff_delimiter(text);
	tracing::debug!(delimiter = ?(delimiter as char), "sniffed delimiter");

	let mut reader = csv::ReaderBuilder::new()
		.delimiter(delimiter)
		.flexible(true)
		.from_reader(text.as_bytes());

	let headers = reader
		.headers()?
		.iter()
		.map(normalize_header)
		.collect::<Vec<_>>();

	let mut rows = Vec::new();
	for each in reader.records() {
		let record = each?;
		if record.iter().all(|cell| cell.trim().is_empty()) {
			continue;
		}

		rows.push(record.iter().map(|cell| cell.to_string()).collect());
	}

	Ok(RawTable { headers, rows })
}

/// Reads the first worksheet of an in-memory workbook.
pub(super) fn read_spreadsheet(bytes: Vec<u8>) -> Result<RawTable> {
	if bytes.is_empty() {
		return Err(Error::EmptyUpload);
	}

	let mut sheets = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;
	let first_sheet = match sheets.sheet_names().first() {
		Some(found) => found.clone(),
		None => return Err(Error::EmptyUpload),
	};

	let range = sheets.worksheet_range(&first_sheet)?;
	let mut rows_iter = range.rows();

	let headers = match rows_iter.next() {
		Some(found) => found
			.iter()
			.map(|cell| normalize_header(&cell.to_string()))
			.collect::<Vec<_>>(),
		None => return Err(Error::EmptyUpload),
	};

	let rows = rows_iter
		.map(|each_row| each_row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>())
		.filter(|each_row| each_row.iter().any(|cell| !cell.trim().is_empty()))
		.collect();

	Ok(RawTable { headers, rows })
}

pub(super) fn require_column(table: &RawTable, name: &str) -> Result<usize> {
	table
		.column_index(name)
		.ok_or_else(|| Error::MissingColumn(name.to_string()))
}

fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
	row.get(index).map(|found| found.trim()).unwrap_or_default()
}

/// Whole numbers may arrive as "2021" or "2021.0" depending on the exporter.
fn parse_whole(raw: &str) -> Option<i32> {
	let value = raw.parse::<f64>().ok()?;
	if !value.is_finite() || value.fract() != 0.0 {
		return None;
	}

	i32::try_from(value as i64).ok()
}

pub(super) fn parse_year(row: &[String], index: usize, row_number: usize) -> Result<i32> {
	let raw = cell(row, index);
	parse_whole(raw).ok_or_else(|| Error::InvalidYear {
		row: row_number,
		value: raw.to_string(),
	})
}

pub(super) fn parse_whole_field(
	row: &[String],
	index: usize,
	column: &'static str,
	row_number: usize,
) -> Result<i32> {
	let raw = cell(row, index);
	parse_whole(raw).ok_or_else(|| Error::InvalidNumericField {
		row: row_number,
		column,
		value: raw.to_string(),
	})
}

pub(super) fn parse_number_field(
	row: &[String],
	index: usize,
	column: &'static str,
	row_number: usize,
) -> Result<f64> {
	let raw = cell(row, index);
	match raw.parse::<f64>() {
		Ok(ok) if ok.is_finite() => Ok(ok),
		_ => Err(Error::InvalidNumericField {
			row: row_number,
			column,
			value: raw.to_string(),
		}),
	}
}

pub(super) fn text_field(row: &[String], index: usize) -> String {
	row.get(index).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sniffs_semicolons() {
		let text = "ano;semana;departamento\n2021;3;LIMA\n2022;4;PIURA\n";
		assert_eq!(sniff_delimiter(text), b';');
	}

	#[test]
	fn sniffs_tabs_over_commas_inside_quotes() {
		let text = "ano\tdepartamento\n2021\t\"LIMA, CALLAO\"\n";
		assert_eq!(sniff_delimiter(text), b'\t');
	}

	#[test]
	fn sniff_defaults_to_comma() {
		assert_eq!(sniff_delimiter("ano\n2021\n"), b',');
		assert_eq!(sniff_delimiter(""), b',');
	}

	#[test]
	fn headers_are_trimmed_and_lowercased() {
		let table = read_delimited(b"\xEF\xBB\xBF ANO , Semana\n2021,1\n").unwrap();
		assert_eq!(table.headers, vec!["ano", "semana"]);
		assert_eq!(table.rows, vec![vec!["2021".to_string(), "1".to_string()]]);
	}

	#[test]
	fn blank_upload_is_empty() {
		assert!(matches!(read_delimited(b"  \n"), Err(Error::EmptyUpload)));
	}

	#[test]
	fn latin1_text_is_rejected() {
		let bytes = b"ano,departamento\n2021,HU\xC1NUCO\n";
		assert!(matches!(
			read_delimited(bytes),
			Err(Error::InvalidEncoding { offset: 24 })
		));
	}

	#[test]
	fn blank_rows_are_skipped() {
		let table = read_delimited(b"ano,semana\n2021,1\n,\n2022,2\n").unwrap();
		assert_eq!(table.rows.len(), 2);
	}

	#[test]
	fn whole_numbers_accept_float_notation() {
		let row = vec!["2021.0".to_string(), "2021.5".to_string(), "x".to_string()];
		assert_eq!(parse_year(&row, 0, 1).unwrap(), 2021);
		assert!(matches!(
			parse_year(&row, 1, 1),
			Err(Error::InvalidYear { row: 1, .. })
		));
		assert!(matches!(
			parse_whole_field(&row, 2, "semana", 7),
			Err(Error::InvalidNumericField {
				row: 7,
				column: "semana",
				..
			})
		));
	}

	#[test]
	fn file_kinds_follow_extension() {
		assert_eq!(source_kind_of("casos.CSV").unwrap(), SourceKind::Delimited);
		assert_eq!(source_kind_of("casos").unwrap(), SourceKind::Delimited);
		assert_eq!(source_kind_of("casos.xlsx").unwrap(), SourceKind::Spreadsheet);
		assert!(matches!(
			source_kind_of("casos.pdf"),
			Err(Error::UnsupportedFileType(found)) if found == "pdf"
		));
	}
}
