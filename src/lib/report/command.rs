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

use super::chart::*;
use super::helper::*;
use super::typedef::*;
use crate::data::command::{parse_case_records, read_table};
use crate::error::Result;
use crate::typedef::{CaseRecord, REPORT_YEARS};

fn load_report_records(bytes: Vec<u8>, file_name: &str) -> Result<Vec<CaseRecord>> {
	let table = read_table(bytes, file_name)?;
	let records = parse_case_records(&table, &REPORT_YEARS)?;
	tracing::info!(
		file = file_name,
		rows = table.rows.len(),
		kept = records.len(),
		"records filtered to reporting years"
	);

	Ok(records)
}

/// Builds the whole results page content from an uploaded file.
pub fn build_report(bytes: Vec<u8>, file_name: &str) -> Result<Report> {
	let records = load_report_records(bytes, file_name)?;

	let trends_plot = draw_trends(&weekly_counts_by_year(&records))?;
	let total_by_department_plot = draw_department_totals(&department_totals(&records))?;
	let monthly_plot = draw_monthly(&monthly_counts_by_year(&records))?;

	Ok(Report {
		summary: summarize(&records),
		trends_plot,
		total_by_department_plot,
		monthly_plot,
		age_table: age_table(&records),
		monthly_table: monthly_table(&records),
		department_table: department_table(&records),
	})
}

/// Counts only, for callers that don't need charts or tables.
pub fn build_summary(bytes: Vec<u8>, file_name: &str) -> Result<Summary> {
	let records = load_report_records(bytes, file_name)?;
	Ok(summarize(&records))
}
