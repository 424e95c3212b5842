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

use std::collections::{BTreeMap, BTreeSet, HashMap};
use strum::IntoEnumIterator;

use super::typedef::*;
use crate::typedef::CaseRecord;

const SEVERE_MARKERS: [&'static str; 2] = ["CON SIGNOS", "GRAVE"];

/// Coarse month of an epidemiological week, assuming four weeks per month.
/// Downstream tables rely on this exact mapping, including the clip at 12.
pub(super) fn derive_month(week: i32) -> i32 {
	((week - 1).div_euclid(4) + 1).min(12)
}

pub(super) fn month_of(record: &CaseRecord) -> i32 {
	record.month.unwrap_or_else(|| derive_month(record.week))
}

pub(super) fn is_severe(diagnosis: &str) -> bool {
	let diagnosis = diagnosis.to_uppercase();
	SEVERE_MARKERS.iter().any(|marker| diagnosis.contains(marker))
}

pub(super) fn age_group_of(age: f64) -> Option<AgeGroup> {
	AgeGroup::iter().find(|group| {
		let (lower, upper) = group.bounds();
		age > lower && age <= upper
	})
}

/// Counts per key, largest first, ties broken by key.
fn ranked_counts<'a, I: Iterator<Item = &'a str>>(keys: I) -> Vec<(String, usize)> {
	let mut counter = HashMap::<&str, usize>::new();
	keys.for_each(|each| *counter.entry(each).or_default() += 1);

	let mut ranked = counter
		.into_iter()
		.map(|(key, count)| (key.to_string(), count))
		.collect::<Vec<_>>();
	ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
	ranked
}

pub(super) fn summarize(records: &[CaseRecord]) -> Summary {
	let mut cases_by_year = BTreeMap::<i32, usize>::new();
	records
		.iter()
		.for_each(|each| *cases_by_year.entry(each.year).or_default() += 1);

	let mut top_departments = ranked_counts(records.iter().map(|each| each.department.as_str()));
	top_departments.truncate(TOP_DEPARTMENTS);

	Summary {
		total_cases: records.len(),
		cases_by_year: cases_by_year.into_iter().collect(),
		top_departments,
	}
}

/// Department totals, smallest first, ready for a horizontal bar chart.
pub(super) fn department_totals(records: &[CaseRecord]) -> Vec<(String, usize)> {
	let mut totals = ranked_counts(records.iter().map(|each| each.department.as_str()));
	totals.reverse();
	totals
}

/// `year -> week -> cases`
pub(super) fn weekly_counts_by_year(records: &[CaseRecord]) -> BTreeMap<i32, BTreeMap<i32, usize>> {
	let mut counter = BTreeMap::<i32, BTreeMap<i32, usize>>::new();
	for each in records {
		*counter
			.entry(each.year)
			.or_default()
			.entry(each.week)
			.or_default() += 1;
	}
	counter
}

/// `year -> month -> cases`
pub(super) fn monthly_counts_by_year(records: &[CaseRecord]) -> BTreeMap<i32, BTreeMap<i32, usize>> {
	let mut counter = BTreeMap::<i32, BTreeMap<i32, usize>>::new();
	for each in records {
		*counter
			.entry(each.year)
			.or_default()
			.entry(month_of(each))
			.or_default() += 1;
	}
	counter
}

/// Share of the total rounded to two decimals, printed like `12.5%` or `50.0%`.
pub(super) fn format_percent(part: usize, total: usize) -> String {
	if total == 0 {
		return String::from("0.0%");
	}

	let rounded = (part as f64 * 100f64 / total as f64 * 100f64).round() / 100f64;
	if rounded.fract() == 0f64 {
		format!("{:.1}%", rounded)
	} else {
		let text = format!("{:.2}", rounded);
		format!("{}%", text.trim_end_matches('0'))
	}
}

/// Table I: age group against severity and sex. Ages outside every bin are left out.
pub(super) fn age_table(records: &[CaseRecord]) -> Vec<AgeRow> {
	let mut rows = AgeGroup::iter()
		.map(|group| AgeRow {
			group,
			total: 0,
			severe: 0,
			female: 0,
			male: 0,
			percent: String::new(),
		})
		.collect::<Vec<_>>();

	for each in records {
		let group = match age_group_of(each.age) {
			Some(found) => found,
			None => continue,
		};

		if let Some(row) = rows.iter_mut().find(|row| row.group == group) {
			row.total += 1;
			row.severe += is_severe(&each.diagnosis) as usize;
			row.female += (each.sex == "F") as usize;
			row.male += (each.sex == "M") as usize;
		}
	}

	let grand_total = rows.iter().map(|row| row.total).sum::<usize>();
	rows.iter_mut()
		.for_each(|row| row.percent = format_percent(row.total, grand_total));

	rows
}

/// Table II: one row per calendar month, one column per year. Month values
/// outside 1..=12 get their own numbered rows after December.
pub(super) fn monthly_table(records: &[CaseRecord]) -> MonthlyTable {
	let counts = monthly_counts_by_year(records);
	let years = counts.keys().cloned().collect::<Vec<_>>();

	let extra_months = counts
		.values()
		.flat_map(|months| months.keys().cloned())
		.filter(|month| !(1..=12).contains(month))
		.collect::<BTreeSet<_>>();

	let rows = (1..=12)
		.map(|month| (MONTH_NAMES[(month - 1) as usize].to_string(), month))
		.chain(extra_months.into_iter().map(|month| (month.to_string(), month)))
		.map(|(label, month)| {
			let per_year = years
				.iter()
				.map(|year| {
					counts
						.get(year)
						.and_then(|months| months.get(&month))
						.cloned()
						.unwrap_or_default()
				})
				.collect::<Vec<_>>();
			(label, per_year)
		})
		.collect();

	MonthlyTable { years, rows }
}

/// Table III: departments in alphabetical order with per-year counts, the
/// overall total and the severe cases.
pub(super) fn department_table(records: &[CaseRecord]) -> DepartmentTable {
	let years = records
		.iter()
		.map(|each| each.year)
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect::<Vec<_>>();

	let mut grouped = BTreeMap::<&str, (BTreeMap<i32, usize>, usize)>::new();
	for each in records {
		let (per_year, severe) = grouped.entry(each.department.as_str()).or_default();
		*per_year.entry(each.year).or_default() += 1;
		*severe += is_severe(&each.diagnosis) as usize;
	}

	let rows = grouped
		.into_iter()
		.map(|(department, (per_year, severe))| {
			let per_year = years
				.iter()
				.map(|year| per_year.get(year).cloned().unwrap_or_default())
				.collect::<Vec<_>>();

			DepartmentRow {
				department: department.to_string(),
				total: per_year.iter().sum(),
				per_year,
				severe,
			}
		})
		.collect();

	DepartmentTable { years, rows }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(year: i32, week: i32, department: &str, age: f64, sex: &str, diagnosis: &str) -> CaseRecord {
		CaseRecord {
			year,
			week,
			department: department.to_string(),
			age,
			sex: sex.to_string(),
			diagnosis: diagnosis.to_string(),
			month: None,
		}
	}

	fn sample() -> Vec<CaseRecord> {
		vec![
			record(2021, 1, "LIMA", 0.0, "F", "DENGUE SIN SIGNOS DE ALARMA"),
			record(2021, 5, "LIMA", 3.0, "M", "DENGUE CON SIGNOS DE ALARMA"),
			record(2022, 52, "PIURA", 30.0, "F", "dengue grave"),
			record(2022, 9, "TUMBES", 61.0, "M", "DENGUE SIN SIGNOS DE ALARMA"),
			record(2023, 9, "PIURA", 200.0, "F", "DENGUE SIN SIGNOS DE ALARMA"),
		]
	}

	#[test]
	fn months_follow_four_week_blocks() {
		assert_eq!(derive_month(1), 1);
		assert_eq!(derive_month(4), 1);
		assert_eq!(derive_month(5), 2);
		assert_eq!(derive_month(48), 12);
		assert_eq!(derive_month(49), 12);
		assert_eq!(derive_month(53), 12);
		assert_eq!(derive_month(0), 0);
	}

	#[test]
	fn provided_month_wins() {
		let mut case = record(2021, 52, "LIMA", 1.0, "F", "");
		case.month = Some(3);
		assert_eq!(month_of(&case), 3);
	}

	#[test]
	fn severity_markers_ignore_case() {
		assert!(is_severe("Dengue con signos de alarma"));
		assert!(is_severe("DENGUE GRAVE"));
		assert!(!is_severe("DENGUE SIN SIGNOS DE ALARMA"));
	}

	#[test]
	fn ages_fall_in_right_closed_bins() {
		assert_eq!(age_group_of(0.0), Some(AgeGroup::Infant));
		assert_eq!(age_group_of(0.5), Some(AgeGroup::Toddler));
		assert_eq!(age_group_of(4.0), Some(AgeGroup::Toddler));
		assert_eq!(age_group_of(60.0), Some(AgeGroup::Senior));
		assert_eq!(age_group_of(-1.0), None);
		assert_eq!(age_group_of(151.0), None);
	}

	#[test]
	fn summary_counts() {
		let summary = summarize(&sample());
		assert_eq!(summary.total_cases, 5);
		assert_eq!(summary.cases_by_year, vec![(2021, 2), (2022, 2), (2023, 1)]);
		assert_eq!(
			summary.top_departments,
			vec![
				(String::from("LIMA"), 2),
				(String::from("PIURA"), 2),
				(String::from("TUMBES"), 1)
			]
		);
	}

	#[test]
	fn percentages_print_like_the_report() {
		assert_eq!(format_percent(1, 2), "50.0%");
		assert_eq!(format_percent(1, 3), "33.33%");
		assert_eq!(format_percent(1, 8), "12.5%");
		assert_eq!(format_percent(0, 0), "0.0%");
	}

	#[test]
	fn age_table_has_every_group() {
		let table = age_table(&sample());
		assert_eq!(table.len(), 6);

		let infant = &table[0];
		assert_eq!((infant.total, infant.severe, infant.female, infant.male), (1, 0, 1, 0));
		let toddler = &table[1];
		assert_eq!((toddler.total, toddler.severe, toddler.male), (1, 1, 1));
		assert_eq!(table[2].total, 0);
		// The 200 year old is outside every bin
		assert_eq!(table.iter().map(|row| row.total).sum::<usize>(), 4);
		assert_eq!(infant.percent, "25.0%");
	}

	#[test]
	fn monthly_table_lists_all_months() {
		let table = monthly_table(&sample());
		assert_eq!(table.years, vec![2021, 2022, 2023]);
		assert_eq!(table.rows.len(), 12);
		assert_eq!(table.rows[0], (String::from("Enero"), vec![1, 0, 0]));
		assert_eq!(table.rows[1], (String::from("Febrero"), vec![1, 0, 0]));
		assert_eq!(table.rows[2], (String::from("Marzo"), vec![0, 1, 1]));
		assert_eq!(table.rows[11], (String::from("Diciembre"), vec![0, 1, 0]));
	}

	#[test]
	fn week_zero_gets_its_own_month_row() {
		let table = monthly_table(&[record(2021, 0, "LIMA", 1.0, "F", "")]);
		assert_eq!(table.rows.len(), 13);
		assert_eq!(table.rows[12], (String::from("0"), vec![1]));
	}

	#[test]
	fn department_table_totals() {
		let table = department_table(&sample());
		assert_eq!(table.years, vec![2021, 2022, 2023]);

		let piura = &table.rows[1];
		assert_eq!(piura.department, "PIURA");
		assert_eq!(piura.per_year, vec![0, 1, 1]);
		assert_eq!(piura.total, 2);
		assert_eq!(piura.severe, 1);
	}

	#[test]
	fn department_totals_ascend() {
		let totals = department_totals(&sample());
		assert_eq!(totals.first().map(|found| found.0.as_str()), Some("TUMBES"));
		assert_eq!(totals.last().map(|found| found.1), Some(2));
	}
}
