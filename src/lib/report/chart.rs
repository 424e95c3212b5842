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

use plotters::prelude::*;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

const FRAGMENT_SIZE: (u32, u32) = (1000, 480);

fn chart_error<E: std::fmt::Display>(err: E) -> Error {
	Error::Chart(err.to_string())
}

fn year_color(index: usize) -> RGBAColor {
	Palette99::pick(index).to_rgba()
}

fn peak_of<'a, I: Iterator<Item = &'a usize>>(counts: I) -> f64 {
	(counts.cloned().max().unwrap_or_default() as f64 * 1.1f64).max(1f64)
}

/// Weekly cases, one line with markers per year.
pub(super) fn draw_trends(weekly: &BTreeMap<i32, BTreeMap<i32, usize>>) -> Result<String> {
	let first_week = weekly
		.values()
		.filter_map(|weeks| weeks.keys().next().cloned())
		.min()
		.unwrap_or(1);
	let last_week = weekly
		.values()
		.filter_map(|weeks| weeks.keys().last().cloned())
		.max()
		.unwrap_or(53)
		.max(first_week + 1);
	let peak = peak_of(weekly.values().flat_map(|weeks| weeks.values()));

	let mut svg = String::new();
	{
		let root = SVGBackend::with_string(&mut svg, FRAGMENT_SIZE).into_drawing_area();
		root.fill(&WHITE).map_err(chart_error)?;

		let mut chart = ChartBuilder::on(&root)
			.caption("Casos semanales de dengue", ("sans-serif", 22).into_font())
			.margin(15)
			.x_label_area_size(40)
			.y_label_area_size(60)
			.build_cartesian_2d(first_week..last_week, 0f64..peak)
			.map_err(chart_error)?;

		chart
			.configure_mesh()
			.x_desc("semana")
			.y_desc("cases")
			.draw()
			.map_err(chart_error)?;

		for (index, (year, weeks)) in weekly.iter().enumerate() {
			let color = year_color(index);
			let points = weeks
				.iter()
				.map(|(week, cases)| (*week, *cases as f64))
				.collect::<Vec<_>>();

			chart
				.draw_series(LineSeries::new(points.iter().cloned(), color.stroke_width(2)))
				.map_err(chart_error)?
				.label(year.to_string())
				.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color));

			chart
				.draw_series(
					points
						.iter()
						.map(|point| Circle::new(*point, 3, color.filled())),
				)
				.map_err(chart_error)?;
		}

		chart
			.configure_series_labels()
			.position(SeriesLabelPosition::UpperRight)
			.background_style(WHITE.mix(0.8))
			.border_style(BLACK)
			.draw()
			.map_err(chart_error)?;

		root.present().map_err(chart_error)?;
	}

	Ok(svg)
}

/// Horizontal bars, smallest department at the bottom, darker red for more cases.
pub(super) fn draw_department_totals(totals: &[(String, usize)]) -> Result<String> {
	let peak = peak_of(totals.iter().map(|(_, count)| count));
	let max_count = totals
		.iter()
		.map(|(_, count)| *count)
		.max()
		.unwrap_or(1)
		.max(1);
	let bar_count = totals.len().max(1) as i32;
	let height = FRAGMENT_SIZE.1.max(totals.len() as u32 * 22 + 100);

	let mut svg = String::new();
	{
		let root = SVGBackend::with_string(&mut svg, (FRAGMENT_SIZE.0, height)).into_drawing_area();
		root.fill(&WHITE).map_err(chart_error)?;

		let mut chart = ChartBuilder::on(&root)
			.caption("Casos totales por Departamento", ("sans-serif", 22).into_font())
			.margin(15)
			.x_label_area_size(40)
			.y_label_area_size(160)
			.build_cartesian_2d(0f64..peak, (0..bar_count).into_segmented())
			.map_err(chart_error)?;

		chart
			.configure_mesh()
			.disable_y_mesh()
			.y_labels(totals.len().max(1))
			.y_label_formatter(&|value: &SegmentValue<i32>| match value {
				SegmentValue::CenterOf(index) => totals
					.get(*index as usize)
					.map(|(name, _)| name.clone())
					.unwrap_or_default(),
				_ => String::new(),
			})
			.x_desc("Casos")
			.y_desc("Departamento")
			.draw()
			.map_err(chart_error)?;

		chart
			.draw_series(totals.iter().enumerate().map(|(index, (_, count))| {
				let strength = *count as f64 / max_count as f64;
				let fade = (230f64 - 200f64 * strength) as u8;
				let index = index as i32;

				Rectangle::new(
					[
						(0f64, SegmentValue::Exact(index)),
						(*count as f64, SegmentValue::Exact(index + 1)),
					],
					RGBColor(220, fade, fade).filled(),
				)
			}))
			.map_err(chart_error)?;

		root.present().map_err(chart_error)?;
	}

	Ok(svg)
}

/// Grouped bars: one group per month, one bar per year.
pub(super) fn draw_monthly(monthly: &BTreeMap<i32, BTreeMap<i32, usize>>) -> Result<String> {
	let first_month = monthly
		.values()
		.filter_map(|months| months.keys().next().cloned())
		.min()
		.unwrap_or(1)
		.min(1);
	let last_month = monthly
		.values()
		.filter_map(|months| months.keys().last().cloned())
		.max()
		.unwrap_or(12)
		.max(12);
	let peak = peak_of(monthly.values().flat_map(|months| months.values()));
	let bar_width = 0.8f64 / monthly.len().max(1) as f64;

	let mut svg = String::new();
	{
		let root = SVGBackend::with_string(&mut svg, FRAGMENT_SIZE).into_drawing_area();
		root.fill(&WHITE).map_err(chart_error)?;

		let mut chart = ChartBuilder::on(&root)
			.caption("Casos mensuales por año", ("sans-serif", 22).into_font())
			.margin(15)
			.x_label_area_size(40)
			.y_label_area_size(60)
			.build_cartesian_2d(
				(first_month as f64 - 0.5f64)..(last_month as f64 + 0.5f64),
				0f64..peak,
			)
			.map_err(chart_error)?;

		chart
			.configure_mesh()
			.disable_x_mesh()
			.x_labels((last_month - first_month + 1) as usize)
			.x_label_formatter(&|value| format!("{}", value.round() as i32))
			.x_desc("mes")
			.y_desc("cases")
			.draw()
			.map_err(chart_error)?;

		for (index, (year, months)) in monthly.iter().enumerate() {
			let color = year_color(index);
			let offset = -0.4f64 + bar_width * index as f64;

			chart
				.draw_series(months.iter().map(|(month, cases)| {
					let left = *month as f64 + offset;
					Rectangle::new([(left, 0f64), (left + bar_width, *cases as f64)], color.filled())
				}))
				.map_err(chart_error)?
				.label(year.to_string())
				.legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
		}

		chart
			.configure_series_labels()
			.position(SeriesLabelPosition::UpperRight)
			.background_style(WHITE.mix(0.8))
			.border_style(BLACK)
			.draw()
			.map_err(chart_error)?;

		root.present().map_err(chart_error)?;
	}

	Ok(svg)
}
