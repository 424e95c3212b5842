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

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

use super::typedef::ComparisonPoint;
use crate::error::{Error, Result};

const CHART_SIZE: (u32, u32) = (1200, 600);

struct LineSpec<'a> {
	label: &'a str,
	color: RGBColor,
	points: Vec<(NaiveDate, f64)>,
}

fn chart_error<E: std::fmt::Display>(err: E) -> Error {
	Error::Chart(err.to_string())
}

fn draw_lines(path: &Path, title: &str, lines: &[LineSpec<'_>]) -> Result<()> {
	let all_points = lines.iter().flat_map(|each| each.points.iter());

	let (start, end, low, high) = all_points.fold(
		(NaiveDate::MAX, NaiveDate::MIN, f64::MAX, f64::MIN),
		|(start, end, low, high), (x, y)| (start.min(*x), end.max(*x), low.min(*y), high.max(*y)),
	);

	if start > end {
		return Err(Error::Chart(format!("nothing to draw in \"{}\"", title)));
	}

	// Plotters needs a non-empty range on both axes
	let end = if start == end { end + Duration::days(7) } else { end };
	let padding = ((high - low) * 0.05f64).max(1f64);

	let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
	root.fill(&WHITE).map_err(chart_error)?;

	let mut chart = ChartBuilder::on(&root)
		.caption(title, ("sans-serif", 24).into_font())
		.margin(20)
		.x_label_area_size(50)
		.y_label_area_size(70)
		.build_cartesian_2d(start..end, (low - padding)..(high + padding))
		.map_err(chart_error)?;

	chart
		.configure_mesh()
		.x_desc("Fecha")
		.y_desc("Casos")
		.x_label_formatter(&|x| x.format("%Y-%m").to_string())
		.draw()
		.map_err(chart_error)?;

	for each in lines {
		let color = each.color;
		chart
			.draw_series(LineSeries::new(each.points.iter().cloned(), &color))
			.map_err(chart_error)?
			.label(each.label)
			.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color));
	}

	chart
		.configure_series_labels()
		.position(SeriesLabelPosition::UpperLeft)
		.background_style(WHITE.mix(0.8))
		.border_style(BLACK)
		.draw()
		.map_err(chart_error)?;

	root.present().map_err(chart_error)?;

	Ok(())
}

fn observed(points: &[ComparisonPoint]) -> Vec<(NaiveDate, f64)> {
	points
		.iter()
		.filter_map(|each| Some((each.x, each.y0?)))
		.collect()
}

fn predicted(points: &[ComparisonPoint]) -> Vec<(NaiveDate, f64)> {
	points
		.iter()
		.filter_map(|each| Some((each.x, each.y1?)))
		.collect()
}

/// Real versus predicted cases over the evaluation windows.
pub(super) fn draw_holdout(path: &Path, holdout: &[ComparisonPoint]) -> Result<()> {
	draw_lines(
		path,
		"Predicción LSTM de casos de dengue (test set)",
		&[
			LineSpec {
				label: "Real",
				color: BLUE,
				points: observed(holdout),
			},
			LineSpec {
				label: "Predicción",
				color: RED,
				points: predicted(holdout),
			},
		],
	)
}

/// The whole history followed by the extrapolated weeks.
pub(super) fn draw_forecast(
	path: &Path,
	history: &[ComparisonPoint],
	forecast: &[ComparisonPoint],
	end_year: i32,
) -> Result<()> {
	let future_label = format!("Predicción hasta {}", end_year);
	draw_lines(
		path,
		&format!("Predicción LSTM de casos de dengue - Hasta {}", end_year),
		&[
			LineSpec {
				label: "Datos reales",
				color: BLUE,
				points: observed(history),
			},
			LineSpec {
				label: &future_label,
				color: RED,
				points: predicted(forecast),
			},
		],
	)
}
