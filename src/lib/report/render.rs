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

use std::fmt::Write;

use super::typedef::*;
use crate::typedef::ErrorInfo;

const TABLE_CLASSES: &'static str = "table table-bordered table-striped";

const PAGE_HEAD: &'static str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Dengue Perú - Series de Tiempo</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>
        body { padding: 20px; background-color: #f8f9fa; }
        .chart svg { width: 100%; height: auto; border: 1px solid #ddd; border-radius: 8px; background: white; }
        table { margin-top: 20px; }
        th, td { text-align: center; }
    </style>
</head>
<body>
<div class="container">
    <h1 class="text-center mb-4">Reconocimiento de Patrones - Dengue Perú</h1>
    <form method="post" enctype="multipart/form-data">
        <div class="mb-3">
            <label for="csvfile" class="form-label">Sube tu archivo CSV</label>
            <input class="form-control" type="file" name="csvfile" required>
        </div>
        <button class="btn btn-primary" type="submit">Cargar y Analizar</button>
    </form>
"#;

const PAGE_TAIL: &'static str = "</div>\n</body>\n</html>\n";

pub(crate) fn escape_html(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());
	for each in raw.chars() {
		match each {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(each),
		}
	}
	escaped
}

fn table_html(headers: &[String], rows: &[Vec<String>]) -> String {
	let mut html = format!("<table class=\"{}\">\n<thead><tr>", TABLE_CLASSES);
	for each in headers {
		let _ = write!(html, "<th>{}</th>", escape_html(each));
	}
	html.push_str("</tr></thead>\n<tbody>\n");

	for each_row in rows {
		html.push_str("<tr>");
		for each in each_row {
			let _ = write!(html, "<td>{}</td>", escape_html(each));
		}
		html.push_str("</tr>\n");
	}

	html.push_str("</tbody>\n</table>\n");
	html
}

pub(super) fn age_table_html(rows: &[AgeRow]) -> String {
	let headers = ["grupo_edad", "Totales", "Graves", "F", "M", "%"]
		.iter()
		.map(|each| each.to_string())
		.collect::<Vec<_>>();

	let rows = rows
		.iter()
		.map(|row| {
			vec![
				row.group.to_string(),
				row.total.to_string(),
				row.severe.to_string(),
				row.female.to_string(),
				row.male.to_string(),
				row.percent.clone(),
			]
		})
		.collect::<Vec<_>>();

	table_html(&headers, &rows)
}

pub(super) fn monthly_table_html(table: &MonthlyTable) -> String {
	let headers = std::iter::once(String::from("Mes"))
		.chain(table.years.iter().map(|year| year.to_string()))
		.collect::<Vec<_>>();

	let rows = table
		.rows
		.iter()
		.map(|(label, per_year)| {
			std::iter::once(label.clone())
				.chain(per_year.iter().map(|count| count.to_string()))
				.collect::<Vec<_>>()
		})
		.collect::<Vec<_>>();

	table_html(&headers, &rows)
}

pub(super) fn department_table_html(table: &DepartmentTable) -> String {
	let headers = std::iter::once(String::from("departamento"))
		.chain(table.years.iter().map(|year| year.to_string()))
		.chain([String::from("Total"), String::from("Graves")])
		.collect::<Vec<_>>();

	let rows = table
		.rows
		.iter()
		.map(|row| {
			std::iter::once(row.department.clone())
				.chain(row.per_year.iter().map(|count| count.to_string()))
				.chain([row.total.to_string(), row.severe.to_string()])
				.collect::<Vec<_>>()
		})
		.collect::<Vec<_>>();

	table_html(&headers, &rows)
}

fn summary_html(summary: &Summary) -> String {
	let mut html = String::from("    <hr>\n    <h3>Resumen Estadístico</h3>\n");
	let _ = writeln!(
		html,
		"    <p><strong>Total de casos:</strong> {}</p>",
		summary.total_cases
	);

	html.push_str("    <div class=\"row\">\n        <div class=\"col-md-6\">\n            <h5>Casos por Año</h5>\n            <ul>\n");
	for (year, count) in &summary.cases_by_year {
		let _ = writeln!(html, "                <li><strong>{}:</strong> {}</li>", year, count);
	}
	html.push_str("            </ul>\n        </div>\n        <div class=\"col-md-6\">\n            <h5>Top 5 Departamentos</h5>\n            <ul>\n");
	for (department, count) in &summary.top_departments {
		let _ = writeln!(
			html,
			"                <li><strong>{}:</strong> {}</li>",
			escape_html(department),
			count
		);
	}
	html.push_str("            </ul>\n        </div>\n    </div>\n");

	html
}

fn report_html(report: &Report) -> String {
	let mut html = summary_html(&report.summary);

	let sections = [
		("<hr>\n    <h3>Casos Semanales por Año</h3>", &report.trends_plot),
		("<h3>Casos Totales por Departamento</h3>", &report.total_by_department_plot),
		("<h3>Casos Mensuales por Año</h3>", &report.monthly_plot),
	];
	for (title, svg) in sections {
		let _ = writeln!(html, "    {}\n    <div class=\"chart\">{}</div>", title, svg);
	}

	let _ = writeln!(
		html,
		"    <hr>\n    <h3>Tabla I - Distribución por Edad, Severidad y Género</h3>\n{}",
		age_table_html(&report.age_table)
	);
	let _ = writeln!(
		html,
		"    <h3>Tabla II - Casos Mensuales de Dengue en Perú (2020–2023)</h3>\n{}",
		monthly_table_html(&report.monthly_table)
	);
	let _ = writeln!(
		html,
		"    <h3>Tabla III - Casos por Departamento, Año y Gravedad</h3>\n{}",
		department_table_html(&report.department_table)
	);

	html
}

fn error_html(error: &ErrorInfo) -> String {
	format!(
		"    <div class=\"alert alert-danger mt-4\" role=\"alert\">\n        <h4 class=\"alert-heading\">{}</h4>\n        <p class=\"mb-0\">{}</p>\n    </div>\n",
		escape_html(&error.title),
		escape_html(&error.message)
	)
}

/// The upload form, followed by either the analysis or a titled error.
pub fn render_page(report: Option<&Report>, error: Option<&ErrorInfo>) -> String {
	let mut html = String::from(PAGE_HEAD);

	if let Some(found) = error {
		html.push_str(&error_html(found));
	}

	if let Some(found) = report {
		html.push_str(&report_html(found));
	}

	html.push_str(PAGE_TAIL);
	html
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::borrow::Cow;

	#[test]
	fn escapes_markup() {
		assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
	}

	#[test]
	fn blank_page_has_only_the_form() {
		let html = render_page(None, None);
		assert!(html.contains("name=\"csvfile\""));
		assert!(!html.contains("Resumen Estadístico"));
		assert!(!html.contains("alert-danger"));
	}

	#[test]
	fn error_is_shown_above_the_form_result() {
		let error = ErrorInfo {
			title: Cow::Borrowed("Missing Column"),
			message: String::from("Required column \"edad\" is missing"),
		};
		let html = render_page(None, Some(&error));
		assert!(html.contains("Missing Column"));
		assert!(html.contains("&quot;edad&quot;"));
	}

	#[test]
	fn department_table_has_total_and_severe_columns() {
		let table = DepartmentTable {
			years: vec![2021, 2022],
			rows: vec![DepartmentRow {
				department: String::from("LIMA"),
				per_year: vec![3, 4],
				total: 7,
				severe: 2,
			}],
		};

		let html = department_table_html(&table);
		assert!(html.contains("<th>departamento</th><th>2021</th><th>2022</th><th>Total</th><th>Graves</th>"));
		assert!(html.contains("<td>LIMA</td><td>3</td><td>4</td><td>7</td><td>2</td>"));
	}
}
