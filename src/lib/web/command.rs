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

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use super::helper::*;
use super::typedef::*;
use crate::error::Result;
use crate::report::command::{build_report, build_summary};
use crate::report::render::render_page;
use crate::typedef::ErrorInfo;

async fn index() -> Html<String> {
	Html(render_page(None, None))
}

async fn upload(mut multipart: Multipart) -> Response {
	let upload = match read_upload(&mut multipart).await {
		Ok(Some(found)) => found,
		Ok(None) => return page_response(StatusCode::OK, render_page(None, None)),
		Err(err) => {
			tracing::warn!(error = %err, "unreadable upload");
			let info = malformed_upload(&err);
			return page_response(err.status(), render_page(None, Some(&info)));
		}
	};

	let Upload { file_name, bytes } = upload;
	tracing::info!(file = %file_name, size = bytes.len(), "analysing upload");

	let built = tokio::task::spawn_blocking(move || build_report(bytes, &file_name)).await;
	match built {
		Ok(Ok(report)) => page_response(StatusCode::OK, render_page(Some(&report), None)),
		Ok(Err(err)) => {
			tracing::warn!(error = %err, "upload rejected");
			let info = ErrorInfo::from(&err);
			page_response(status_of(&err), render_page(None, Some(&info)))
		}
		Err(err) => {
			tracing::error!(error = %err, "report worker failed");
			let info = worker_failure(&err);
			page_response(
				StatusCode::INTERNAL_SERVER_ERROR,
				render_page(None, Some(&info)),
			)
		}
	}
}

async fn summary(mut multipart: Multipart) -> Response {
	let upload = match read_upload(&mut multipart).await {
		Ok(found) => found,
		Err(err) => return json_error(err.status(), malformed_upload(&err)),
	};

	let Upload { file_name, bytes } = upload.unwrap_or(Upload {
		file_name: String::new(),
		bytes: Vec::new(),
	});

	let built = tokio::task::spawn_blocking(move || build_summary(bytes, &file_name)).await;
	match built {
		Ok(Ok(found)) => Json(found).into_response(),
		Ok(Err(err)) => {
			tracing::warn!(error = %err, "summary rejected");
			json_error(status_of(&err), ErrorInfo::from(&err))
		}
		Err(err) => json_error(StatusCode::INTERNAL_SERVER_ERROR, worker_failure(&err)),
	}
}

async fn health() -> Json<serde_json::Value> {
	Json(serde_json::json!({
		"status": "alive",
		"version": env!("CARGO_PKG_VERSION")
	}))
}

pub fn router(config: &ServerConfig) -> Router {
	Router::new()
		.route("/", get(index).post(upload))
		.route("/api/summary", axum::routing::post(summary))
		.route("/health", get(health))
		.layer(DefaultBodyLimit::max(config.body_limit))
		.layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(config: ServerConfig) -> Result<()> {
	let app = router(&config);
	let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;

	tracing::info!(
		address = %listener.local_addr()?,
		body_limit = config.body_limit,
		"reporting form is up"
	);

	axum::serve(listener, app).await?;
	Ok(())
}
