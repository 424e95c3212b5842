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

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use std::borrow::Cow;

use super::typedef::*;
use crate::error::Error;
use crate::typedef::ErrorInfo;

/// First non-empty file sent under the upload field, if any.
pub(super) async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, MultipartError> {
	while let Some(field) = multipart.next_field().await? {
		if field.name() != Some(UPLOAD_FIELD) {
			continue;
		}

		let file_name = field.file_name().unwrap_or_default().to_string();
		let bytes = field.bytes().await?;
		if file_name.is_empty() && bytes.is_empty() {
			return Ok(None);
		}

		return Ok(Some(Upload {
			file_name,
			bytes: bytes.to_vec(),
		}));
	}

	Ok(None)
}

pub(super) fn status_of(err: &Error) -> StatusCode {
	if err.is_input_error() {
		StatusCode::UNPROCESSABLE_ENTITY
	} else {
		StatusCode::INTERNAL_SERVER_ERROR
	}
}

pub(super) fn malformed_upload(err: &MultipartError) -> ErrorInfo {
	ErrorInfo {
		title: Cow::Borrowed("Malformed Upload"),
		message: err.body_text(),
	}
}

pub(super) fn worker_failure(err: &tokio::task::JoinError) -> ErrorInfo {
	ErrorInfo {
		title: Cow::Borrowed("Analysis Interrupted"),
		message: err.to_string(),
	}
}

pub(super) fn page_response(status: StatusCode, body: String) -> Response {
	(status, Html(body)).into_response()
}

pub(super) fn json_error(status: StatusCode, info: ErrorInfo) -> Response {
	(status, Json(info)).into_response()
}
