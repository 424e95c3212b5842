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

pub const DEFAULT_HOST: &'static str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Form field carrying the uploaded file.
pub const UPLOAD_FIELD: &'static str = "csvfile";

#[derive(Clone, Debug)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Largest accepted request body, in bytes.
	pub body_limit: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		ServerConfig {
			host: String::from(DEFAULT_HOST),
			port: DEFAULT_PORT,
			body_limit: DEFAULT_BODY_LIMIT,
		}
	}
}

pub(super) struct Upload {
	pub file_name: String,
	pub bytes: Vec<u8>,
}
