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

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dengue_patterns_lib::evaluate::command::{parse_end_date, run_forecast, DEFAULT_END_DATE};
use dengue_patterns_lib::train::command::{default_training_config, load_training_config};
use dengue_patterns_lib::typedef::ForecastOptions;
use dengue_patterns_lib::web::command::serve;
use dengue_patterns_lib::web::typedef::*;

#[derive(Parser)]
#[command(name = "dengue-patterns")]
#[command(about = "Dengue case reporting and LSTM forecasting", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the reporting web form
	Serve {
		#[arg(long, env = "DENGUE_HOST", default_value = DEFAULT_HOST)]
		host: String,

		#[arg(short, long, env = "DENGUE_PORT", default_value_t = DEFAULT_PORT)]
		port: u16,

		/// Largest accepted upload, in bytes
		#[arg(long, env = "DENGUE_BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
		body_limit: usize,
	},

	/// Train on weekly case counts and extrapolate up to a target date
	Forecast {
		/// Case file (CSV or spreadsheet) with `ano` and `semana` columns
		#[arg(short, long)]
		input: PathBuf,

		/// Last date to forecast
		#[arg(short, long, default_value = DEFAULT_END_DATE)]
		until: String,

		#[arg(long, default_value_t = 12)]
		seq_length: usize,

		/// Fraction of windows used for training, the rest is held out
		#[arg(long, default_value_t = 0.8)]
		train_ratio: f64,

		/// Directory receiving the holdout and forecast charts
		#[arg(short, long, default_value = "output")]
		output_dir: PathBuf,

		/// Also write the future predictions as CSV
		#[arg(short, long)]
		export: Option<PathBuf>,

		/// JSON hyperparameters replacing the built-in defaults
		#[arg(long)]
		training_config: Option<PathBuf>,

		#[arg(long)]
		epochs: Option<usize>,

		#[arg(long)]
		batch_size: Option<usize>,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenvy::dotenv().ok();

	tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer())
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "dengue_patterns=info,dengue_patterns_lib=info,tower_http=info".into()),
		)
		.init();

	match Cli::parse().command {
		Commands::Serve {
			host,
			port,
			body_limit,
		} => {
			let config = ServerConfig {
				host,
				port,
				body_limit,
			};
			serve(config).await.context("reporting server stopped")?;
		}
		Commands::Forecast {
			input,
			until,
			seq_length,
			train_ratio,
			output_dir,
			export,
			training_config,
			epochs,
			batch_size,
		} => {
			let mut training = match &training_config {
				Some(path) => load_training_config(path)
					.with_context(|| format!("cannot load {}", path.display()))?,
				None => default_training_config(),
			};
			if let Some(found) = epochs {
				training.num_epochs = found;
			}
			if let Some(found) = batch_size {
				training.batch_size = found;
			}

			let options = ForecastOptions {
				input_path: input,
				end_date: parse_end_date(&until)?,
				seq_length,
				train_ratio,
				output_dir,
				export_path: export,
				training,
			};

			let report = tokio::task::spawn_blocking(move || run_forecast(&options))
				.await
				.context("forecast worker failed")?
				.context("forecast failed")?;

			println!("RMSE LSTM: {:.2}", report.rmse);
		}
	}

	Ok(())
}
