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

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::Autodiff;
use burn::backend::NdArray;
use burn::config::Config;
use burn::module::AutodiffModule;
use burn::grad_clipping::GradientClippingConfig;
use burn::optim::AdamConfig;
use std::path::Path;

use super::helper::*;
use super::model::LstmNetworkConfig;
use super::typedef::*;
use crate::error::{Error, Result};
use crate::preprocess::typedef::SequenceSet;

/// Adam with the gradient norm clipped at 1 and every other value at its default.
pub fn default_training_config() -> TrainingConfig {
	let optimizer = AdamConfig::new().with_grad_clipping(Some(GradientClippingConfig::Norm(1.0)));
	TrainingConfig::new(LstmNetworkConfig::new(), optimizer)
}

/// Reads hyperparameters from a JSON file written in the `TrainingConfig` layout.
pub fn load_training_config(path: &Path) -> Result<TrainingConfig> {
	TrainingConfig::load(path).map_err(|err| Error::Config(format!("{:?}", err)))
}

fn validate(config: &TrainingConfig) -> Result<()> {
	if config.num_epochs == 0 {
		return Err(Error::Config(String::from("at least one epoch is required")));
	}

	if config.batch_size == 0 {
		return Err(Error::Config(String::from("batch size must be positive")));
	}

	if !(0f64..1f64).contains(&config.validation_split) {
		return Err(Error::Config(format!(
			"validation split must be in [0, 1), got {}",
			config.validation_split
		)));
	}

	Ok(())
}

/// Trains a fresh network on the training windows. The model lives in memory
/// only and is dropped with the returned value.
pub fn start_train(train: &SequenceSet, config: &TrainingConfig) -> Result<TrainedModel> {
	validate(config)?;

	if train.is_empty() {
		return Err(Error::InsufficientWindows { windows: 0 });
	}

	let device = NdArrayDevice::Cpu;

	tracing::info!(
		windows = train.len(),
		epochs = config.num_epochs,
		batch_size = config.batch_size,
		"training started"
	);

	let input = send_batches_to_device::<Autodiff<NdArray>>(train, config.validation_split, &device);
	let (trained_model, progress) = train_new_model(input, config, &device);

	if let Some(last) = progress.loss_points.last() {
		tracing::info!(
			train_loss = last.train_loss,
			valid_loss = ?last.valid_loss,
			"training finished"
		);
	}

	Ok(TrainedModel {
		network: trained_model.valid(),
		progress,
	})
}
