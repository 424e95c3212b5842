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

use burn::{
	backend::NdArray,
	optim::AdamConfig,
	tensor::{backend::AutodiffBackend, Tensor},
};
use serde::Serialize;

use super::model::*;

/// Loss after one epoch. `valid_loss` is absent when the training split was
/// too small to hold anything out.
#[derive(Default, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IterativePoint {
	pub x: u32,
	pub train_loss: f32,
	pub valid_loss: Option<f32>,
}

#[derive(Default, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TrainProgress {
	pub loss_points: Vec<IterativePoint>,
	pub end_x: u32,
}

#[derive(burn::config::Config)]
pub struct TrainingConfig {
	pub model: LstmNetworkConfig,
	pub optimizer: AdamConfig,

	#[config(default = 50)]
	pub num_epochs: usize,

	#[config(default = 16)]
	pub batch_size: usize,

	/// Tail fraction of the training windows used only to monitor validation loss.
	#[config(default = 0.1)]
	pub validation_split: f64,

	#[config(default = 42)]
	pub seed: u64,

	#[config(default = 1e-3)]
	pub lr: f64,
}

pub(super) struct TrainInput<B: AutodiffBackend> {
	pub train_tensor: Tensor<B, 3>,
	pub train_target_tensor: Tensor<B, 2>,
	pub valid_tensor: Option<Tensor<B::InnerBackend, 3>>,
	pub valid_target_tensor: Option<Tensor<B::InnerBackend, 2>>,
}

impl<B: AutodiffBackend> TrainInput<B> {
	pub fn train_count(&self) -> usize {
		self.train_tensor.dims()[0]
	}
}

pub struct TrainedModel {
	pub network: LstmNetwork<NdArray>,
	pub progress: TrainProgress,
}
