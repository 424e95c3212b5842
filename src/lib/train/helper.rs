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
	module::AutodiffModule,
	nn::loss::{MseLoss, Reduction::Mean},
	optim::{GradientsParams, Optimizer},
	tensor::{backend::AutodiffBackend, backend::Backend, ElementConversion, Int, Tensor, TensorData},
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::model::*;
use super::typedef::*;
use crate::preprocess::typedef::SequenceSet;

/// Packs windows into `[count, seq_length, 1]` and labels into `[count, 1]`.
pub(super) fn windows_to_tensors<B: Backend>(
	inputs: &[Vec<f64>],
	targets: &[f64],
	device: &B::Device,
) -> (Tensor<B, 3>, Tensor<B, 2>) {
	let seq_length = inputs.first().map(|found| found.len()).unwrap_or_default();

	let flatten_inputs = inputs
		.iter()
		.flatten()
		.map(|each| *each as f32)
		.collect::<Vec<_>>();
	let flatten_targets = targets.iter().map(|each| *each as f32).collect::<Vec<_>>();

	let input_tensor = Tensor::<B, 3>::from_data(
		TensorData::new(flatten_inputs, [inputs.len(), seq_length, 1]),
		device,
	);
	let target_tensor =
		Tensor::<B, 2>::from_data(TensorData::new(flatten_targets, [targets.len(), 1]), device);

	(input_tensor, target_tensor)
}

/// Keeps the chronological order: the last `validation_split` of the
/// training windows only monitors the loss.
pub(super) fn send_batches_to_device<B: AutodiffBackend>(
	train: &SequenceSet,
	validation_split: f64,
	device: &B::Device,
) -> TrainInput<B> {
	let total = train.len();
	let fit_count = ((total as f64 * (1f64 - validation_split)) as usize).clamp(1, total);

	let (train_tensor, train_target_tensor) = windows_to_tensors::<B>(
		&train.inputs[..fit_count],
		&train.targets[..fit_count],
		device,
	);

	let (valid_tensor, valid_target_tensor) = if fit_count < total {
		let (valid, valid_target) = windows_to_tensors::<B>(
			&train.inputs[fit_count..],
			&train.targets[fit_count..],
			device,
		);
		(Some(valid.valid()), Some(valid_target.valid()))
	} else {
		(None, None)
	};

	TrainInput {
		train_tensor,
		train_target_tensor,
		valid_tensor,
		valid_target_tensor,
	}
}

pub(super) fn train_new_model<B: AutodiffBackend>(
	input: TrainInput<B>,
	config: &TrainingConfig,
	device: &B::Device,
) -> (LstmNetwork<B>, TrainProgress) {
	B::seed(config.seed);
	let mut rng = StdRng::seed_from_u64(config.seed);

	let mut model = config.model.init::<B>(device);
	let mut optim = config.optimizer.init::<B, LstmNetwork<B>>();

	let train_count = input.train_count();
	let mut indices = (0..train_count as i64).collect::<Vec<_>>();
	let mut progress = TrainProgress {
		loss_points: Vec::with_capacity(config.num_epochs),
		end_x: config.num_epochs as u32,
	};

	for epoch in 1..=config.num_epochs {
		let mut train_loss = 0f64;

		// Training phase, mini-batches visited in a fresh order every epoch
		indices.shuffle(&mut rng);
		for chunk in indices.chunks(config.batch_size) {
			let selection = Tensor::<B, 1, Int>::from_data(
				TensorData::new(chunk.to_vec(), [chunk.len()]),
				device,
			);
			let batch = input.train_tensor.clone().select(0, selection.clone());
			let target = input.train_target_tensor.clone().select(0, selection);

			let output = model.forward(&batch, None).0;
			let loss = MseLoss::new().forward(output, target, Mean);
			train_loss += loss.clone().into_scalar().elem::<f64>() * chunk.len() as f64;

			let grads = loss.backward();
			let grads = GradientsParams::from_grads(grads, &model);
			model = optim.step(config.lr, model, grads);
		}

		// Validation phase
		let valid_loss = match (&input.valid_tensor, &input.valid_target_tensor) {
			(Some(valid), Some(valid_target)) => {
				let model = model.valid();
				let output = model.forward(valid, None).0;
				let loss = MseLoss::new().forward(output, valid_target.clone(), Mean);
				Some(loss.into_scalar().elem::<f64>())
			}
			_ => None,
		};

		let new_point = IterativePoint {
			x: epoch as u32,
			train_loss: (train_loss / train_count as f64) as f32,
			valid_loss: valid_loss.map(|found| found as f32),
		};

		tracing::debug!(
			epoch,
			train_loss = new_point.train_loss,
			valid_loss = ?new_point.valid_loss,
			"epoch finished"
		);

		progress.loss_points.push(new_point);
	}

	(model, progress)
}

#[cfg(test)]
mod tests {
	use super::*;
	use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};
	use burn::optim::AdamConfig;

	type TestBackend = Autodiff<NdArray>;

	fn sample_set(count: usize) -> SequenceSet {
		let series = (0..count + 4)
			.map(|each| (each as f64 / 10f64).sin().abs())
			.collect::<Vec<_>>();
		crate::preprocess::helper::create_sequences(&series, 4).unwrap()
	}

	#[test]
	fn tensors_keep_window_layout() {
		let device = NdArrayDevice::Cpu;
		let inputs = vec![vec![1f64, 2f64, 3f64], vec![2f64, 3f64, 4f64]];
		let targets = vec![4f64, 5f64];

		let (input, target) = windows_to_tensors::<NdArray>(&inputs, &targets, &device);
		assert_eq!(input.dims(), [2, 3, 1]);
		assert_eq!(target.dims(), [2, 1]);

		let values = input.into_data().iter::<f64>().collect::<Vec<_>>();
		assert_eq!(values, vec![1f64, 2f64, 3f64, 2f64, 3f64, 4f64]);
	}

	#[test]
	fn validation_holds_out_the_tail() {
		let device = NdArrayDevice::Cpu;
		let input = send_batches_to_device::<TestBackend>(&sample_set(20), 0.1, &device);

		assert_eq!(input.train_count(), 18);
		assert_eq!(input.valid_tensor.as_ref().map(|found| found.dims()[0]), Some(2));
	}

	#[test]
	fn single_window_has_no_validation() {
		let device = NdArrayDevice::Cpu;
		let input = send_batches_to_device::<TestBackend>(&sample_set(1), 0.1, &device);

		assert_eq!(input.train_count(), 1);
		assert!(input.valid_tensor.is_none());
	}

	#[test]
	fn validation_size_rounds_the_training_part_down() {
		let device = NdArrayDevice::Cpu;
		let input = send_batches_to_device::<TestBackend>(&sample_set(3), 0.1, &device);

		assert_eq!(input.train_count(), 2);
		assert_eq!(input.valid_tensor.as_ref().map(|found| found.dims()[0]), Some(1));
	}

	#[test]
	fn records_one_point_per_epoch() {
		let device = NdArrayDevice::Cpu;
		let config = TrainingConfig::new(
			LstmNetworkConfig::new().with_hidden_size(4),
			AdamConfig::new(),
		)
		.with_num_epochs(3)
		.with_batch_size(4);

		let input = send_batches_to_device::<TestBackend>(&sample_set(12), 0.25, &device);
		let (_, progress) = train_new_model(input, &config, &device);

		assert_eq!(progress.end_x, 3);
		assert_eq!(progress.loss_points.len(), 3);
		assert!(progress
			.loss_points
			.iter()
			.all(|each| each.train_loss.is_finite() && each.valid_loss.is_some()));
	}
}
