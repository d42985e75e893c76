use std::time::Instant;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::activation::sigmoid_prime;
use crate::data::row::DataRow;
use crate::error::NetError;
use crate::neuron::Neuron;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Construction-time parameters for a `Network`.
///
/// The seed feeds the weight-initialization RNG, so two networks built from
/// the same topology and config start with identical weights.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub learning_rate: f64,
    /// Fixed bias input of every neuron.
    pub bias: f64,
    /// Initial weight applied to the bias input.
    pub bias_weight: f64,
    pub seed: u64,
    /// When set, `train` emits one `epoch,error` line per epoch at info level.
    pub verbose: bool,
}

/// A fully-connected feed-forward network of sigmoid neurons.
///
/// The topology lists layer widths from input to output. The input layer
/// contributes width only, so no neuron objects are built for it; `layers[k]`
/// holds the neurons of `topology[k + 1]`, each wired to every output of the
/// layer before it.
pub struct Network {
    topology: Vec<usize>,
    layers: Vec<Vec<Neuron>>,
    learning_rate: f64,
    verbose: bool,
}

impl Network {
    /// Builds a network for the given topology.
    ///
    /// Errors if the topology has fewer than two layers or any layer is
    /// empty. Weights are drawn in construction order from a `StdRng` seeded
    /// with `config.seed`.
    pub fn new(topology: Vec<usize>, config: &NetworkConfig) -> Result<Network, NetError> {
        if topology.len() < 2 {
            return Err(NetError::TopologyTooShort);
        }
        if let Some(index) = topology.iter().position(|&width| width == 0) {
            return Err(NetError::EmptyLayer { index });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let layers = (1..topology.len())
            .map(|i| {
                (0..topology[i])
                    .map(|_| Neuron::new(topology[i - 1], config.bias, config.bias_weight, &mut rng))
                    .collect()
            })
            .collect();

        Ok(Network {
            topology,
            layers,
            learning_rate: config.learning_rate,
            verbose: config.verbose,
        })
    }

    /// Ordered layer widths, input first.
    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    /// Width of the input layer.
    pub fn input_count(&self) -> usize {
        self.topology[0]
    }

    /// Width of the output layer, i.e. the number of classes.
    pub fn class_count(&self) -> usize {
        self.topology[self.topology.len() - 1]
    }

    /// The computational layers; `layers()[k]` holds `topology()[k + 1]`
    /// neurons.
    pub fn layers(&self) -> &[Vec<Neuron>] {
        &self.layers
    }

    /// Fires the network from the input layer through to the output layer.
    ///
    /// Each layer's neurons activate in order, and their ordered outputs
    /// become the inputs of every neuron in the next layer. Outputs stay
    /// cached in the neurons for the backward pass.
    pub fn propagate_forward(&mut self, features: &[f64]) -> Result<(), NetError> {
        if features.len() != self.input_count() {
            return Err(NetError::FeatureCountMismatch {
                expected: self.input_count(),
                actual: features.len(),
            });
        }

        self.set_layer_inputs(0, features);

        for k in 0..self.layers.len() {
            let outputs = self.layers[k]
                .iter_mut()
                .map(|neuron| neuron.activate())
                .collect::<Result<Vec<f64>, NetError>>()?;

            if k + 1 < self.layers.len() {
                self.set_layer_inputs(k + 1, &outputs);
            }
        }

        Ok(())
    }

    /// Forward propagates `features` and returns the predicted class: the
    /// index of the output neuron with the highest activation, ties broken by
    /// the lowest index.
    pub fn classify(&mut self, features: &[f64]) -> Result<usize, NetError> {
        self.propagate_forward(features)?;

        let outputs = self.output_layer_outputs()?;
        Ok(argmax(&outputs))
    }

    /// Trains on the full dataset once per epoch, in row order.
    ///
    /// A row that fails to learn is logged and skipped so one malformed row
    /// cannot abort the run. Returns the error of the last row processed; the
    /// per-epoch verbose line quotes the same last-row figure, not an epoch
    /// aggregate.
    pub fn train(&mut self, dataset: &[DataRow], config: &TrainConfig) -> Result<f64, NetError> {
        if config.epochs < 1 {
            return Err(NetError::InvalidEpochCount);
        }
        if dataset.is_empty() {
            return Err(NetError::EmptyTrainingSet);
        }

        let mut last_row_error = 0.0;

        for epoch in 1..=config.epochs {
            let t_start = Instant::now();

            for row in dataset {
                match self.learn(row.label(), row.features()) {
                    Ok(row_error) => last_row_error = row_error,
                    Err(e) => warn!("skipping row with label {}: {}", row.label(), e),
                }
            }

            if self.verbose {
                info!("{},{}", epoch, last_row_error);
            }

            if let Some(ref tx) = config.progress_tx {
                let stats = EpochStats {
                    epoch,
                    total_epochs: config.epochs,
                    last_row_error,
                    elapsed_ms: t_start.elapsed().as_millis() as u64,
                };
                // A dropped receiver means nobody is watching; stop cleanly.
                if tx.send(stats).is_err() {
                    break;
                }
            }
        }

        Ok(last_row_error)
    }

    /// One backpropagation pass over a single row.
    ///
    /// Returns the accumulated output delta magnitude: the sum of |delta|
    /// across the output layer, taken before any weights move.
    fn learn(&mut self, expected: usize, features: &[f64]) -> Result<f64, NetError> {
        if expected >= self.class_count() {
            return Err(NetError::LabelOutOfRange {
                label: expected,
                classes: self.class_count(),
            });
        }

        self.propagate_forward(features)?;

        // Output layer deltas. The leading minus sign pairs with the
        // subtractive weight update below to move weights downhill.
        let targets = self.expected_output_vector(expected);
        let mut error_total = 0.0;
        let output_layer = self.layers.len() - 1;
        for (i, neuron) in self.layers[output_layer].iter_mut().enumerate() {
            let out = neuron.output()?;
            let delta = -(targets[i] - out) * sigmoid_prime(out);
            neuron.set_delta(delta);
            error_total += delta.abs();
        }

        // Hidden layer deltas, rightmost hidden layer first. Each neuron sums
        // the next layer's deltas weighted by the connection leaving it.
        for k in (0..output_layer).rev() {
            // Borrow-checker ordering: split so the current layer is mutable
            // while the next layer is read.
            let (front, back) = self.layers.split_at_mut(k + 1);
            let next = &back[0];
            for (j, neuron) in front[k].iter_mut().enumerate() {
                let delta_sum: f64 = next.iter().map(|n| n.delta() * n.input_weight(j)).sum();
                let out = neuron.output()?;
                neuron.set_delta(delta_sum * sigmoid_prime(out));
            }
        }

        // Weight corrections, output layer back to the first hidden layer.
        for layer in self.layers.iter_mut().rev() {
            for neuron in layer.iter_mut() {
                let delta = neuron.delta();
                for k in 0..neuron.input_count() {
                    let amount = self.learning_rate * delta * neuron.input(k);
                    neuron.adjust_input_weight(k, amount);
                }
                neuron.adjust_bias_weight(self.learning_rate * delta);
            }
        }

        Ok(error_total)
    }

    /// Target vector for an expected class: 0.1 everywhere, 0.9 at the class
    /// index. Soft values keep the logistic out of its saturated tails.
    pub fn expected_output_vector(&self, class: usize) -> Vec<f64> {
        let mut targets = vec![0.1; self.class_count()];
        targets[class] = 0.9;
        targets
    }

    /// Formats the output layer's input weights, one line per neuron.
    pub fn weights_report(&self) -> String {
        let mut report = String::from("Layer Weights:\n");
        if let Some(output_layer) = self.layers.last() {
            for (j, neuron) in output_layer.iter().enumerate() {
                let weights: Vec<String> = neuron
                    .input_weights()
                    .iter()
                    .map(|w| w.to_string())
                    .collect();
                report.push_str(&format!("  Neuron {}: {}\n", j, weights.join(", ")));
            }
        }
        report
    }

    fn set_layer_inputs(&mut self, k: usize, values: &[f64]) {
        for neuron in &mut self.layers[k] {
            neuron.set_inputs(values);
        }
    }

    fn output_layer_outputs(&self) -> Result<Vec<f64>, NetError> {
        self.layers[self.layers.len() - 1]
            .iter()
            .map(|neuron| neuron.output())
            .collect()
    }
}

/// Index of the largest value; the first occurrence wins on ties.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn config() -> NetworkConfig {
        NetworkConfig {
            learning_rate: 0.1,
            bias: -1.0,
            bias_weight: 0.5,
            seed: 7,
            verbose: false,
        }
    }

    #[test]
    fn construction_matches_the_topology() {
        let network = Network::new(vec![16, 14, 26], &config()).unwrap();

        assert_eq!(network.topology(), &[16, 14, 26]);
        assert_eq!(network.input_count(), 16);
        assert_eq!(network.class_count(), 26);
        assert_eq!(network.layers().len(), 2);
        assert_eq!(network.layers()[0].len(), 14);
        assert_eq!(network.layers()[1].len(), 26);
        for neuron in &network.layers()[0] {
            assert_eq!(neuron.input_count(), 16);
        }
        for neuron in &network.layers()[1] {
            assert_eq!(neuron.input_count(), 14);
        }
    }

    #[test]
    fn construction_draws_weights_in_the_initialization_ranges() {
        let network = Network::new(vec![8, 6, 4], &config()).unwrap();
        for layer in network.layers() {
            for neuron in layer {
                for &w in neuron.input_weights() {
                    let positive = w > 0.0 && w <= 0.5;
                    let negative = (-1.0..=-0.6).contains(&w);
                    assert!(positive || negative, "weight {} out of range", w);
                }
            }
        }
    }

    #[test]
    fn construction_rejects_short_and_empty_topologies() {
        assert_eq!(
            Network::new(vec![4], &config()).err(),
            Some(NetError::TopologyTooShort)
        );
        assert_eq!(
            Network::new(vec![4, 0, 2], &config()).err(),
            Some(NetError::EmptyLayer { index: 1 })
        );
    }

    #[test]
    fn identical_seeds_build_identical_networks() {
        let a = Network::new(vec![3, 4, 2], &config()).unwrap();
        let b = Network::new(vec![3, 4, 2], &config()).unwrap();
        for (la, lb) in a.layers().iter().zip(b.layers()) {
            for (na, nb) in la.iter().zip(lb) {
                assert_eq!(na.input_weights(), nb.input_weights());
            }
        }
    }

    #[test]
    fn forward_rejects_mismatched_feature_vectors() {
        let mut network = Network::new(vec![3, 2], &config()).unwrap();
        assert_eq!(
            network.propagate_forward(&[1.0, 0.0]),
            Err(NetError::FeatureCountMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn classify_returns_an_output_layer_index() {
        let mut network = Network::new(vec![4, 5, 3], &config()).unwrap();
        let predicted = network.classify(&[0.1, 0.9, 0.4, 0.2]).unwrap();
        assert!(predicted < 3);
    }

    #[test]
    fn expected_output_vector_is_soft_one_hot() {
        let network = Network::new(vec![2, 4], &config()).unwrap();
        let targets = network.expected_output_vector(2);
        assert_eq!(targets.len(), 4);
        for (i, &t) in targets.iter().enumerate() {
            if i == 2 {
                assert_eq!(t, 0.9);
            } else {
                assert_eq!(t, 0.1);
            }
        }
    }

    #[test]
    fn train_validates_epochs_and_dataset() {
        let mut network = Network::new(vec![2, 1], &config()).unwrap();
        let rows = vec![DataRow::new(0, vec![1.0, 0.0])];

        assert_eq!(
            network.train(&rows, &TrainConfig::new(0)).err(),
            Some(NetError::InvalidEpochCount)
        );
        assert_eq!(
            network.train(&[], &TrainConfig::new(1)).err(),
            Some(NetError::EmptyTrainingSet)
        );
    }

    #[test]
    fn one_epoch_moves_the_output_weights() {
        let mut network = Network::new(vec![2, 1], &config()).unwrap();
        let before: Vec<f64> = network.layers()[0][0].input_weights().to_vec();
        let bias_before = network.layers()[0][0].bias_weight();

        let rows = vec![DataRow::new(0, vec![1.0, 0.0])];
        let error = network.train(&rows, &TrainConfig::new(1)).unwrap();
        assert!(error >= 0.0);

        let neuron = &network.layers()[0][0];
        // The weight on the live input and the bias weight must both move;
        // the weight on the zero-valued input cannot.
        assert_ne!(neuron.input_weight(0), before[0]);
        assert_eq!(neuron.input_weight(1), before[1]);
        assert_ne!(neuron.bias_weight(), bias_before);

        assert_eq!(network.classify(&[1.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn single_row_update_matches_the_rule_by_hand() {
        let mut network = Network::new(vec![1, 1], &config()).unwrap();
        let w0 = network.layers()[0][0].input_weight(0);
        let bw0 = network.layers()[0][0].bias_weight();

        let rows = vec![DataRow::new(0, vec![1.0])];
        let error = network.train(&rows, &TrainConfig::new(1)).unwrap();

        // Recompute the forward pass and delta by hand.
        let out = crate::activation::sigmoid(1.0 * w0 + -1.0 * bw0);
        let delta = -(0.9 - out) * out * (1.0 - out);

        let neuron = &network.layers()[0][0];
        assert!((error - delta.abs()).abs() < 1e-12);
        assert!((neuron.input_weight(0) - (w0 - 0.1 * delta * 1.0)).abs() < 1e-12);
        assert!((neuron.bias_weight() - (bw0 - 0.1 * delta)).abs() < 1e-12);
    }

    #[test]
    fn learning_error_is_the_sum_of_output_delta_magnitudes() {
        let mut network = Network::new(vec![2, 3, 4], &config()).unwrap();
        let rows = vec![DataRow::new(1, vec![0.3, 0.7])];
        let error = network.train(&rows, &TrainConfig::new(1)).unwrap();
        assert!(error >= 0.0);
        // Four outputs in (0, 1) against 0.1/0.9 targets bound each |delta|
        // by the logistic derivative's maximum of 0.25.
        assert!(error <= 4.0 * 0.25);
    }

    #[test]
    fn out_of_range_labels_are_skipped_not_fatal() {
        let mut network = Network::new(vec![2, 2], &config()).unwrap();
        let before: Vec<f64> = network.layers()[0][0].input_weights().to_vec();

        // Label 5 has no output neuron; the row is skipped, training succeeds.
        let rows = vec![DataRow::new(5, vec![0.2, 0.4])];
        let error = network.train(&rows, &TrainConfig::new(1)).unwrap();
        assert_eq!(error, 0.0);
        assert_eq!(network.layers()[0][0].input_weights(), &before[..]);
    }

    #[test]
    fn progress_channel_sees_every_epoch() {
        let mut network = Network::new(vec![2, 2], &config()).unwrap();
        let rows = vec![
            DataRow::new(0, vec![0.1, 0.9]),
            DataRow::new(1, vec![0.9, 0.1]),
        ];

        let (tx, rx) = mpsc::channel();
        let train_config = TrainConfig {
            epochs: 3,
            progress_tx: Some(tx),
        };
        let returned = network.train(&rows, &train_config).unwrap();
        drop(train_config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[2].epoch, 3);
        assert!(stats.iter().all(|s| s.total_epochs == 3));
        assert_eq!(stats[2].last_row_error, returned);
    }

    #[test]
    fn weights_report_lists_output_neurons_only() {
        let network = Network::new(vec![2, 3, 2], &config()).unwrap();
        let report = network.weights_report();
        assert!(report.starts_with("Layer Weights:\n"));
        assert!(report.contains("  Neuron 0: "));
        assert!(report.contains("  Neuron 1: "));
        assert!(!report.contains("Neuron 2"));
        // Reporting must not touch any weights.
        assert_eq!(report, network.weights_report());
    }

    #[test]
    fn argmax_breaks_ties_toward_the_lowest_index() {
        assert_eq!(argmax(&[0.2, 0.8, 0.8, 0.1]), 1);
        assert_eq!(argmax(&[0.5]), 0);
        assert_eq!(argmax(&[0.3, 0.3, 0.3]), 0);
    }
}
