use rand::rngs::StdRng;
use rand::Rng;

use crate::activation::sigmoid;
use crate::error::NetError;

/// A single sigmoid computation cell.
///
/// Holds one weight per input plus a weighted bias term. `set_inputs` must run
/// before `activate`, and `activate` before `output`; reading stale state is
/// reported as an error rather than handing back whatever the previous pass
/// left behind.
#[derive(Debug, Clone)]
pub struct Neuron {
    bias: f64,
    bias_weight: f64,
    weights: Vec<f64>,
    inputs: Vec<f64>,
    delta: f64,
    output: f64,
    inputs_set: bool,
    output_computed: bool,
}

impl Neuron {
    /// Builds a neuron with `input_count` randomly initialized weights.
    ///
    /// Each weight is drawn from {0.1, 0.2, ..., 1.0} and negated when it
    /// lands above 0.5, so initial weights fall in (0, 0.5] ∪ [-1.0, -0.6].
    pub fn new(input_count: usize, bias: f64, bias_weight: f64, rng: &mut StdRng) -> Neuron {
        let weights = (0..input_count)
            .map(|_| {
                let w = (rng.gen_range(0..10) + 1) as f64 / 10.0;
                if w > 0.5 {
                    -w
                } else {
                    w
                }
            })
            .collect();

        Neuron {
            bias,
            bias_weight,
            weights,
            inputs: vec![0.0; input_count],
            delta: 0.0,
            output: 0.0,
            inputs_set: false,
            output_computed: false,
        }
    }

    /// Stores the ordered input vector for the next activation. During forward
    /// propagation this is either the raw feature vector or the previous
    /// layer's outputs.
    pub fn set_inputs(&mut self, values: &[f64]) {
        self.inputs.clear();
        self.inputs.extend_from_slice(values);
        self.inputs_set = true;
    }

    /// Computes `sigmoid(dot(inputs, weights) + bias * bias_weight)`, caches
    /// it for `output`, and returns it.
    pub fn activate(&mut self) -> Result<f64, NetError> {
        if !self.inputs_set {
            return Err(NetError::InputsNotSet);
        }

        let net = dot(&self.inputs, &self.weights) + self.bias * self.bias_weight;
        self.output = sigmoid(net);
        self.output_computed = true;

        Ok(self.output)
    }

    /// The cached activation from the last `activate` call.
    pub fn output(&self) -> Result<f64, NetError> {
        if !self.output_computed {
            return Err(NetError::OutputNotComputed);
        }
        Ok(self.output)
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }

    pub fn input(&self, index: usize) -> f64 {
        self.inputs[index]
    }

    pub fn input_count(&self) -> usize {
        self.weights.len()
    }

    pub fn input_weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    pub fn input_weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn bias_weight(&self) -> f64 {
        self.bias_weight
    }

    /// Subtractive update: `amount` already carries the learning-rate scaling
    /// and sign from the backward pass.
    pub fn adjust_input_weight(&mut self, index: usize, amount: f64) {
        self.weights[index] -= amount;
    }

    /// Subtractive update, same convention as `adjust_input_weight`.
    pub fn adjust_bias_weight(&mut self, amount: f64) {
        self.bias_weight -= amount;
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
