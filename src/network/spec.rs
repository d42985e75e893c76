use serde::{Deserialize, Serialize};

/// A fully serializable description of a training run: network shape plus the
/// hyperparameter sweep the driver walks through.
///
/// `RunSpec` can be saved to / loaded from JSON independently of any trained
/// network, making it possible to keep run configurations next to a dataset
/// and rerun them without recompiling. Trained weights are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    /// Human-readable name for the run.
    pub name: String,
    /// Ordered layer widths, input first, output last.
    pub topology: Vec<usize>,
    /// Learning rates to sweep; one network is trained per rate.
    pub learning_rates: Vec<f64>,
    /// Epoch counts to sweep.
    pub epoch_counts: Vec<usize>,
    /// Bias input of every neuron.
    pub bias: f64,
    /// Initial bias weight of every neuron.
    pub bias_weight: f64,
    /// Fixed RNG seed for reproducible runs; `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RunSpec {
    /// The letter-recognition configuration: 16 features, one hidden layer of
    /// 14 neurons, 26 output classes.
    fn default() -> Self {
        RunSpec {
            name: "letter-recognition".to_string(),
            topology: vec![16, 14, 26],
            learning_rates: vec![0.01],
            epoch_counts: vec![1],
            bias: -1.0,
            bias_weight: 0.5,
            seed: None,
        }
    }
}

impl RunSpec {
    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `RunSpec` from a JSON file previously written by
    /// `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<RunSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_letter_recognition_run() {
        let spec = RunSpec::default();
        assert_eq!(spec.topology, vec![16, 14, 26]);
        assert_eq!(spec.learning_rates, vec![0.01]);
        assert_eq!(spec.epoch_counts, vec![1]);
        assert_eq!(spec.bias, -1.0);
        assert_eq!(spec.bias_weight, 0.5);
        assert_eq!(spec.seed, None);
    }

    #[test]
    fn json_round_trip_preserves_every_field() {
        let path = std::env::temp_dir().join("sigmoid-nn-spec-roundtrip.json");
        let path = path.to_str().unwrap().to_string();

        let mut spec = RunSpec::default();
        spec.name = "sweep".to_string();
        spec.learning_rates = vec![0.01, 0.1];
        spec.epoch_counts = vec![1, 5];
        spec.seed = Some(99);

        spec.save_json(&path).unwrap();
        let loaded = RunSpec::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.name, "sweep");
        assert_eq!(loaded.topology, spec.topology);
        assert_eq!(loaded.learning_rates, spec.learning_rates);
        assert_eq!(loaded.epoch_counts, spec.epoch_counts);
        assert_eq!(loaded.seed, Some(99));
    }

    #[test]
    fn missing_seed_defaults_to_none() {
        let json = r#"{
            "name": "bare",
            "topology": [4, 3, 2],
            "learning_rates": [0.5],
            "epoch_counts": [10],
            "bias": -1.0,
            "bias_weight": 0.5
        }"#;
        let spec: RunSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.seed, None);
    }
}
