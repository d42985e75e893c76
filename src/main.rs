use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, error, warn};

use sigmoid_nn::data::dataset::build_rows;
use sigmoid_nn::data::labels::alphabet_labels;
use sigmoid_nn::data::loader::load_delimited;
use sigmoid_nn::data::rescale::{observe_columns, FeatureRange};
use sigmoid_nn::{ConfusionMatrix, Network, NetworkConfig, RunSpec, TrainConfig};

const WELCOME_MSG: &str = "\nsigmoid-nn\n\
-------------------------------------------------------------------\n\
This tool trains a multi-layer sigmoid network from pre-specified training\n\
data, learning rates, and epoch counts, then validates it with pre-specified\n\
validation data.\n\n\
Data set format follows the UCI letter-recognition corpus:\n\
https://archive.ics.uci.edu/ml/machine-learning-databases/letter-recognition/letter-recognition.data\n\
Output is in CSV form - pipe output to a csv file for best results.";

const TRAINING_DATAFILE: &str = "dataset/letter-recognition.train.data";
const VALIDATION_DATAFILE: &str = "dataset/letter-recognition.val.data";
/// Optional JSON run description; built-in defaults apply when absent.
const SPEC_FILE: &str = "run-spec.json";
/// Verbose networks report `epoch,error` per epoch at info level.
const VERBOSE: bool = true;

fn main() {
    env_logger::init();

    loop {
        let spec = load_spec();

        println!("{}", WELCOME_MSG);
        println!("\nTraining data is {}.", TRAINING_DATAFILE);
        println!("Validation data is {}.\n", VALIDATION_DATAFILE);
        println!("A new network will be trained for each learning rate of:");
        for rate in &spec.learning_rates {
            print!("   {}", rate);
        }
        println!("\nFor each learning rate, training will run for each epoch count of:");
        for epochs in &spec.epoch_counts {
            print!("   {}", epochs);
        }
        println!("\nThese processes will take some time to complete.\n");

        println!("Reading Training Data...");
        let raw_train = load_delimited(TRAINING_DATAFILE, ',');
        if raw_train.is_empty() {
            break;
        }
        println!("Done.\nReading Validation Data...");
        let raw_val = load_delimited(VALIDATION_DATAFILE, ',');
        if raw_val.is_empty() {
            break;
        }
        println!("Done.");

        if raw_train[0].len() != raw_val[0].len() {
            error!("differing parameter counts between training and validation sets");
            break;
        }

        // Rescaling uses the min/max observed over BOTH sets combined.
        println!("Determining parameter ranges...");
        let mut ranges: Vec<FeatureRange> = Vec::new();
        observe_columns(&mut ranges, &raw_train);
        observe_columns(&mut ranges, &raw_val);
        println!("Done.");

        println!("Converting Training Data...");
        let train_rows = build_rows(&raw_train, &ranges);
        println!("Done.\nConverting Validation Data...");
        let val_rows = build_rows(&raw_val, &ranges);
        println!("Done.");

        let class_count = match spec.topology.last() {
            Some(&count) => count,
            None => {
                error!("run spec topology is empty");
                break;
            }
        };

        for &epochs in &spec.epoch_counts {
            for &rate in &spec.learning_rates {
                println!(
                    "Operating on a network with {} inputs, {} hidden layer(s), and {} outputs.",
                    spec.topology[0],
                    spec.topology.len().saturating_sub(2),
                    class_count
                );

                let config = NetworkConfig {
                    learning_rate: rate,
                    bias: spec.bias,
                    bias_weight: spec.bias_weight,
                    seed: spec.seed.unwrap_or_else(clock_seed),
                    verbose: VERBOSE,
                };
                let mut network = match Network::new(spec.topology.clone(), &config) {
                    Ok(network) => network,
                    Err(e) => {
                        error!("could not build network: {}", e);
                        return;
                    }
                };

                println!("Training (LR = {} epochs = {})...", rate, epochs);
                if let Err(e) = network.train(&train_rows, &TrainConfig::new(epochs)) {
                    error!("training failed: {}", e);
                    continue;
                }
                println!("Done.");
                debug!("{}", network.weights_report());

                println!("Validating...");
                let mut matrix =
                    ConfusionMatrix::with_labels(class_count, alphabet_labels(class_count));
                for row in &val_rows {
                    if row.label() >= class_count {
                        warn!("skipping validation row with label {}", row.label());
                        continue;
                    }
                    match network.classify(row.features()) {
                        Ok(predicted) => matrix.increment(row.label(), predicted),
                        Err(e) => warn!("skipping validation row: {}", e),
                    }
                }

                println!("Results: (LR = {} epochs = {})", rate, epochs);
                print!("{}", matrix.matrix_report());
                println!("\nAccuracy: (LR = {} epochs = {})", rate, epochs);
                print!("{}", matrix.accuracy_report());
                println!();
            }
        }

        print!("Enter any key to exit, or 'y' to restart: ");
        io::stdout().flush().ok();
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            break;
        }
        if answer.trim() != "y" {
            break;
        }
    }
}

/// Loads the run spec from `run-spec.json` when present, otherwise the
/// built-in letter-recognition defaults.
fn load_spec() -> RunSpec {
    if Path::new(SPEC_FILE).exists() {
        match RunSpec::load_json(SPEC_FILE) {
            Ok(spec) => return spec,
            Err(e) => error!("could not read {}: {}; using defaults", SPEC_FILE, e),
        }
    }
    RunSpec::default()
}

/// Seconds since the epoch, for runs that did not pin a seed.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
