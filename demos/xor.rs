use sigmoid_nn::data::labels::index_to_letter;
use sigmoid_nn::{DataRow, Network, NetworkConfig, TrainConfig};

fn main() {
    env_logger::init();

    let config = NetworkConfig {
        learning_rate: 0.5,
        bias: -1.0,
        bias_weight: 0.5,
        seed: 7,
        verbose: false,
    };
    let mut network = Network::new(vec![2, 3, 2], &config).expect("valid topology");

    // Class 0 = XOR false, class 1 = XOR true.
    let rows = vec![
        DataRow::new(0, vec![0.0, 0.0]),
        DataRow::new(1, vec![0.0, 1.0]),
        DataRow::new(1, vec![1.0, 0.0]),
        DataRow::new(0, vec![1.0, 1.0]),
    ];

    for chunk in 1..=10 {
        let error = network
            .train(&rows, &TrainConfig::new(1000))
            .expect("training succeeds");
        println!("Epochs {:>5}: last-row error = {:.6}", chunk * 1000, error);
    }

    for row in &rows {
        let predicted = network.classify(row.features()).expect("classify succeeds");
        println!(
            "Input: {:?} -> class {} ({})",
            row.features(),
            predicted,
            index_to_letter(predicted).unwrap_or('?')
        );
    }
}
