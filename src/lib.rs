pub mod activation;
pub mod data;
pub mod error;
pub mod metrics;
pub mod network;
pub mod neuron;
pub mod train;

// Convenience re-exports
pub use data::row::DataRow;
pub use error::NetError;
pub use metrics::confusion::ConfusionMatrix;
pub use network::network::{Network, NetworkConfig};
pub use network::spec::RunSpec;
pub use neuron::neuron::Neuron;
pub use train::epoch_stats::EpochStats;
pub use train::train_config::TrainConfig;
