use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// Configuration for one `Network::train` run.
///
/// # Fields
/// - `epochs`      — full passes over the training data; must be at least 1
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch. If the receiver is dropped the loop
///                   terminates early (clean shutdown).
pub struct TrainConfig {
    pub epochs: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            progress_tx: None,
        }
    }
}
