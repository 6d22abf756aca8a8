use serde::{Serialize, Deserialize};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`    — total number of in-order passes over the training data
/// - `log_every` — emit an `info!` line every this many epochs; `0` silences
///                 progress logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs, log_every: 0 }
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}
