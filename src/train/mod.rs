pub mod cross_validation;
pub mod epoch_stats;
pub mod train_config;
pub mod trainer;

pub use cross_validation::{CrossValidator, ValidationSummary};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use trainer::{train_loop, train_network};
