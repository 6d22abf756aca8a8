//! A from-scratch multilayer perceptron trained by online backpropagation,
//! with leave-one-out cross-validation and a loader for Haberman's survival
//! dataset.

pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;
pub mod data;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::{layer::Layer, weights::WeightMatrix};
pub use network::{Network, NetworkInitParameters, TrainingData};
pub use loss::{MaeLoss, MseLoss};
pub use train::{train_loop, train_network, CrossValidator, TrainConfig, ValidationSummary};
pub use data::{HabermanDataSet, HabermanSample, TargetEncoding};
pub use config::RunConfig;
pub use error::{NetworkError, Result};
