pub mod network;
pub mod params;
pub mod training_data;

pub use network::Network;
pub use params::NetworkInitParameters;
pub use training_data::TrainingData;
