pub mod layer;
pub mod weights;

pub use layer::Layer;
pub use weights::WeightMatrix;
