pub mod csv;
pub mod haberman;

pub use haberman::{HabermanDataSet, HabermanSample, TargetEncoding};
