pub mod analysis;
pub mod dataset;
pub mod error;
pub mod model;
pub mod xlsx;

pub use dataset::{Dataset, DatasetKind};
pub use error::{ElectionError, Result};
pub use model::*;
