mod error;
mod model;
#[allow(clippy::module_inception)]
mod classifier;
pub mod builder;
pub mod utils;

pub use error::ClassifierError;
pub use classifier::{SdgClient, SdgPredictor};
pub use builder::ClassifierBuilder;
pub use model::{RowScores, Sdg, SdgPrediction, SDG_COUNT, TOP_N};
