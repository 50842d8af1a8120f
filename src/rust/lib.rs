//! Batch SDG classification of CSV files.
//!
//! Every row's text is sent to a remote Sustainable Development Goal classifier,
//! and the returned scores plus a few summary statistics are appended as new
//! columns to a timestamped copy of the input.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use sdg_classify::{BuiltinEndpoint, Config, SdgClient, StopHandle, process_with_config};
//!
//! let config = Config::load("config.yaml".as_ref())?;
//! config.validate()?;
//!
//! let client = SdgClient::builder()
//!     .with_endpoint(BuiltinEndpoint::AuroraSdgMulti)?
//!     .build()?;
//!
//! let summary = process_with_config(&config, &client, &StopHandle::new(), None).await?;
//! println!("Wrote {}", summary.output_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Stopping early
//!
//! A pass checks its [`StopHandle`] before each row. Requesting a stop from
//! another task ends the pass at the next row boundary and the rows handled so
//! far are still written out.

pub mod classifier;
mod runtime;
pub mod config;
pub mod endpoints;
pub mod pipeline;
pub mod progress;
pub mod table;

pub use classifier::{ClassifierBuilder, ClassifierError, RowScores, Sdg, SdgClient, SdgPrediction, SdgPredictor};
pub use runtime::{HttpConfig, create_http_client};
pub use config::{Config, ConfigError};
pub use endpoints::{BuiltinEndpoint, EndpointInfo};
pub use pipeline::{classify_table, process_csv, process_with_config, RowCounts, RunSettings, RunSummary};
pub use progress::{Progress, StopHandle};
pub use table::{output_file_path, OutputColumns, SdgTable};

pub fn init_logger() {
    env_logger::init();
}
