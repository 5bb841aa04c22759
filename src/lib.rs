//! Uplift Datasets - loaders for public uplift-modeling benchmarks
//!
//! This crate loads the Hillstrom e-mail campaign data and the Criteo uplift
//! prediction data, encodes them as all-numeric tables and hands out
//! row-aligned `(outcome, features, treatment)` arrays:
//!
//! - Source fetching from local paths or HTTP(S), gzip aware
//! - Ordinal or one-hot encoding of categorical columns
//! - Campaign filtering of the three-arm Hillstrom experiment
//! - Seeded, reproducible train/test splits
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use uplift_datasets::{HillstromDataset, MENS_CAMPAIGN};
//!
//! fn main() -> uplift_datasets::Result<()> {
//!     uplift_datasets::logger::init_logger();
//!
//!     let hillstrom = HillstromDataset::new("data/hillstrom.csv")?;
//!     let split = hillstrom.get_train_test(MENS_CAMPAIGN, 0.7, 42)?;
//!     println!("{} train rows, {} features", split.train.len(), split.train.n_features());
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod error;
pub mod logger;
pub mod setting;
pub mod utility;

pub use dataset::{
    CampaignFilter, CategoricalEncoding, CriteoDataset, DatasetLoader, HillstromDataset, Segment,
    SourceLocation, TrainTestSplit, UpliftData, MENS_CAMPAIGN, WOMENS_CAMPAIGN,
};
pub use error::{Result, UpliftError};
pub use setting::{Settings, SettingValue, SETTINGS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
