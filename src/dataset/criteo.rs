//! Criteo uplift prediction dataset.
//!
//! Anonymized numeric features `f0`..`f11`, a binary `treatment` flag, the
//! `visit` outcome and two columns not used here: `conversion` and
//! `exposure`.

use polars::prelude::DataFrame;

use crate::dataset::processor::{cast_all_f64, drop_columns, require_columns};
use crate::dataset::template::{DatasetLoader, TrainTestSplit, UpliftData};
use crate::error::Result;
use crate::logger::Logger;
use crate::setting::SETTINGS;

/// Treatment column
pub const TREATMENT_COLUMN: &str = "treatment";

/// Columns removed during cleaning
pub const DROPPED_COLUMNS: [&str; 2] = ["conversion", "exposure"];

/// Columns every Criteo file carries besides the features
pub const REQUIRED_COLUMNS: [&str; 4] = ["treatment", "conversion", "visit", "exposure"];

/// Cleaned Criteo table
#[derive(Debug, Clone)]
pub struct CriteoDataset {
    data: DataFrame,
    logger: Logger,
}

impl CriteoDataset {
    pub fn new(location: &str) -> Result<Self> {
        Self::load(location)
    }

    /// Load from the configured `criteo.url`
    pub fn from_settings() -> Result<Self> {
        Self::load(&SETTINGS.criteo_url())
    }

    /// Outcome, features and treatment for every row
    pub fn get_data(&self) -> Result<UpliftData> {
        self.data()
    }

    /// Seeded train/test split of the whole table
    pub fn get_train_test(&self, frac: f64, seed: u64) -> Result<TrainTestSplit> {
        self.logger.debug(&format!("Splitting {} rows, frac {}, seed {}", self.len(), frac, seed));
        self.train_test(frac, seed)
    }

    pub fn get_feature_names(&self) -> Vec<String> {
        self.feature_names()
    }
}

impl DatasetLoader for CriteoDataset {
    const NAME: &'static str = "criteo";

    type Options = ();

    fn clean(raw: DataFrame, _options: &()) -> Result<DataFrame> {
        require_columns(&raw, &REQUIRED_COLUMNS)?;
        let df = drop_columns(&raw, &DROPPED_COLUMNS)?;
        cast_all_f64(&df)
    }

    fn from_clean(data: DataFrame, _options: ()) -> Self {
        let dataset = CriteoDataset {
            data,
            logger: Logger::new("Criteo"),
        };
        dataset.logger.info(&format!(
            "Cleaned {} rows, {} features",
            dataset.len(),
            dataset.feature_names().len()
        ));
        dataset
    }

    fn table(&self) -> &DataFrame {
        &self.data
    }

    fn treatment_column(&self) -> &str {
        TREATMENT_COLUMN
    }
}
