//! Hillstrom MineThatData e-mail campaign dataset.
//!
//! 64,000 customers were randomly split into three groups: no e-mail, a men's
//! merchandise e-mail and a women's merchandise e-mail. The outcome is
//! whether the customer visited the website in the following two weeks.

use polars::prelude::{col, lit, DataFrame, IntoLazy};

use crate::dataset::processor::{
    cast_all_f64, column_values, drop_columns, factorize, map_labels, one_hot, require_columns,
    CategoricalEncoding,
};
use crate::dataset::template::{CampaignFilter, DatasetLoader, TrainTestSplit, UpliftData};
use crate::dataset::utility::validate_campaign;
use crate::error::Result;
use crate::logger::Logger;
use crate::setting::SETTINGS;

/// Columns every Hillstrom file carries
pub const HILLSTROM_COLUMNS: [&str; 12] = [
    "recency",
    "history_segment",
    "history",
    "mens",
    "womens",
    "zip_code",
    "newbie",
    "channel",
    "segment",
    "visit",
    "conversion",
    "spend",
];

/// String columns that are encoded during cleaning
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["history_segment", "zip_code", "channel"];

/// Columns removed during cleaning; only `visit` is kept as outcome
pub const DROPPED_COLUMNS: [&str; 2] = ["spend", "conversion"];

/// Treatment column
pub const SEGMENT_COLUMN: &str = "segment";

/// Segment label to treatment code
pub const SEGMENT_CODES: [(&str, f64); 3] = [
    ("No E-Mail", 0.0),
    ("Mens E-Mail", 1.0),
    ("Womens E-Mail", 2.0),
];

/// Campaign selector for the men's e-mail arm
pub const MENS_CAMPAIGN: u8 = 1;
/// Campaign selector for the women's e-mail arm
pub const WOMENS_CAMPAIGN: u8 = 2;

/// Cleaned Hillstrom table
#[derive(Debug, Clone)]
pub struct HillstromDataset {
    data: DataFrame,
    encoding: CategoricalEncoding,
    logger: Logger,
}

impl HillstromDataset {
    /// Load and clean with ordinal encoding of the categorical columns
    pub fn new(location: &str) -> Result<Self> {
        Self::load(location)
    }

    /// Load and clean with the given categorical encoding
    pub fn with_encoding(location: &str, encoding: CategoricalEncoding) -> Result<Self> {
        Self::load_with(location, encoding)
    }

    /// Load from the configured `hillstrom.url`
    pub fn from_settings() -> Result<Self> {
        Self::load(&SETTINGS.hillstrom_url())
    }

    pub fn encoding(&self) -> CategoricalEncoding {
        self.encoding
    }

    /// Row count for each segment code: no e-mail, men's, women's
    pub fn segment_counts(&self) -> Result<[usize; 3]> {
        let mut counts = [0usize; 3];
        for code in column_values(&self.data, SEGMENT_COLUMN)? {
            counts[code as usize] += 1;
        }
        Ok(counts)
    }

    /// Outcome, features and treatment for control plus one campaign arm.
    ///
    /// `campaign` is 1 for the men's e-mail and 2 for the women's e-mail.
    pub fn get_campaign_data(&self, campaign: u8) -> Result<UpliftData> {
        self.campaign_data(campaign)
    }

    /// Seeded train/test split of control plus one campaign arm
    pub fn get_train_test(&self, campaign: u8, frac: f64, seed: u64) -> Result<TrainTestSplit> {
        self.campaign_train_test(campaign, frac, seed)
    }

    /// Feature column names, in feature matrix column order
    pub fn get_feature_names(&self) -> Vec<String> {
        self.feature_names()
    }
}

impl DatasetLoader for HillstromDataset {
    const NAME: &'static str = "hillstrom";

    type Options = CategoricalEncoding;

    fn clean(raw: DataFrame, encoding: &CategoricalEncoding) -> Result<DataFrame> {
        require_columns(&raw, &HILLSTROM_COLUMNS)?;

        let mut df = drop_columns(&raw, &DROPPED_COLUMNS)?;
        for name in CATEGORICAL_COLUMNS {
            df = match encoding {
                CategoricalEncoding::Ordinal => factorize(&df, name)?,
                CategoricalEncoding::OneHot => one_hot(&df, name)?,
            };
        }
        let df = map_labels(&df, SEGMENT_COLUMN, &SEGMENT_CODES)?;
        cast_all_f64(&df)
    }

    fn from_clean(data: DataFrame, encoding: CategoricalEncoding) -> Self {
        let dataset = HillstromDataset {
            data,
            encoding,
            logger: Logger::new("Hillstrom"),
        };
        dataset.logger.info(&format!(
            "Cleaned {} rows with {} encoding, {} features",
            dataset.len(),
            encoding,
            dataset.feature_names().len()
        ));
        if let Ok([control, mens, womens]) = dataset.segment_counts() {
            dataset.logger.debug(&format!(
                "Segments: {} no e-mail, {} mens, {} womens",
                control, mens, womens
            ));
        }
        dataset
    }

    fn table(&self) -> &DataFrame {
        &self.data
    }

    fn treatment_column(&self) -> &str {
        SEGMENT_COLUMN
    }
}

impl CampaignFilter for HillstromDataset {
    fn campaign_table(&self, campaign: u8) -> Result<DataFrame> {
        validate_campaign(campaign)?;
        let excluded = f64::from(3 - campaign);

        let filtered = self
            .data
            .clone()
            .lazy()
            .filter(col(SEGMENT_COLUMN).neq(lit(excluded)))
            .collect()?;

        self.logger.debug(&format!(
            "Campaign {} keeps {} of {} rows",
            campaign,
            filtered.height(),
            self.data.height()
        ));
        Ok(filtered)
    }
}
