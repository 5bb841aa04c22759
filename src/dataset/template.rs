//! Loader contract shared by the dataset adapters.
//!
//! An adapter is built once from a source: the raw table is fetched, parsed
//! and cleaned at construction and never changes afterwards. Every query is a
//! read over the cleaned table that projects rows into an [`UpliftData`]
//! triple of outcome, features and treatment.

use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;

use crate::dataset::processor::{column_names, column_values, take_rows};
use crate::dataset::source::read_table;
use crate::dataset::utility::{sample_indices, validate_campaign, validate_fraction, Segment};
use crate::error::Result;

/// Outcome column common to both datasets
pub const OUTCOME_COLUMN: &str = "visit";

/// Row-aligned arrays handed to uplift learners
#[derive(Debug, Clone, PartialEq)]
pub struct UpliftData {
    pub outcome: Array1<f64>,
    pub features: Array2<f64>,
    pub treatment: Array1<f64>,
}

impl UpliftData {
    pub fn len(&self) -> usize {
        self.outcome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcome.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn into_parts(self) -> (Array1<f64>, Array2<f64>, Array1<f64>) {
        (self.outcome, self.features, self.treatment)
    }
}

/// Train and test halves of a split
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train: UpliftData,
    pub test: UpliftData,
}

impl TrainTestSplit {
    pub fn get(&self, segment: Segment) -> &UpliftData {
        match segment {
            Segment::Train => &self.train,
            Segment::Test => &self.test,
        }
    }

    /// Train arrays followed by test arrays
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Array1<f64>,
        Array2<f64>,
        Array1<f64>,
        Array1<f64>,
        Array2<f64>,
        Array1<f64>,
    ) {
        let (y_train, x_train, t_train) = self.train.into_parts();
        let (y_test, x_test, t_test) = self.test.into_parts();
        (y_train, x_train, t_train, y_test, x_test, t_test)
    }
}

/// Every column except outcome and treatment, in table order
pub fn feature_columns(df: &DataFrame, outcome: &str, treatment: &str) -> Vec<String> {
    column_names(df)
        .into_iter()
        .filter(|name| name != outcome && name != treatment)
        .collect()
}

/// Project a cleaned table into outcome, feature matrix and treatment
pub fn to_uplift_data(df: &DataFrame, outcome: &str, treatment: &str) -> Result<UpliftData> {
    let outcome_values = column_values(df, outcome)?;
    let treatment_values = column_values(df, treatment)?;
    let feature_values = feature_columns(df, outcome, treatment)
        .iter()
        .map(|name| column_values(df, name))
        .collect::<Result<Vec<_>>>()?;

    let features = Array2::from_shape_fn((df.height(), feature_values.len()), |(row, col)| {
        feature_values[col][row]
    });

    Ok(UpliftData {
        outcome: Array1::from(outcome_values),
        features,
        treatment: Array1::from(treatment_values),
    })
}

/// Seeded train/test split of a cleaned table
pub fn train_test_split(
    df: &DataFrame,
    outcome: &str,
    treatment: &str,
    frac: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    validate_fraction(frac)?;
    let (train_idx, test_idx) = sample_indices(df.height(), frac, seed);
    tracing::debug!(train = train_idx.len(), test = test_idx.len(), seed, "split sampled");

    Ok(TrainTestSplit {
        train: to_uplift_data(&take_rows(df, &train_idx)?, outcome, treatment)?,
        test: to_uplift_data(&take_rows(df, &test_idx)?, outcome, treatment)?,
    })
}

/// Lifecycle of a dataset adapter: load, clean once, query
pub trait DatasetLoader: Sized {
    /// Dataset name used in logs
    const NAME: &'static str;

    /// Cleaning options fixed at construction
    type Options: Clone + Default;

    /// Turn a raw table into an all-numeric table.
    ///
    /// Deterministic: the same raw table and options always give the same
    /// cleaned table.
    fn clean(raw: DataFrame, options: &Self::Options) -> Result<DataFrame>;

    /// Wrap an already cleaned table
    fn from_clean(table: DataFrame, options: Self::Options) -> Self;

    /// The cleaned table
    fn table(&self) -> &DataFrame;

    fn treatment_column(&self) -> &str;

    fn outcome_column(&self) -> &str {
        OUTCOME_COLUMN
    }

    /// Clean a raw table without any I/O
    fn from_frame_with(raw: DataFrame, options: Self::Options) -> Result<Self> {
        let rows = raw.height();
        let table = Self::clean(raw, &options)?;
        tracing::info!(
            dataset = Self::NAME,
            rows,
            columns = table.width(),
            "dataset cleaned"
        );
        Ok(Self::from_clean(table, options))
    }

    fn from_frame(raw: DataFrame) -> Result<Self> {
        Self::from_frame_with(raw, Self::Options::default())
    }

    /// Fetch, parse and clean a source
    fn load_with(location: &str, options: Self::Options) -> Result<Self> {
        let raw = read_table(location)?;
        Self::from_frame_with(raw, options)
    }

    fn load(location: &str) -> Result<Self> {
        Self::load_with(location, Self::Options::default())
    }

    fn len(&self) -> usize {
        self.table().height()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feature column names, in feature matrix column order
    fn feature_names(&self) -> Vec<String> {
        feature_columns(self.table(), self.outcome_column(), self.treatment_column())
    }

    /// The whole cleaned table as uplift arrays
    fn data(&self) -> Result<UpliftData> {
        to_uplift_data(self.table(), self.outcome_column(), self.treatment_column())
    }

    /// Seeded split of the whole cleaned table
    fn train_test(&self, frac: f64, seed: u64) -> Result<TrainTestSplit> {
        train_test_split(
            self.table(),
            self.outcome_column(),
            self.treatment_column(),
            frac,
            seed,
        )
    }
}

/// Datasets with several treatment arms that can be narrowed to one arm plus control
pub trait CampaignFilter: DatasetLoader {
    /// Rows of the control group and of `campaign`'s arm, in table order
    fn campaign_table(&self, campaign: u8) -> Result<DataFrame>;

    fn campaign_data(&self, campaign: u8) -> Result<UpliftData> {
        let table = self.campaign_table(campaign)?;
        to_uplift_data(&table, self.outcome_column(), self.treatment_column())
    }

    fn campaign_train_test(&self, campaign: u8, frac: f64, seed: u64) -> Result<TrainTestSplit> {
        validate_campaign(campaign)?;
        validate_fraction(frac)?;
        let table = self.campaign_table(campaign)?;
        train_test_split(
            &table,
            self.outcome_column(),
            self.treatment_column(),
            frac,
            seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpliftError;
    use polars::prelude::*;
    use std::collections::HashSet;

    fn cleaned() -> DataFrame {
        df!(
            "recency" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            "history" => [10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
            "treatment" => [0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
            "visit" => [0.0, 0.0, 1.0, 1.0, 0.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_feature_columns_skip_outcome_and_treatment() {
        assert_eq!(
            feature_columns(&cleaned(), "visit", "treatment"),
            vec!["recency", "history"]
        );
    }

    #[test]
    fn test_to_uplift_data_is_row_aligned() {
        let data = to_uplift_data(&cleaned(), "visit", "treatment").unwrap();
        assert_eq!(data.len(), 6);
        assert_eq!(data.n_features(), 2);
        assert_eq!(data.features.row(2).to_vec(), vec![3.0, 30.0]);
        assert_eq!(data.outcome[2], 1.0);
        assert_eq!(data.treatment[1], 1.0);
    }

    #[test]
    fn test_train_test_split_partitions_rows() {
        let split = train_test_split(&cleaned(), "visit", "treatment", 0.5, 3).unwrap();
        assert_eq!(split.train.len(), 3);
        assert_eq!(split.test.len(), 3);

        // recency is unique per row and identifies it
        let train: HashSet<i64> = split.train.features.column(0).iter().map(|v| *v as i64).collect();
        let test: HashSet<i64> = split.test.features.column(0).iter().map(|v| *v as i64).collect();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.len() + test.len(), 6);

        for data in [&split.train, &split.test] {
            for row in 0..data.len() {
                let recency = data.features[[row, 0]];
                assert_eq!(data.features[[row, 1]], recency * 10.0);
            }
        }
    }

    #[test]
    fn test_train_test_split_rejects_bad_fraction() {
        let err = train_test_split(&cleaned(), "visit", "treatment", 1.5, 0).unwrap_err();
        assert!(matches!(err, UpliftError::InvalidArgument(_)));
    }

    #[test]
    fn test_split_segments() {
        let split = train_test_split(&cleaned(), "visit", "treatment", 1.0, 0).unwrap();
        assert_eq!(split.get(Segment::Train).len(), 6);
        assert!(split.get(Segment::Test).is_empty());
        assert_eq!(split.get(Segment::Test).n_features(), 2);
    }
}
