//! Dataset adapters for uplift modeling
//! Loads the Hillstrom and Criteo benchmarks and shapes them for uplift learners

pub mod criteo;
pub mod hillstrom;
pub mod processor;
pub mod source;
pub mod template;
pub mod utility;

pub use criteo::CriteoDataset;
pub use hillstrom::{HillstromDataset, MENS_CAMPAIGN, WOMENS_CAMPAIGN};
pub use processor::CategoricalEncoding;
pub use source::{read_table, SourceLocation};
pub use template::{
    CampaignFilter, DatasetLoader, TrainTestSplit, UpliftData, OUTCOME_COLUMN,
};
pub use utility::Segment;
