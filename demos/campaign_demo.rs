//! Campaign Demo Example
//! Loads the Hillstrom data and prints the shapes handed to uplift learners
//!
//! Usage: cargo run --example campaign_demo -- [path-or-url] [one-hot]

use uplift_datasets::logger::{init_logger, Logger};
use uplift_datasets::{
    CategoricalEncoding, DatasetLoader, HillstromDataset, Segment, MENS_CAMPAIGN, SETTINGS,
    WOMENS_CAMPAIGN,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Campaign Demo Example ===\n");

    init_logger();
    let logger = Logger::new("CampaignDemo");

    let mut args = std::env::args().skip(1);
    let location = args.next().unwrap_or_else(|| SETTINGS.hillstrom_url());
    let encoding = match args.next().as_deref() {
        Some("one-hot") => CategoricalEncoding::OneHot,
        _ => CategoricalEncoding::Ordinal,
    };
    logger.info(&format!("Loading {} with {} encoding", location, encoding));

    let dataset = HillstromDataset::with_encoding(&location, encoding)?;
    let [control, mens, womens] = dataset.segment_counts()?;
    println!("✓ Loaded {} rows ({} control, {} mens, {} womens)", dataset.len(), control, mens, womens);
    println!("  Features: {}\n", dataset.get_feature_names().join(", "));

    for campaign in [MENS_CAMPAIGN, WOMENS_CAMPAIGN] {
        let data = dataset.get_campaign_data(campaign)?;
        println!(
            "Campaign {}: {} rows, {} features, visit rate {:.4}",
            campaign,
            data.len(),
            data.n_features(),
            data.outcome.mean().unwrap_or(0.0)
        );

        let split = dataset.get_train_test(campaign, 0.7, 42)?;
        for segment in [Segment::Train, Segment::Test] {
            let part = split.get(segment);
            println!("  {:?}: outcome {:?}, features {:?}, treatment {:?}",
                segment,
                part.outcome.dim(),
                part.features.dim(),
                part.treatment.dim()
            );
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
