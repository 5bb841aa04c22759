//! Segments, argument checks and seeded row sampling

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, UpliftError};

/// Data segment enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Train,
    Test,
}

/// Check that a split fraction lies in [0, 1]
pub fn validate_fraction(frac: f64) -> Result<()> {
    if (0.0..=1.0).contains(&frac) {
        Ok(())
    } else {
        Err(UpliftError::InvalidArgument(format!(
            "fraction must be within [0, 1], got {}",
            frac
        )))
    }
}

/// Check that a Hillstrom campaign selector is 1 (men's) or 2 (women's)
pub fn validate_campaign(campaign: u8) -> Result<()> {
    match campaign {
        1 | 2 => Ok(()),
        _ => Err(UpliftError::InvalidArgument(format!(
            "campaign must be 1 or 2, got {}",
            campaign
        ))),
    }
}

/// Number of training rows for `n` rows and fraction `frac`.
///
/// Ties round to the even count, so 5 rows at 0.5 give 2 training rows.
pub fn train_size(n: usize, frac: f64) -> usize {
    ((n as f64 * frac).round_ties_even() as usize).min(n)
}

/// Partition `0..n` into train and test row indices.
///
/// Train membership and order depend only on `(n, frac, seed)`. Test holds
/// the complement and is shuffled with the thread RNG, so its order differs
/// between calls while its membership does not.
pub fn sample_indices(n: usize, frac: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut train: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    train.shuffle(&mut rng);

    let mut test = train.split_off(train_size(n, frac));
    test.shuffle(&mut rand::rng());
    (train, test)
}
