//! This file defines some functions that checks
//! the range of the hyperparameters.
//! Every check runs before any stage does.

use crate::error::{LadError, Result};


#[inline(always)]
fn invalid<T>(message: String) -> Result<T> {
    Err(LadError::InvalidConfiguration(message))
}


/// Check the cutpoint tolerance.
#[inline(always)]
pub(crate) fn check_tolerance(tolerance: f64) -> Result<()> {
    if !(tolerance >= 0f64) {
        return invalid(format!(
            "binarization: cutpoint tolerance must be \
            greater than or equal to 0, got {tolerance}"
        ));
    }
    Ok(())
}


/// Check the minimum purity.
#[inline(always)]
pub(crate) fn check_purity(purity: f64) -> Result<()> {
    if !(purity > 0.5f64 && purity <= 1f64) {
        return invalid(format!(
            "rule generation: minimum purity must lie in (0.5, 1.0], \
            got {purity}"
        ));
    }
    Ok(())
}


/// Check the iterated sampling parameters.
#[inline(always)]
pub(crate) fn check_sampling(
    n_rounds: usize,
    sample_size: f64,
    solution_size: usize,
) -> Result<()>
{
    if n_rounds < 10 {
        return invalid(format!(
            "feature selection: number of rounds must be at least 10, \
            got {n_rounds}"
        ));
    }
    if !(0.05f64..=1f64).contains(&sample_size) {
        return invalid(format!(
            "feature selection: sample size must lie in [0.05, 1.0], \
            got {sample_size}"
        ));
    }
    if solution_size < 1 {
        return invalid(
            "feature selection: solution size must be at least 1".into()
        );
    }
    Ok(())
}


/// Check the random rule generation parameters.
#[inline(always)]
pub(crate) fn check_random_rules(
    n_rules: usize,
    n_random_features: usize,
    min_relative_coverage: f64,
) -> Result<()>
{
    if n_rules < 25 {
        return invalid(format!(
            "rule generation: number of rules must be at least 25, \
            got {n_rules}"
        ));
    }
    if n_random_features < 1 {
        return invalid(
            "rule generation: number of random features \
            must be at least 1".into()
        );
    }
    if !(0.01f64..=1f64).contains(&min_relative_coverage) {
        return invalid(format!(
            "rule generation: minimum relative coverage must lie in \
            [0.01, 1.0], got {min_relative_coverage}"
        ));
    }
    Ok(())
}
