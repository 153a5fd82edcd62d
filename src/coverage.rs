// src/coverage.rs
use std::collections::HashSet;

use crate::{dataset::Dataset, error::ReportError};

/// Share of expected categories with no failing row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coverage {
    /// Distinct categories with at least one row flagged 1
    pub failed_categories: usize,
    pub expected_categories: usize,
    /// `(1 - failed/expected) * 100`, not clamped
    pub percent: f64,
}

impl Coverage {
    pub fn new(failed_categories: usize, expected_categories: usize) -> Result<Self, ReportError> {
        if expected_categories == 0 {
            return Err(ReportError::InvalidExpectedTotal);
        }
        let percent = (1.0 - failed_categories as f64 / expected_categories as f64) * 100.0;
        Ok(Self { failed_categories, expected_categories, percent })
    }

    pub fn remaining(&self) -> f64 { 100.0 - self.percent }

    /// `92.31%`
    pub fn label(&self) -> String { format!("{:.2}%", self.percent) }
}

/// Count distinct `category` values among rows whose `indicator` equals 1.
pub fn compute(
    dataset: &Dataset,
    category: &str,
    indicator: &str,
    expected_categories: usize,
) -> Result<Coverage, ReportError> {
    let names = dataset.require(category)?;
    let flags = dataset.require(indicator)?;

    let failed: HashSet<String> = names
        .values
        .iter()
        .zip(&flags.values)
        .filter(|(name, flag)| !name.is_empty() && flag.as_f64() == Some(1.0))
        .map(|(name, _)| name.to_string())
        .collect();

    let coverage = Coverage::new(failed.len(), expected_categories)?;
    logf!(
        "Coverage: {} failed of {} expected → {}",
        coverage.failed_categories,
        coverage.expected_categories,
        coverage.label()
    );
    Ok(coverage)
}
