// src/chart/counts.rs
use std::cmp::Ordering;

use crate::{
    dataset::{Dataset, Value},
    error::ReportError,
};

/// Row counts per (category, indicator level).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCounts {
    /// First-appearance order
    pub categories: Vec<String>,
    /// Ascending (numeric when all levels are numbers)
    pub levels: Vec<String>,
    /// `counts[category][level]`
    pub counts: Vec<Vec<u32>>,
}

impl CategoryCounts {
    pub fn max_count(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn count(&self, category: &str, level: &str) -> Option<u32> {
        let c = self.categories.iter().position(|x| x == category)?;
        let l = self.levels.iter().position(|x| x == level)?;
        Some(self.counts[c][l])
    }
}

/// Group rows by `category`, split by `indicator`. Rows with either value empty are skipped.
pub fn tally(dataset: &Dataset, category: &str, indicator: &str) -> Result<CategoryCounts, ReportError> {
    let names = dataset.require(category)?;
    let flags = dataset.require(indicator)?;

    let pairs: Vec<(&Value, &Value)> = names
        .values
        .iter()
        .zip(&flags.values)
        .filter(|(n, f)| !n.is_empty() && !f.is_empty())
        .collect();

    let mut categories: Vec<String> = Vec::new();
    for (name, _) in &pairs {
        let key = name.to_string();
        if !categories.contains(&key) {
            categories.push(key);
        }
    }

    let mut level_values: Vec<&Value> = Vec::new();
    for (_, flag) in &pairs {
        if !level_values.iter().any(|v| v.to_string() == flag.to_string()) {
            level_values.push(*flag);
        }
    }
    level_values.sort_by(|a, b| compare_levels(a, b));
    let levels: Vec<String> = level_values.iter().map(|v| v.to_string()).collect();

    let mut counts = vec![vec![0u32; levels.len()]; categories.len()];
    for (name, flag) in &pairs {
        let name = name.to_string();
        let flag = flag.to_string();
        if let (Some(c), Some(l)) = (
            categories.iter().position(|x| *x == name),
            levels.iter().position(|x| *x == flag),
        ) {
            counts[c][l] += 1;
        }
    }

    logd!("Chart: {} categor(ies) × {} level(s)", categories.len(), levels.len());
    Ok(CategoryCounts { categories, levels, counts })
}

// Numbers before text; numbers by value, text lexically.
fn compare_levels(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}
