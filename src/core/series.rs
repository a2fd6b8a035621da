//! Chart series preparation for rate history

use crate::core::rate::ExchangeRate;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Parallel sequences handed to the charting collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&NaiveDateTime, f64)> {
        self.labels.iter().zip(self.values.iter().copied())
    }
}

/// Orders a history oldest-first without touching the input. The sort is
/// stable, so entries sharing a timestamp keep their input order.
pub fn sort_ascending(history: &[ExchangeRate]) -> Vec<ExchangeRate> {
    let mut sorted = history.to_vec();
    sorted.sort_by_key(|r| r.timestamp);
    sorted
}

pub fn prepare_series(history: &[ExchangeRate]) -> ChartSeries {
    let (labels, values) = sort_ascending(history)
        .into_iter()
        .map(|r| (r.timestamp, r.obs_value))
        .unzip();
    ChartSeries { labels, values }
}
