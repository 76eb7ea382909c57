//! Summary statistics over the performance-metric collection.
//!
//! Produces aggregate figures (mean uptime/downtime, total maintenance
//! spend) plus the set of assets whose failure rate exceeds the top-5%
//! threshold of the input.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::PerformanceMetric;

/// One asset flagged for an outlying failure rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighFailureAsset {
    /// Key of the flagged asset.
    pub asset_id: i64,
    /// Its failure rate.
    pub failure_rate: f64,
}

/// Aggregate report over a performance-metric record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Arithmetic mean of downtime across all records.
    pub avg_downtime: f64,
    /// Arithmetic mean of uptime across all records.
    pub avg_uptime: f64,
    /// Sum of maintenance cost across all records.
    pub total_maintenance_cost: f64,
    /// Smallest failure rate still inside the top 5%, or 0 when the
    /// top-5% subset is empty.
    pub failure_rate_threshold: f64,
    /// Every record whose failure rate is strictly greater than the
    /// threshold, in input order.
    pub high_failure_assets: Vec<HighFailureAsset>,
}

/// Computes the summary report for a record set.
///
/// An empty input is a defined terminal case and yields the zero-valued
/// report. The top-5% subset holds the `floor(n * 0.05)` records with the
/// highest failure rates; ties keep input order (stable sort). The flagged
/// set uses strict inequality against the threshold, so records tied at
/// the threshold value are excluded and the result may hold fewer than
/// `floor(n * 0.05)` entries. Absent field values enter the arithmetic
/// as 0. All arithmetic is double precision with no rounding.
pub fn summarize(records: &[PerformanceMetric]) -> SummaryReport {
    if records.is_empty() {
        return SummaryReport::default();
    }

    let n = records.len();
    let avg_downtime = records.iter().map(|r| value(r.downtime)).sum::<f64>() / n as f64;
    let avg_uptime = records.iter().map(|r| value(r.uptime)).sum::<f64>() / n as f64;
    let total_maintenance_cost = records.iter().map(|r| value(r.maintenance_cost)).sum();

    let mut sorted: Vec<&PerformanceMetric> = records.iter().collect();
    sorted.sort_by(|a, b| {
        value(b.failure_rate)
            .partial_cmp(&value(a.failure_rate))
            .unwrap_or(Ordering::Equal)
    });

    // Truncation here matches the reference behavior exactly in IEEE-754
    // double precision.
    let k = (n as f64 * 0.05) as usize;
    let failure_rate_threshold = if k == 0 {
        0.0
    } else {
        value(sorted[k - 1].failure_rate)
    };

    let high_failure_assets = records
        .iter()
        .filter(|r| value(r.failure_rate) > failure_rate_threshold)
        .map(|r| HighFailureAsset {
            asset_id: r.asset_id,
            failure_rate: value(r.failure_rate),
        })
        .collect();

    SummaryReport {
        avg_downtime,
        avg_uptime,
        total_maintenance_cost,
        failure_rate_threshold,
        high_failure_assets,
    }
}

fn value(field: Option<f64>) -> f64 {
    field.unwrap_or(0.0)
}
