//! Performance metric data model.
//!
//! One metric record per asset id. The relation to [`super::Asset`] is by
//! convention only; no referential check is made when a metric is accepted.

use serde::{Deserialize, Serialize};

use super::Record;

/// Operational performance figures for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    /// Key of the asset this metric describes. Immutable once created.
    pub asset_id: i64,
    /// Hours in service.
    pub uptime: Option<f64>,
    /// Hours out of service.
    pub downtime: Option<f64>,
    /// Accumulated maintenance spend.
    pub maintenance_cost: Option<f64>,
    /// Failures per unit time.
    pub failure_rate: Option<f64>,
    /// Output efficiency percentage.
    pub efficiency: Option<f64>,
}

impl PerformanceMetric {
    /// Creates a metric with only its key set.
    pub fn new(asset_id: i64) -> Self {
        Self {
            asset_id,
            uptime: None,
            downtime: None,
            maintenance_cost: None,
            failure_rate: None,
            efficiency: None,
        }
    }
}

impl Record for PerformanceMetric {
    const KIND: &'static str = "performance metric";

    fn key(&self) -> i64 {
        self.asset_id
    }

    fn is_complete(&self) -> bool {
        self.uptime.is_some()
            && self.downtime.is_some()
            && self.maintenance_cost.is_some()
            && self.failure_rate.is_some()
            && self.efficiency.is_some()
    }

    fn merge_into(&self, existing: &mut Self) {
        if let Some(uptime) = self.uptime {
            existing.uptime = Some(uptime);
        }
        if let Some(downtime) = self.downtime {
            existing.downtime = Some(downtime);
        }
        if let Some(maintenance_cost) = self.maintenance_cost {
            existing.maintenance_cost = Some(maintenance_cost);
        }
        if let Some(failure_rate) = self.failure_rate {
            existing.failure_rate = Some(failure_rate);
        }
        if let Some(efficiency) = self.efficiency {
            existing.efficiency = Some(efficiency);
        }
    }
}
