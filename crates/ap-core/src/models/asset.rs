//! Physical asset data model.
//!
//! Assets represent tracked equipment (pumps, vehicles, machines, etc.)
//! identified by a unique positive integer id. All descriptive fields are
//! optional at the type level; the creation path requires every one of them
//! to be supplied.

use serde::{Deserialize, Serialize};

use super::Record;

/// A physical asset record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique positive identifier. Immutable once created.
    pub asset_id: i64,
    /// Human-readable name.
    pub name: Option<String>,
    /// Equipment category.
    pub asset_type: Option<String>,
    /// Physical location.
    pub location: Option<String>,
    /// Purchase date, kept as free text and never parsed as a calendar type.
    pub purchase_date: Option<String>,
    /// Acquisition cost.
    pub initial_cost: Option<f64>,
    /// Operational status, e.g. "Operational" or "Non-operational".
    pub operational_status: Option<String>,
}

impl Asset {
    /// Creates an asset with only its key set.
    pub fn new(asset_id: i64) -> Self {
        Self {
            asset_id,
            name: None,
            asset_type: None,
            location: None,
            purchase_date: None,
            initial_cost: None,
            operational_status: None,
        }
    }
}

impl Record for Asset {
    const KIND: &'static str = "asset";

    fn key(&self) -> i64 {
        self.asset_id
    }

    fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.asset_type.is_some()
            && self.location.is_some()
            && self.purchase_date.is_some()
            && self.initial_cost.is_some()
            && self.operational_status.is_some()
    }

    fn merge_into(&self, existing: &mut Self) {
        if let Some(name) = &self.name {
            existing.name = Some(name.clone());
        }
        if let Some(asset_type) = &self.asset_type {
            existing.asset_type = Some(asset_type.clone());
        }
        if let Some(location) = &self.location {
            existing.location = Some(location.clone());
        }
        if let Some(purchase_date) = &self.purchase_date {
            existing.purchase_date = Some(purchase_date.clone());
        }
        if let Some(initial_cost) = self.initial_cost {
            existing.initial_cost = Some(initial_cost);
        }
        if let Some(operational_status) = &self.operational_status {
            existing.operational_status = Some(operational_status.clone());
        }
    }
}
