//! FILENAME: summary-engine/src/filter.rs
//! Filter pipeline over the costed record collection.
//!
//! Each criterion is optional (absence = no restriction) and the criteria
//! compose by intersection: each one is applied in sequence to the same
//! progressively narrowed working set.

use chrono::NaiveDate;
use costing::{CostedRecord, Dimensions};
use serde::{Deserialize, Serialize};

/// Optional filter criteria for a summary recomputation.
///
/// Cost-center membership is by cost center *name*, resolved through the
/// dimension table. A record whose `cost_center_id` has no dimension row
/// never matches a center filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecordFilter {
    /// Inclusive start of the date range.
    pub date_from: Option<NaiveDate>,

    /// Inclusive end of the date range.
    pub date_to: Option<NaiveDate>,

    /// Cost center names to keep. Empty = no restriction.
    pub cost_centers: Vec<String>,

    /// Activity names to keep. Empty = no restriction.
    pub activities: Vec<String>,

    /// Reference names to keep. Empty = no restriction.
    pub references: Vec<String>,
}

impl RecordFilter {
    /// A filter that keeps everything.
    pub fn all() -> Self {
        RecordFilter::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.cost_centers.is_empty()
            && self.activities.is_empty()
            && self.references.is_empty()
    }

    /// Applies the criteria in sequence and returns the narrowed set.
    pub fn apply(&self, records: &[CostedRecord], dimensions: &Dimensions) -> Vec<CostedRecord> {
        let mut working: Vec<CostedRecord> = records.to_vec();

        if let Some(from) = self.date_from {
            working.retain(|r| r.date >= from);
        }
        if let Some(to) = self.date_to {
            working.retain(|r| r.date <= to);
        }
        if !self.cost_centers.is_empty() {
            working.retain(|r| {
                dimensions
                    .cost_center_name(r.cost_center_id)
                    .is_some_and(|name| self.cost_centers.iter().any(|c| c == name))
            });
        }
        if !self.activities.is_empty() {
            working.retain(|r| self.activities.iter().any(|a| a == &r.activity_name));
        }
        if !self.references.is_empty() {
            working.retain(|r| self.references.iter().any(|n| n == &r.reference_name));
        }

        working
    }
}
