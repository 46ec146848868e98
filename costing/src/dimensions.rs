//! FILENAME: costing/src/dimensions.rs
//! PURPOSE: Read-only dimension data for products, activities and cost centers.
//! CONTEXT: Loaded once per session from the reference-data provider. The
//! costing engine only reads these tables; it never mutates them.
//!
//! Compressor eligibility and surcharge selection are explicit tagged
//! attributes on `Activity` rather than name comparisons at costing time.
//! `Activity::classified` derives the tags from the activity name with the
//! shop's fixed rules, so rows loaded from the reference sheets behave
//! exactly as the name-matched originals.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::DimensionError;

/// Name fragments that mark an activity as compressor-eligible.
pub const COMPRESSOR_ACTIVITY_MARKERS: [&str; 3] =
    ["Pulida", "Pintura Aerógrafo", "Pintura Madera"];

/// Activity that carries the flat fabrication-material surcharge.
pub const FABRICATION_ACTIVITY: &str = "Fabricación imagen";

/// Activity that carries the per-unit packaging surcharge.
pub const PACKAGING_ACTIVITY: &str = "Empaque";

// ============================================================================
// DIMENSION ENTITIES
// ============================================================================

/// A product reference. `reference_code` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub reference_code: String,
    pub reference_name: String,
}

/// An organizational grouping activities report their costs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    pub cost_center_id: u32,
    pub cost_center_name: String,
}

/// Additive, activity-specific cost beyond labor and equipment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurchargeKind {
    #[default]
    None,
    /// Flat material cost added once per record.
    FabricationMaterial,
    /// Packaging cost added per unit.
    Packaging,
}

/// A recordable work activity, assigned to a cost center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub activity_id: u32,
    pub activity_name: String,
    pub cost_center_id: u32,

    /// Whether compressor hours are meaningful for this activity.
    /// For all other activities compressor hours are treated as zero.
    pub uses_compressor: bool,

    /// Which surcharge rule applies when costing this activity.
    pub surcharge: SurchargeKind,
}

impl Activity {
    /// Builds an activity with its compressor and surcharge tags derived
    /// from the activity name.
    pub fn classified(activity_id: u32, activity_name: String, cost_center_id: u32) -> Self {
        let uses_compressor = COMPRESSOR_ACTIVITY_MARKERS
            .iter()
            .any(|marker| activity_name.contains(marker));

        let surcharge = if activity_name == FABRICATION_ACTIVITY {
            SurchargeKind::FabricationMaterial
        } else if activity_name == PACKAGING_ACTIVITY {
            SurchargeKind::Packaging
        } else {
            SurchargeKind::None
        };

        Activity {
            activity_id,
            activity_name,
            cost_center_id,
            uses_compressor,
            surcharge,
        }
    }
}

// ============================================================================
// DIMENSION SET
// ============================================================================

/// The three dimension tables plus lookup indexes on the keys the engines
/// resolve by. Duplicate keys are rejected at construction.
///
/// A reference code mapping to two different names is not validated here;
/// the per-reference summaries assume the mapping is 1:1.
#[derive(Debug, Clone, Default)]
pub struct Dimensions {
    products: Vec<Product>,
    activities: Vec<Activity>,
    cost_centers: Vec<CostCenter>,

    activity_by_name: FxHashMap<String, usize>,
    product_by_name: FxHashMap<String, usize>,
    product_by_code: FxHashMap<String, usize>,
    center_by_id: FxHashMap<u32, usize>,
}

impl Dimensions {
    pub fn new(
        products: Vec<Product>,
        activities: Vec<Activity>,
        cost_centers: Vec<CostCenter>,
    ) -> Result<Self, DimensionError> {
        let mut activity_by_name = FxHashMap::default();
        let mut activity_ids = FxHashMap::default();
        for (i, activity) in activities.iter().enumerate() {
            if activity_by_name
                .insert(activity.activity_name.clone(), i)
                .is_some()
            {
                return Err(DimensionError::DuplicateActivityName(
                    activity.activity_name.clone(),
                ));
            }
            if activity_ids.insert(activity.activity_id, i).is_some() {
                return Err(DimensionError::DuplicateActivityId(activity.activity_id));
            }
        }

        let mut product_by_name = FxHashMap::default();
        let mut product_by_code = FxHashMap::default();
        for (i, product) in products.iter().enumerate() {
            if product_by_name
                .insert(product.reference_name.clone(), i)
                .is_some()
            {
                return Err(DimensionError::DuplicateReferenceName(
                    product.reference_name.clone(),
                ));
            }
            if product_by_code
                .insert(product.reference_code.clone(), i)
                .is_some()
            {
                return Err(DimensionError::DuplicateReferenceCode(
                    product.reference_code.clone(),
                ));
            }
        }

        let mut center_by_id = FxHashMap::default();
        for (i, center) in cost_centers.iter().enumerate() {
            if center_by_id.insert(center.cost_center_id, i).is_some() {
                return Err(DimensionError::DuplicateCostCenterId(
                    center.cost_center_id,
                ));
            }
        }

        Ok(Dimensions {
            products,
            activities,
            cost_centers,
            activity_by_name,
            product_by_name,
            product_by_code,
            center_by_id,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn cost_centers(&self) -> &[CostCenter] {
        &self.cost_centers
    }

    pub fn activity_by_name(&self, name: &str) -> Option<&Activity> {
        self.activity_by_name.get(name).map(|&i| &self.activities[i])
    }

    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.product_by_name.get(name).map(|&i| &self.products[i])
    }

    pub fn product_by_code(&self, code: &str) -> Option<&Product> {
        self.product_by_code.get(code).map(|&i| &self.products[i])
    }

    pub fn cost_center_by_id(&self, id: u32) -> Option<&CostCenter> {
        self.center_by_id.get(&id).map(|&i| &self.cost_centers[i])
    }

    /// Resolves the display name of a cost center, if it has a dimension row.
    pub fn cost_center_name(&self, id: u32) -> Option<&str> {
        self.cost_center_by_id(id)
            .map(|c| c.cost_center_name.as_str())
    }
}
