//! FILENAME: costing/src/engine.rs
//! Costing Engine - prices one observation into one costed record.
//!
//! A pure transform: observation + dimension lookups + rate table in, one
//! costed record out. Persistence is the caller's responsibility.
//!
//! Cost computation, in order:
//! 1. worker cost = total hours * worker hourly rate
//! 2. compressor cost = compressor hours * compressor hourly rate
//!    (compressor hours zeroed unless the activity uses a compressor)
//! 3. total cost = worker cost + compressor cost, plus the activity's
//!    surcharge (flat fabrication material once per record, or packaging
//!    per unit)
//! 4. unit cost = total cost / units
//!
//! Monetary outputs are rounded to 2 decimals at record creation;
//! intermediates keep full precision.

use crate::dimensions::{Dimensions, SurchargeKind};
use crate::error::CostingError;
use crate::money::round2;
use crate::observation::Observation;
use crate::rates::RateTable;
use crate::record::CostedRecord;

/// Prices one observation. The observation is assumed validated
/// (`Observation::validate`); lookups that fail are surfaced, never
/// defaulted.
pub fn cost_observation(
    observation: &Observation,
    dimensions: &Dimensions,
    rates: &RateTable,
) -> Result<CostedRecord, CostingError> {
    let activity = dimensions
        .activity_by_name(&observation.activity_name)
        .ok_or_else(|| CostingError::UnknownActivity(observation.activity_name.clone()))?;

    let product = dimensions
        .product_by_name(&observation.reference_name)
        .ok_or_else(|| CostingError::UnknownReference(observation.reference_name.clone()))?;

    let total_hours = observation.hours_per_worker * observation.worker_count as f64;

    let compressor_hours = if activity.uses_compressor {
        observation.compressor_hours
    } else {
        0.0
    };

    let worker_cost = total_hours * rates.worker_hourly;
    let compressor_cost = compressor_hours * rates.compressor_hourly;

    let mut total_cost = worker_cost + compressor_cost;
    match activity.surcharge {
        SurchargeKind::None => {}
        SurchargeKind::FabricationMaterial => {
            total_cost += rates.fabrication_material_per_batch;
        }
        SurchargeKind::Packaging => {
            total_cost += observation.units as f64 * rates.packaging_per_unit;
        }
    }

    let unit_cost = total_cost / observation.units as f64;

    Ok(CostedRecord {
        date: observation.date,
        cost_center_id: activity.cost_center_id,
        activity_id: activity.activity_id,
        activity_name: activity.activity_name.clone(),
        reference_code: product.reference_code.clone(),
        reference_name: product.reference_name.clone(),
        units: observation.units,
        hours_per_worker: observation.hours_per_worker,
        worker_count: observation.worker_count,
        total_hours,
        compressor_hours,
        user: observation.user.clone(),
        notes: observation.notes.clone(),
        worker_cost: round2(worker_cost),
        compressor_cost: round2(compressor_cost),
        total_cost: round2(total_cost),
        unit_cost: round2(unit_cost),
        adjusted_units: observation.units,
    })
}
