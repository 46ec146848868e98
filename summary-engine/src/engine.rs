//! FILENAME: summary-engine/src/engine.rs
//! Summary Engine - derives the reporting views from the record collection.
//!
//! A pure function over the full costed record set: filter, then recompute
//! every view from scratch. The source collection is small and only grows
//! by append, so there is no caching and no incremental state.
//!
//! Views produced per invocation:
//! 1. Global totals (cost sum, record count, estimated real units)
//! 2. Per-reference summary, grouped by reference code
//! 3. Per-reference graphing summary, independently grouped by name
//! 4. Cost-center distribution
//! 5. Drill-down hierarchy: cost center -> activity -> reference -> rows
//! 6. The export-ready filtered record set

use costing::{CostedRecord, Dimensions};
use rustc_hash::FxHashMap;

use crate::filter::RecordFilter;
use crate::view::{
    ActivityDetail, CostCenterDetail, CostCenterSlice, DetailRow, NameSummaryRow,
    ReferenceDetail, ReferenceSummaryRow, Summary, Totals,
};

// ============================================================================
// GROUP ACCUMULATOR
// ============================================================================

/// Running sums for one reference group.
#[derive(Debug, Clone, Default)]
struct GroupAccumulator {
    units_sum: u64,
    record_count: usize,
    cost_sum: f64,
    /// Display name carried from the first record seen in the group.
    carried_name: String,
}

impl GroupAccumulator {
    fn add(&mut self, record: &CostedRecord) {
        if self.record_count == 0 {
            self.carried_name = record.reference_name.clone();
        }
        self.units_sum += record.units as u64;
        self.record_count += 1;
        self.cost_sum += record.total_cost;
    }

    /// `units_sum / record_count`. A group always has at least one record.
    fn real_units(&self) -> f64 {
        self.units_sum as f64 / self.record_count as f64
    }

    /// `cost_sum / real_units`. Real units cannot be zero because every
    /// record carries at least one unit.
    fn avg_unit_cost(&self) -> f64 {
        self.cost_sum / self.real_units()
    }
}

// ============================================================================
// SUMMARIZE
// ============================================================================

/// Filters the record collection and derives the full view set.
///
/// An empty filtered set yields zero totals and empty tables, never an
/// error.
pub fn summarize(
    records: &[CostedRecord],
    dimensions: &Dimensions,
    filter: &RecordFilter,
) -> Summary {
    let filtered = filter.apply(records, dimensions);

    Summary {
        totals: compute_totals(&filtered),
        by_reference: summarize_by_code(&filtered),
        by_reference_name: summarize_by_name(&filtered),
        cost_center_distribution: cost_center_distribution(&filtered, dimensions),
        drill_down: build_drill_down(&filtered, dimensions),
        records: filtered,
    }
}

fn compute_totals(filtered: &[CostedRecord]) -> Totals {
    let cost_sum: f64 = filtered.iter().map(|r| r.total_cost).sum();
    let record_count = filtered.len();
    let units_sum: u64 = filtered.iter().map(|r| r.units as u64).sum();

    let real_units = if record_count > 0 {
        units_sum as f64 / record_count as f64
    } else {
        0.0
    };

    Totals {
        cost_sum,
        record_count,
        real_units,
    }
}

fn summarize_by_code(filtered: &[CostedRecord]) -> Vec<ReferenceSummaryRow> {
    let mut groups: FxHashMap<String, GroupAccumulator> = FxHashMap::default();
    for record in filtered {
        groups
            .entry(record.reference_code.clone())
            .or_default()
            .add(record);
    }

    let mut rows: Vec<ReferenceSummaryRow> = groups
        .into_iter()
        .map(|(code, acc)| ReferenceSummaryRow {
            reference_code: code,
            reference_name: acc.carried_name.clone(),
            units_sum: acc.units_sum,
            activity_count: acc.record_count,
            cost_sum: acc.cost_sum,
            real_units: acc.real_units(),
            avg_unit_cost: acc.avg_unit_cost(),
        })
        .collect();
    rows.sort_by(|a, b| a.reference_code.cmp(&b.reference_code));
    rows
}

/// Same computation as `summarize_by_code`, independently grouped by
/// reference name. Not derived from the code-keyed table because the
/// grouping key differs.
fn summarize_by_name(filtered: &[CostedRecord]) -> Vec<NameSummaryRow> {
    let mut groups: FxHashMap<String, GroupAccumulator> = FxHashMap::default();
    for record in filtered {
        groups
            .entry(record.reference_name.clone())
            .or_default()
            .add(record);
    }

    let mut rows: Vec<NameSummaryRow> = groups
        .into_iter()
        .map(|(name, acc)| NameSummaryRow {
            reference_name: name,
            units_sum: acc.units_sum,
            activity_count: acc.record_count,
            cost_sum: acc.cost_sum,
            real_units: acc.real_units(),
            avg_unit_cost: acc.avg_unit_cost(),
        })
        .collect();
    rows.sort_by(|a, b| a.reference_name.cmp(&b.reference_name));
    rows
}

/// Records whose `cost_center_id` has no dimension row are left out of the
/// distribution (there is no name to group them under).
fn cost_center_distribution(
    filtered: &[CostedRecord],
    dimensions: &Dimensions,
) -> Vec<CostCenterSlice> {
    let mut sums: FxHashMap<String, f64> = FxHashMap::default();
    for record in filtered {
        if let Some(name) = dimensions.cost_center_name(record.cost_center_id) {
            *sums.entry(name.to_string()).or_insert(0.0) += record.total_cost;
        }
    }

    let mut slices: Vec<CostCenterSlice> = sums
        .into_iter()
        .map(|(cost_center_name, cost_sum)| CostCenterSlice {
            cost_center_name,
            cost_sum,
        })
        .collect();
    slices.sort_by(|a, b| a.cost_center_name.cmp(&b.cost_center_name));
    slices
}

/// Three-level nested grouping: cost center -> activity -> reference.
/// Each level lists only the distinct values present in the filtered set,
/// in ascending order; leaves keep the records in filtered-set order.
fn build_drill_down(
    filtered: &[CostedRecord],
    dimensions: &Dimensions,
) -> Vec<CostCenterDetail> {
    type ReferenceRows = FxHashMap<String, Vec<DetailRow>>;
    type ActivityMap = FxHashMap<String, ReferenceRows>;

    let mut centers: FxHashMap<String, ActivityMap> = FxHashMap::default();

    for record in filtered {
        let Some(center_name) = dimensions.cost_center_name(record.cost_center_id) else {
            continue;
        };
        centers
            .entry(center_name.to_string())
            .or_default()
            .entry(record.activity_name.clone())
            .or_default()
            .entry(record.reference_name.clone())
            .or_default()
            .push(DetailRow::from_record(record));
    }

    let mut result: Vec<CostCenterDetail> = centers
        .into_iter()
        .map(|(cost_center_name, activities)| {
            let mut activity_details: Vec<ActivityDetail> = activities
                .into_iter()
                .map(|(activity_name, references)| {
                    let mut reference_details: Vec<ReferenceDetail> = references
                        .into_iter()
                        .map(|(reference_name, rows)| ReferenceDetail {
                            reference_name,
                            rows,
                        })
                        .collect();
                    reference_details.sort_by(|a, b| a.reference_name.cmp(&b.reference_name));
                    ActivityDetail {
                        activity_name,
                        references: reference_details,
                    }
                })
                .collect();
            activity_details.sort_by(|a, b| a.activity_name.cmp(&b.activity_name));
            CostCenterDetail {
                cost_center_name,
                activities: activity_details,
            }
        })
        .collect();
    result.sort_by(|a, b| a.cost_center_name.cmp(&b.cost_center_name));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use costing::{cost_observation, Activity, CostCenter, Observation, Product, RateTable};

    fn test_dimensions() -> Dimensions {
        Dimensions::new(
            vec![
                Product {
                    reference_code: "R001".to_string(),
                    reference_name: "Virgen del Carmen 30cm".to_string(),
                },
                Product {
                    reference_code: "R002".to_string(),
                    reference_name: "San Miguel 45cm".to_string(),
                },
            ],
            vec![
                Activity::classified(1, "Corte".to_string(), 1),
                Activity::classified(2, "Pulida".to_string(), 2),
                Activity::classified(4, "Empaque".to_string(), 3),
            ],
            vec![
                CostCenter {
                    cost_center_id: 1,
                    cost_center_name: "Fabricación".to_string(),
                },
                CostCenter {
                    cost_center_id: 2,
                    cost_center_name: "Acabado".to_string(),
                },
                CostCenter {
                    cost_center_id: 3,
                    cost_center_name: "Terminado".to_string(),
                },
            ],
        )
        .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn record(
        dims: &Dimensions,
        day: u32,
        activity: &str,
        reference: &str,
        units: u32,
        hours: f64,
    ) -> CostedRecord {
        let obs = Observation {
            date: date(day),
            activity_name: activity.to_string(),
            reference_name: reference.to_string(),
            units,
            hours_per_worker: hours,
            worker_count: 1,
            compressor_hours: 0.0,
            user: "sandra".to_string(),
            notes: String::new(),
        };
        cost_observation(&obs, dims, &RateTable::default()).unwrap()
    }

    fn sample_records(dims: &Dimensions) -> Vec<CostedRecord> {
        vec![
            record(dims, 10, "Empaque", "Virgen del Carmen 30cm", 100, 2.0),
            record(dims, 11, "Corte", "Virgen del Carmen 30cm", 50, 1.0),
            record(dims, 12, "Pulida", "San Miguel 45cm", 20, 3.0),
            record(dims, 13, "Corte", "San Miguel 45cm", 30, 2.0),
        ]
    }

    #[test]
    fn test_empty_set_yields_zeroes() {
        let dims = test_dimensions();
        let summary = summarize(&[], &dims, &RecordFilter::all());

        assert_eq!(summary.totals.cost_sum, 0.0);
        assert_eq!(summary.totals.record_count, 0);
        assert_eq!(summary.totals.real_units, 0.0);
        assert!(summary.by_reference.is_empty());
        assert!(summary.by_reference_name.is_empty());
        assert!(summary.cost_center_distribution.is_empty());
        assert!(summary.drill_down.is_empty());
        assert!(summary.records.is_empty());
    }

    #[test]
    fn test_global_totals() {
        let dims = test_dimensions();
        let records = sample_records(&dims);
        let summary = summarize(&records, &dims, &RecordFilter::all());

        let expected_cost: f64 = records.iter().map(|r| r.total_cost).sum();
        assert_eq!(summary.totals.cost_sum, expected_cost);
        assert_eq!(summary.totals.record_count, 4);
        // (100 + 50 + 20 + 30) / 4
        assert_eq!(summary.totals.real_units, 50.0);
    }

    #[test]
    fn test_reference_grouping_example() {
        // Two records for one reference: units (100, 50), costs
        // (371554, 185777) -> real units 75, average unit cost 7431.08.
        let dims = test_dimensions();
        // Empaque at 100 units / 2h costs 371554; at 50 units / 1h, 185777.
        let first = record(&dims, 10, "Empaque", "Virgen del Carmen 30cm", 100, 2.0);
        let second = record(&dims, 11, "Empaque", "Virgen del Carmen 30cm", 50, 1.0);

        let summary = summarize(&[first, second], &dims, &RecordFilter::all());
        assert_eq!(summary.by_reference.len(), 1);

        let row = &summary.by_reference[0];
        assert_eq!(row.reference_code, "R001");
        assert_eq!(row.reference_name, "Virgen del Carmen 30cm");
        assert_eq!(row.units_sum, 150);
        assert_eq!(row.activity_count, 2);
        assert_eq!(row.cost_sum, 557331.0);
        assert_eq!(row.real_units, 75.0);
        assert_eq!(costing::round2(row.avg_unit_cost), 7431.08);
    }

    #[test]
    fn test_name_summary_matches_code_summary_under_1to1_mapping() {
        let dims = test_dimensions();
        let records = sample_records(&dims);
        let summary = summarize(&records, &dims, &RecordFilter::all());

        assert_eq!(summary.by_reference.len(), summary.by_reference_name.len());
        for code_row in &summary.by_reference {
            let name_row = summary
                .by_reference_name
                .iter()
                .find(|r| r.reference_name == code_row.reference_name)
                .unwrap();
            assert_eq!(name_row.units_sum, code_row.units_sum);
            assert_eq!(name_row.cost_sum, code_row.cost_sum);
            assert_eq!(name_row.avg_unit_cost, code_row.avg_unit_cost);
        }
    }

    #[test]
    fn test_cost_center_distribution() {
        let dims = test_dimensions();
        let records = sample_records(&dims);
        let summary = summarize(&records, &dims, &RecordFilter::all());

        // Corte records (center 1), Pulida (center 2), Empaque (center 3).
        assert_eq!(summary.cost_center_distribution.len(), 3);
        let names: Vec<&str> = summary
            .cost_center_distribution
            .iter()
            .map(|s| s.cost_center_name.as_str())
            .collect();
        assert_eq!(names, ["Acabado", "Fabricación", "Terminado"]);

        let fabricacion = &summary.cost_center_distribution[1];
        let expected: f64 = records
            .iter()
            .filter(|r| r.cost_center_id == 1)
            .map(|r| r.total_cost)
            .sum();
        assert_eq!(fabricacion.cost_sum, expected);
    }

    #[test]
    fn test_unresolvable_cost_center_dropped_from_center_groupings() {
        let dims = test_dimensions();
        let mut orphan = record(&dims, 10, "Corte", "San Miguel 45cm", 10, 1.0);
        orphan.cost_center_id = 99;

        let summary = summarize(&[orphan], &dims, &RecordFilter::all());
        assert!(summary.cost_center_distribution.is_empty());
        assert!(summary.drill_down.is_empty());
        // The record still counts toward totals and reference summaries.
        assert_eq!(summary.totals.record_count, 1);
        assert_eq!(summary.by_reference.len(), 1);
    }

    #[test]
    fn test_drill_down_hierarchy() {
        let dims = test_dimensions();
        let records = sample_records(&dims);
        let summary = summarize(&records, &dims, &RecordFilter::all());

        assert_eq!(summary.drill_down.len(), 3);

        let fabricacion = summary
            .drill_down
            .iter()
            .find(|c| c.cost_center_name == "Fabricación")
            .unwrap();
        assert_eq!(fabricacion.activities.len(), 1);

        let corte = &fabricacion.activities[0];
        assert_eq!(corte.activity_name, "Corte");
        let reference_names: Vec<&str> = corte
            .references
            .iter()
            .map(|r| r.reference_name.as_str())
            .collect();
        assert_eq!(
            reference_names,
            ["San Miguel 45cm", "Virgen del Carmen 30cm"]
        );

        let rows = &corte.references[1].rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].units, 50);
        assert_eq!(rows[0].reference_code, "R001");
    }

    #[test]
    fn test_filter_pipeline_narrows_progressively() {
        let dims = test_dimensions();
        let records = sample_records(&dims);

        let filter = RecordFilter {
            date_from: Some(date(11)),
            date_to: Some(date(13)),
            cost_centers: vec!["Fabricación".to_string()],
            activities: vec![],
            references: vec!["San Miguel 45cm".to_string()],
        };
        let summary = summarize(&records, &dims, &filter);

        assert_eq!(summary.totals.record_count, 1);
        assert_eq!(summary.records[0].activity_name, "Corte");
        assert_eq!(summary.records[0].units, 30);
    }

    #[test]
    fn test_filter_order_is_commutative() {
        let dims = test_dimensions();
        let records = sample_records(&dims);

        // Center-then-activity vs activity-then-center: the filters are
        // AND-combined, so one pass with both criteria covers either order.
        let by_center_first = RecordFilter {
            cost_centers: vec!["Fabricación".to_string()],
            activities: vec!["Corte".to_string()],
            ..RecordFilter::default()
        };
        let narrowed = by_center_first.apply(&records, &dims);

        let only_activity = RecordFilter {
            activities: vec!["Corte".to_string()],
            ..RecordFilter::default()
        };
        let only_center = RecordFilter {
            cost_centers: vec!["Fabricación".to_string()],
            ..RecordFilter::default()
        };
        let reversed = only_center.apply(&only_activity.apply(&records, &dims), &dims);

        assert_eq!(narrowed, reversed);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let dims = test_dimensions();
        let records = sample_records(&dims);

        let first = summarize(&records, &dims, &RecordFilter::all());
        let second = summarize(&records, &dims, &RecordFilter::all());
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_tables_point_at_numeric_views() {
        let dims = test_dimensions();
        let records = sample_records(&dims);
        let summary = summarize(&records, &dims, &RecordFilter::all());

        let export = summary.export_tables();
        assert_eq!(export.records.len(), 4);
        assert_eq!(export.reference_summary.len(), 2);
        // Table 1 is the filtered set, unmodified.
        assert_eq!(export.records, summary.records.as_slice());
    }
}
