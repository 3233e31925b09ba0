//! Plan overview: the aggregation that joins Planner data (setup, SKUs,
//! drops, commercial actions), Creative Space data (tech packs) and AI
//! Advisor data (stored recommendations) into one dashboard payload.
//!
//! Everything here is a pure function over pre-loaded facts; the API layer
//! does the loading.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::planning::SetupData;
use crate::pricing::{round2, segment_for_price};
use crate::types::{DbId, Timestamp};

/// Percentage sums within this distance of 100 are accepted silently.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Input facts
// ---------------------------------------------------------------------------

/// The parts of a SKU row the overview needs.
#[derive(Debug, Clone)]
pub struct SkuFacts {
    pub id: DbId,
    pub family: String,
    pub pvp: f64,
    pub cost: f64,
    pub margin: Option<f64>,
    pub units: i32,
    pub drop_id: Option<DbId>,
    pub launch_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct DropFacts {
    pub id: DbId,
    pub name: String,
    pub launch_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct TechPackFacts {
    pub id: DbId,
    pub sku_id: Option<DbId>,
}

/// A stored AI Advisor output.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorEntry {
    pub kind: String,
    pub created_at: Timestamp,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, Default)]
pub struct OverviewInput {
    pub setup: SetupData,
    pub skus: Vec<SkuFacts>,
    pub drops: Vec<DropFacts>,
    pub commercial_action_count: usize,
    pub tech_packs: Vec<TechPackFacts>,
    pub advisor: Vec<AdvisorEntry>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PlanOverview {
    pub totals: Totals,
    pub family_mix: Vec<MixLine>,
    pub segment_mix: SegmentMix,
    pub drops: DropSummary,
    pub monthly: Vec<MonthLine>,
    pub creative: CreativeSummary,
    pub advisor: Vec<AdvisorEntry>,
    pub commercial_action_count: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub sku_count: usize,
    pub total_units: i64,
    pub projected_revenue: f64,
    pub total_cost: f64,
    pub average_margin: Option<f64>,
    pub target_sales: f64,
    pub sales_gap: f64,
}

/// Target vs actual share for one product family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixLine {
    pub name: String,
    pub target_pct: f64,
    pub sku_count: usize,
    pub actual_pct: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentMix {
    pub segments: Vec<MixLine>,
    pub unsegmented_skus: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropLine {
    pub id: DbId,
    pub name: String,
    pub launch_date: NaiveDate,
    pub sku_count: usize,
    pub units: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropSummary {
    pub planned_count: i32,
    pub scheduled: Vec<DropLine>,
    pub unassigned_skus: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLine {
    pub month: u32,
    pub target_pct: f64,
    pub planned_launches: usize,
    pub launch_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeSummary {
    pub tech_pack_count: usize,
    pub skus_with_tech_pack: usize,
    pub sku_coverage_pct: f64,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Build the overview for one plan.
pub fn build_overview(input: OverviewInput) -> PlanOverview {
    let totals = compute_totals(&input);
    let family_mix = compute_family_mix(&input);
    let segment_mix = compute_segment_mix(&input);
    let drops = compute_drops(&input);
    let monthly = compute_monthly(&input);
    let creative = compute_creative(&input);
    let warnings = collect_warnings(&input, &totals, &drops);

    PlanOverview {
        totals,
        family_mix,
        segment_mix,
        drops,
        monthly,
        creative,
        advisor: input.advisor,
        commercial_action_count: input.commercial_action_count,
        warnings,
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(count as f64 / total as f64 * 100.0)
    }
}

fn compute_totals(input: &OverviewInput) -> Totals {
    let total_units: i64 = input.skus.iter().map(|s| i64::from(s.units.max(0))).sum();
    let projected_revenue: f64 = input
        .skus
        .iter()
        .map(|s| s.pvp * f64::from(s.units.max(0)))
        .sum();
    let total_cost: f64 = input
        .skus
        .iter()
        .map(|s| s.cost * f64::from(s.units.max(0)))
        .sum();

    let margins: Vec<f64> = input.skus.iter().filter_map(|s| s.margin).collect();
    let average_margin = if margins.is_empty() {
        None
    } else {
        Some(round2(margins.iter().sum::<f64>() / margins.len() as f64))
    };

    Totals {
        sku_count: input.skus.len(),
        total_units,
        projected_revenue: round2(projected_revenue),
        total_cost: round2(total_cost),
        average_margin,
        target_sales: input.setup.target_sales,
        sales_gap: round2(input.setup.target_sales - projected_revenue),
    }
}

fn compute_family_mix(input: &OverviewInput) -> Vec<MixLine> {
    let total = input.skus.len();

    // Count SKUs per family, matching target names case-insensitively.
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut display: HashMap<String, String> = HashMap::new();
    for sku in &input.skus {
        let key = sku.family.trim().to_lowercase();
        *counts.entry(key.clone()).or_default() += 1;
        display.entry(key).or_insert_with(|| sku.family.trim().to_string());
    }

    let mut lines = Vec::new();
    let mut targeted = HashSet::new();
    for target in &input.setup.product_families {
        let key = target.family.trim().to_lowercase();
        let sku_count = counts.get(&key).copied().unwrap_or(0);
        let actual_pct = share(sku_count, total);
        lines.push(MixLine {
            name: target.family.clone(),
            target_pct: target.percentage,
            sku_count,
            actual_pct,
            delta: round2(actual_pct - target.percentage),
        });
        targeted.insert(key);
    }

    let mut extra: Vec<(&String, &usize)> = counts
        .iter()
        .filter(|(key, _)| !targeted.contains(*key))
        .collect();
    extra.sort_by(|a, b| a.0.cmp(b.0));
    for (key, &sku_count) in extra {
        let actual_pct = share(sku_count, total);
        lines.push(MixLine {
            name: display.get(key).cloned().unwrap_or_else(|| key.clone()),
            target_pct: 0.0,
            sku_count,
            actual_pct,
            delta: actual_pct,
        });
    }

    lines
}

fn compute_segment_mix(input: &OverviewInput) -> SegmentMix {
    let total = input.skus.len();
    let segments = &input.setup.price_segments;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut unsegmented_skus = 0;
    for sku in &input.skus {
        match segment_for_price(sku.pvp, segments) {
            Some(name) => *counts.entry(name).or_default() += 1,
            None => unsegmented_skus += 1,
        }
    }

    let segments = segments
        .iter()
        .map(|seg| {
            let sku_count = counts.get(seg.name.as_str()).copied().unwrap_or(0);
            let actual_pct = share(sku_count, total);
            MixLine {
                name: seg.name.clone(),
                target_pct: seg.percentage,
                sku_count,
                actual_pct,
                delta: round2(actual_pct - seg.percentage),
            }
        })
        .collect();

    SegmentMix {
        segments,
        unsegmented_skus,
    }
}

fn compute_drops(input: &OverviewInput) -> DropSummary {
    let mut per_drop: HashMap<DbId, (usize, i64)> = HashMap::new();
    let mut unassigned_skus = 0;
    let known: HashSet<DbId> = input.drops.iter().map(|d| d.id).collect();

    for sku in &input.skus {
        match sku.drop_id.filter(|id| known.contains(id)) {
            Some(drop_id) => {
                let entry = per_drop.entry(drop_id).or_default();
                entry.0 += 1;
                entry.1 += i64::from(sku.units.max(0));
            }
            None => unassigned_skus += 1,
        }
    }

    let mut scheduled: Vec<DropLine> = input
        .drops
        .iter()
        .map(|d| {
            let (sku_count, units) = per_drop.get(&d.id).copied().unwrap_or((0, 0));
            DropLine {
                id: d.id,
                name: d.name.clone(),
                launch_date: d.launch_date,
                sku_count,
                units,
            }
        })
        .collect();
    scheduled.sort_by(|a, b| a.launch_date.cmp(&b.launch_date).then(a.id.cmp(&b.id)));

    DropSummary {
        planned_count: input.setup.drop_count,
        scheduled,
        unassigned_skus,
    }
}

/// A SKU launches on its own date, or on its drop's date when it has none.
fn effective_launch(sku: &SkuFacts, drop_dates: &HashMap<DbId, NaiveDate>) -> Option<NaiveDate> {
    sku.launch_date
        .or_else(|| sku.drop_id.and_then(|id| drop_dates.get(&id).copied()))
}

fn compute_monthly(input: &OverviewInput) -> Vec<MonthLine> {
    use chrono::Datelike;

    let drop_dates: HashMap<DbId, NaiveDate> =
        input.drops.iter().map(|d| (d.id, d.launch_date)).collect();

    let mut launches: BTreeMap<u32, usize> = BTreeMap::new();
    let mut dated = 0;
    for sku in &input.skus {
        if let Some(date) = effective_launch(sku, &drop_dates) {
            *launches.entry(date.month()).or_default() += 1;
            dated += 1;
        }
    }

    let targets: HashMap<u32, f64> = input
        .setup
        .monthly_distribution
        .iter()
        .map(|m| (m.month, m.percentage))
        .collect();

    (1..=12)
        .filter(|m| targets.contains_key(m) || launches.contains_key(m))
        .map(|month| {
            let planned_launches = launches.get(&month).copied().unwrap_or(0);
            MonthLine {
                month,
                target_pct: targets.get(&month).copied().unwrap_or(0.0),
                planned_launches,
                launch_pct: share(planned_launches, dated),
            }
        })
        .collect()
}

fn compute_creative(input: &OverviewInput) -> CreativeSummary {
    let sku_ids: HashSet<DbId> = input.skus.iter().map(|s| s.id).collect();
    let covered: HashSet<DbId> = input
        .tech_packs
        .iter()
        .filter_map(|tp| tp.sku_id)
        .filter(|id| sku_ids.contains(id))
        .collect();

    CreativeSummary {
        tech_pack_count: input.tech_packs.len(),
        skus_with_tech_pack: covered.len(),
        sku_coverage_pct: share(covered.len(), input.skus.len()),
    }
}

fn collect_warnings(input: &OverviewInput, totals: &Totals, drops: &DropSummary) -> Vec<String> {
    let mut warnings = Vec::new();
    let setup = &input.setup;

    if !setup.product_families.is_empty()
        && (setup.family_total() - 100.0).abs() > PERCENT_SUM_TOLERANCE
    {
        warnings.push(format!(
            "Product family targets sum to {}%, expected 100%",
            round2(setup.family_total())
        ));
    }
    if !setup.monthly_distribution.is_empty()
        && (setup.monthly_total() - 100.0).abs() > PERCENT_SUM_TOLERANCE
    {
        warnings.push(format!(
            "Monthly distribution sums to {}%, expected 100%",
            round2(setup.monthly_total())
        ));
    }
    // A drop_count of 0 means no drop plan has been set yet.
    if setup.drop_count > 0 && drops.scheduled.len() != setup.drop_count as usize {
        warnings.push(format!(
            "{} drops scheduled but {} planned",
            drops.scheduled.len(),
            setup.drop_count
        ));
    }
    if drops.unassigned_skus > 0 {
        warnings.push(format!(
            "{} SKUs are not assigned to a drop",
            drops.unassigned_skus
        ));
    }
    if setup.target_sales > 0.0 && totals.projected_revenue < setup.target_sales {
        warnings.push(format!(
            "Projected revenue {} is below the sales target {}",
            totals.projected_revenue, setup.target_sales
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
