//! Aggregation reporter: derived rollups over a completed plan.
//! Purely recomputable from the plan plus the knowledge base; holds no
//! state of its own.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::knowledge::{IngredientRole, KnowledgeBase, Nutrients};
use crate::planner::{Plan, SlotOutcome};

/// Weekly nutrient targets the report measures deltas against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTargets {
    pub calories: f32,
    pub protein_g: f32,
    pub fiber_g: f32,
}

impl Default for WeeklyTargets {
    fn default() -> Self {
        Self {
            calories: 14000.0,
            protein_g: 350.0,
            fiber_g: 175.0,
        }
    }
}

/// Shopping-list priority derived from ingredient roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientPriority {
    Essential,
    Optional,
}

/// One quantity line within an aggregated shopping entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityLine {
    pub quantity: f32,
    pub unit: String,
}

/// An aggregated shopping entry. Quantities with matching units are
/// summed; mismatched units are kept as separate lines and flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingEntry {
    pub name: String,
    pub priority: IngredientPriority,
    pub lines: Vec<QuantityLine>,
    pub unit_mismatch: bool,
}

/// Delta of one nutrient against its weekly target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDelta {
    pub nutrient: String,
    pub target: f32,
    pub actual: f32,
    pub delta: f32,
}

/// Externally measured progress. The engine never fabricates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressMeasurement {
    pub goal_completion_pct: f32,
    pub weight_change_kg: f32,
    pub measured_on: NaiveDate,
}

/// Progress section of the report: measured data or an explicit
/// missing-data marker, never a fabricated value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ProgressSummary {
    Measured(ProgressMeasurement),
    MissingData,
}

/// The full derived report for a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationReport {
    pub plan_id: String,
    /// Nutrient totals indexed by day.
    pub daily_totals: Vec<Nutrients>,
    pub plan_total: Nutrients,
    /// Merged shopping list, ordered by ingredient name.
    pub shopping: Vec<ShoppingEntry>,
    pub goal_deltas: Vec<GoalDelta>,
    pub progress: ProgressSummary,
    pub warnings: Vec<String>,
}

/// Walk a completed plan and compute all rollups. Deterministic: the
/// same inputs produce byte-identical output (all collections are
/// ordered).
pub fn aggregate_plan(
    plan: &Plan,
    kb: &KnowledgeBase,
    targets: &WeeklyTargets,
    progress: Option<ProgressMeasurement>,
) -> AggregationReport {
    let days = plan.slots.iter().map(|s| s.day + 1).max().unwrap_or(0);
    let mut daily_totals = vec![Nutrients::default(); days];
    let mut plan_total = Nutrients::default();
    let mut warnings = Vec::new();

    // name (lowercased) -> (display name, per-unit quantities, priority)
    type Entry = (String, BTreeMap<String, f32>, IngredientPriority);
    let mut merged: BTreeMap<String, Entry> = BTreeMap::new();

    for slot in &plan.slots {
        let SlotOutcome::Selected { item_id, .. } = &slot.outcome else {
            continue;
        };
        let Some(item) = kb.get(item_id) else {
            let note = format!("item '{item_id}' no longer in knowledge base");
            warn!("{note}");
            warnings.push(note);
            continue;
        };

        daily_totals[slot.day].add(&item.nutrients);
        plan_total.add(&item.nutrients);

        for line in &item.ingredients {
            let key = line.name.to_lowercase();
            let priority = role_priority(line.role);
            let entry = merged
                .entry(key)
                .or_insert_with(|| (line.name.clone(), BTreeMap::new(), priority));
            *entry.1.entry(line.unit.clone()).or_insert(0.0) += line.quantity;
            // Essential wins once any line carries a main/base role.
            if priority == IngredientPriority::Essential {
                entry.2 = IngredientPriority::Essential;
            }
        }
    }

    let shopping: Vec<ShoppingEntry> = merged
        .into_values()
        .map(|(name, units, priority)| {
            let unit_mismatch = units.len() > 1;
            if unit_mismatch {
                warnings.push(format!(
                    "unit mismatch for '{name}': {}",
                    units.keys().cloned().collect::<Vec<_>>().join(", ")
                ));
            }
            ShoppingEntry {
                name,
                priority,
                lines: units
                    .into_iter()
                    .map(|(unit, quantity)| QuantityLine { quantity, unit })
                    .collect(),
                unit_mismatch,
            }
        })
        .collect();

    let goal_deltas = vec![
        delta("calories", targets.calories, plan_total.calories),
        delta("protein_g", targets.protein_g, plan_total.protein_g),
        delta("fiber_g", targets.fiber_g, plan_total.fiber_g),
    ];

    let progress = match progress {
        Some(measurement) => ProgressSummary::Measured(measurement),
        None => ProgressSummary::MissingData,
    };

    AggregationReport {
        plan_id: plan.id.clone(),
        daily_totals,
        plan_total,
        shopping,
        goal_deltas,
        progress,
        warnings,
    }
}

fn role_priority(role: IngredientRole) -> IngredientPriority {
    match role {
        IngredientRole::Main | IngredientRole::Base => IngredientPriority::Essential,
        IngredientRole::Spice | IngredientRole::Garnish | IngredientRole::Other => {
            IngredientPriority::Optional
        }
    }
}

fn delta(nutrient: &str, target: f32, actual: f32) -> GoalDelta {
    GoalDelta {
        nutrient: nutrient.to_string(),
        target,
        actual,
        delta: actual - target,
    }
}
