//! Aggregation reports derived from an assembled plan.

use chrono::NaiveDate;

use ahara::knowledge::{
    Digestibility, IngredientLine, IngredientRole, ItemRecord, KnowledgeBase, Nutrients,
    TasteProfile, ThermalEffect,
};
use ahara::planner::{MealType, PlanAssembler, SlotGrid};
use ahara::profile::{Archetype, DigestiveStrength, ScoringContext, SubjectProfile};
use ahara::report::{
    IngredientPriority, ProgressMeasurement, ProgressSummary, WeeklyTargets, aggregate_plan,
};

fn line(name: &str, quantity: f32, unit: &str, role: IngredientRole) -> IngredientLine {
    IngredientLine {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        role,
    }
}

fn item(id: &str, category: &str, ingredients: Vec<IngredientLine>) -> ItemRecord {
    ItemRecord {
        id: id.to_string(),
        name: id.to_string(),
        categories: vec![category.to_string()],
        cuisine: None,
        tastes: TasteProfile {
            sweet: 30.0,
            sour: 10.0,
            ..Default::default()
        },
        thermal: ThermalEffect::Neutral,
        thermal_intensity: None,
        dosha_effects: None,
        seasons: vec![],
        digestibility: Digestibility::Easy,
        contraindications: vec![],
        benefits: vec![],
        nutrients: Nutrients {
            calories: 400.0,
            protein_g: 12.0,
            carbs_g: 55.0,
            fat_g: 9.0,
            fiber_g: 6.0,
        },
        ingredients,
        preparation: None,
    }
}

fn subject() -> SubjectProfile {
    SubjectProfile {
        id: "subject".to_string(),
        archetype: Archetype::Kapha,
        digestive_strength: DigestiveStrength::Weak,
        stress_level: 0.4,
        symptoms: vec![],
        goals: vec![],
        exclusions: vec![],
    }
}

fn assembled_plan(kb: &KnowledgeBase, days: usize) -> ahara::planner::Plan {
    let ctx = ScoringContext::for_date(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
    let grid = SlotGrid::new(days, vec![MealType::Lunch, MealType::Dinner]);
    PlanAssembler::new(kb).assemble(&subject(), &ctx, &grid)
}

fn ginger_kb() -> KnowledgeBase {
    KnowledgeBase::from_records(vec![
        item(
            "kitchari",
            "main-course",
            vec![
                line("Rice", 1.0, "cup", IngredientRole::Main),
                line("Ginger", 1.0, "tsp", IngredientRole::Spice),
            ],
        ),
        item(
            "dal-soup",
            "main-course",
            vec![
                line("Lentils", 1.0, "cup", IngredientRole::Main),
                line("Ginger", 2.0, "tsp", IngredientRole::Spice),
            ],
        ),
    ])
}

#[test]
fn shopping_list_merges_matching_units() {
    let kb = ginger_kb();
    let plan = assembled_plan(&kb, 1);
    let report = aggregate_plan(&plan, &kb, &WeeklyTargets::default(), None);

    let ginger = report
        .shopping
        .iter()
        .find(|e| e.name == "Ginger")
        .expect("ginger aggregated");
    assert!(!ginger.unit_mismatch);
    assert_eq!(ginger.lines.len(), 1);
    assert_eq!(ginger.lines[0].quantity, 3.0);
    assert_eq!(ginger.lines[0].unit, "tsp");
    assert_eq!(ginger.priority, IngredientPriority::Optional);

    let rice = report.shopping.iter().find(|e| e.name == "Rice").unwrap();
    assert_eq!(rice.priority, IngredientPriority::Essential);
}

#[test]
fn mismatched_units_keep_both_quantities() {
    let kb = KnowledgeBase::from_records(vec![
        item(
            "tea",
            "main-course",
            vec![line("Ginger", 1.0, "tsp", IngredientRole::Spice)],
        ),
        item(
            "broth",
            "main-course",
            vec![line("Ginger", 1.0, "inch", IngredientRole::Spice)],
        ),
    ]);
    let plan = assembled_plan(&kb, 1);
    let report = aggregate_plan(&plan, &kb, &WeeklyTargets::default(), None);

    let ginger = report.shopping.iter().find(|e| e.name == "Ginger").unwrap();
    assert!(ginger.unit_mismatch);
    assert_eq!(ginger.lines.len(), 2);
    let mut units: Vec<&str> = ginger.lines.iter().map(|l| l.unit.as_str()).collect();
    units.sort();
    assert_eq!(units, vec!["inch", "tsp"]);
    assert!(report.warnings.iter().any(|w| w.contains("Ginger")));
}

#[test]
fn totals_and_goal_deltas_follow_the_plan() {
    let kb = ginger_kb();
    let plan = assembled_plan(&kb, 7);
    let report = aggregate_plan(&plan, &kb, &WeeklyTargets::default(), None);

    assert_eq!(report.daily_totals.len(), 7);
    // Two 400-calorie meals a day.
    for day in &report.daily_totals {
        assert_eq!(day.calories, 800.0);
    }
    assert_eq!(report.plan_total.calories, 5600.0);
    let calories = report
        .goal_deltas
        .iter()
        .find(|d| d.nutrient == "calories")
        .unwrap();
    assert_eq!(calories.actual, 5600.0);
    assert_eq!(calories.delta, 5600.0 - calories.target);
}

#[test]
fn rerunning_the_reporter_is_byte_identical() {
    let kb = ginger_kb();
    let plan = assembled_plan(&kb, 7);
    let a = serde_json::to_vec(&aggregate_plan(&plan, &kb, &WeeklyTargets::default(), None))
        .unwrap();
    let b = serde_json::to_vec(&aggregate_plan(&plan, &kb, &WeeklyTargets::default(), None))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn progress_is_echoed_when_measured_and_marked_when_missing() {
    let kb = ginger_kb();
    let plan = assembled_plan(&kb, 1);

    let missing = aggregate_plan(&plan, &kb, &WeeklyTargets::default(), None);
    assert!(matches!(missing.progress, ProgressSummary::MissingData));

    let measured = aggregate_plan(
        &plan,
        &kb,
        &WeeklyTargets::default(),
        Some(ProgressMeasurement {
            goal_completion_pct: 62.5,
            weight_change_kg: -0.8,
            measured_on: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        }),
    );
    match measured.progress {
        ProgressSummary::Measured(m) => assert_eq!(m.goal_completion_pct, 62.5),
        ProgressSummary::MissingData => panic!("expected measured progress"),
    }
}
