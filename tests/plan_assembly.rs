//! Plan assembly over a full weekly grid, including the degraded paths.

use chrono::NaiveDate;

use ahara::knowledge::{Digestibility, ItemRecord, KnowledgeBase, TasteProfile, ThermalEffect};
use ahara::planner::{MealType, PlanAssembler, SlotGrid, SlotOutcome};
use ahara::profile::{Archetype, DigestiveStrength, ScoringContext, SubjectProfile};

fn item(id: &str, category: &str, sweet: f32, pungent: f32) -> ItemRecord {
    ItemRecord {
        id: id.to_string(),
        name: id.to_string(),
        categories: vec![category.to_string()],
        cuisine: None,
        tastes: TasteProfile {
            sweet,
            pungent,
            bitter: 10.0,
            ..Default::default()
        },
        thermal: ThermalEffect::Neutral,
        thermal_intensity: None,
        dosha_effects: None,
        seasons: vec![],
        digestibility: Digestibility::Moderate,
        contraindications: vec![],
        benefits: vec![],
        nutrients: Default::default(),
        ingredients: vec![],
        preparation: None,
    }
}

fn subject() -> SubjectProfile {
    SubjectProfile {
        id: "subject".to_string(),
        archetype: Archetype::VataPitta,
        digestive_strength: DigestiveStrength::Moderate,
        stress_level: 0.5,
        symptoms: vec![],
        goals: vec![],
        exclusions: vec![],
    }
}

fn ctx() -> ScoringContext {
    ScoringContext::for_date(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap())
}

#[test]
fn empty_dinner_pool_marks_slots_and_completes_the_rest() {
    // Breakfast and snack pools exist; nothing carries "main-course",
    // so lunch and dinner have empty filtered candidate sets.
    let kb = KnowledgeBase::from_records(vec![
        item("porridge", "breakfast", 40.0, 0.0),
        item("upma", "breakfast", 30.0, 5.0),
        item("fruit-bowl", "snack", 50.0, 0.0),
    ]);
    let grid = SlotGrid::new(7, vec![MealType::Breakfast, MealType::Dinner, MealType::Snack]);
    let plan = PlanAssembler::new(&kb).assemble(&subject(), &ctx(), &grid);

    assert_eq!(plan.slots.len(), 21);
    assert!(matches!(
        plan.slot(2, MealType::Dinner).unwrap().outcome,
        SlotOutcome::NoCandidates
    ));
    // Every non-dinner slot is still populated.
    let filled = plan
        .slots
        .iter()
        .filter(|s| matches!(s.outcome, SlotOutcome::Selected { .. }))
        .count();
    assert_eq!(filled, 14);
}

#[test]
fn weekly_assembly_fills_every_slot_with_a_rich_pool() {
    let mut records = Vec::new();
    for i in 0..6 {
        records.push(item(&format!("b{i}"), "breakfast", 20.0 + i as f32 * 5.0, 0.0));
        records.push(item(&format!("m{i}"), "main-course", 25.0 + i as f32 * 5.0, 5.0));
        records.push(item(&format!("s{i}"), "snack", 15.0 + i as f32 * 5.0, 0.0));
    }
    let kb = KnowledgeBase::from_records(records);
    let plan = PlanAssembler::new(&kb).assemble(&subject(), &ctx(), &SlotGrid::week());

    assert_eq!(plan.slots.len(), 28);
    assert!(plan
        .slots
        .iter()
        .all(|s| matches!(s.outcome, SlotOutcome::Selected { .. })));
    assert!(plan.relaxations.is_empty());
}

#[test]
fn repetition_caps_hold_across_the_week() {
    let mut records = Vec::new();
    for i in 0..8 {
        records.push(item(&format!("m{i}"), "main-course", 20.0 + i as f32 * 3.0, 2.0));
    }
    let kb = KnowledgeBase::from_records(records);
    let grid = SlotGrid::new(7, vec![MealType::Lunch, MealType::Dinner]);
    let plan = PlanAssembler::new(&kb)
        .with_caps(1, 3)
        .assemble(&subject(), &ctx(), &grid);

    // No item twice in one day, none more than three times overall.
    for day in 0..7 {
        let mut in_day = Vec::new();
        for meal in [MealType::Lunch, MealType::Dinner] {
            if let SlotOutcome::Selected { item_id, .. } =
                &plan.slot(day, meal).unwrap().outcome
            {
                in_day.push(item_id.clone());
            }
        }
        assert_eq!(in_day.len(), 2);
        assert_ne!(in_day[0], in_day[1], "day {day} repeated an item");
    }
    let mut counts = std::collections::HashMap::new();
    for slot in &plan.slots {
        if let SlotOutcome::Selected { item_id, .. } = &slot.outcome {
            *counts.entry(item_id.clone()).or_insert(0u32) += 1;
        }
    }
    assert!(counts.values().all(|c| *c <= 3));
    assert!(plan.relaxations.is_empty());
}

#[test]
fn assembly_is_deterministic() {
    let mut records = Vec::new();
    for i in 0..5 {
        records.push(item(&format!("b{i}"), "breakfast", 30.0, 0.0));
        records.push(item(&format!("m{i}"), "main-course", 30.0, 0.0));
        records.push(item(&format!("s{i}"), "snack", 30.0, 0.0));
    }
    let kb = KnowledgeBase::from_records(records);
    let assembler = PlanAssembler::new(&kb);
    let first = serde_json::to_string(&assembler.assemble(&subject(), &ctx(), &SlotGrid::week()))
        .unwrap();
    let second = serde_json::to_string(&assembler.assemble(&subject(), &ctx(), &SlotGrid::week()))
        .unwrap();
    assert_eq!(first, second);
}
