//! Plan assembler: fills a day x meal-type slot grid from the ranking
//! engine under repetition caps, recording every relaxation and every
//! empty candidate set instead of failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::knowledge::KnowledgeBase;
use crate::profile::{ScoringContext, Season, SubjectProfile};
use crate::ranking::{CandidateFilter, RankingEngine, Recommendation};

/// Meal slots within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Default category each meal type draws from.
    pub fn default_category(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "main-course",
            MealType::Dinner => "main-course",
            MealType::Snack => "snack",
        }
    }
}

/// The slot grid to fill: `days` x the listed meal types.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    pub days: usize,
    pub meals: Vec<MealType>,
}

impl SlotGrid {
    pub fn week() -> Self {
        Self {
            days: 7,
            meals: MealType::ALL.to_vec(),
        }
    }

    pub fn new(days: usize, meals: Vec<MealType>) -> Self {
        Self { days, meals }
    }
}

/// What ended up in a slot. An empty filtered candidate set is reported
/// explicitly, never silently skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum SlotOutcome {
    Selected {
        item_id: String,
        name: String,
        score: f32,
        /// True when the repetition cap had to be relaxed for this slot.
        relaxed: bool,
    },
    NoCandidates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSlot {
    pub day: usize,
    pub meal: MealType,
    pub outcome: SlotOutcome,
}

/// An assembled plan: ordered slots plus the relaxation trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub profile_id: String,
    pub season: Season,
    pub created_on: chrono::NaiveDate,
    pub slots: Vec<PlanSlot>,
    /// Human-readable trace of repetition-cap relaxations.
    pub relaxations: Vec<String>,
}

impl Plan {
    pub fn slot(&self, day: usize, meal: MealType) -> Option<&PlanSlot> {
        self.slots.iter().find(|s| s.day == day && s.meal == meal)
    }
}

/// Repetition counters threaded through the assembly pass. Explicit
/// state, not shared mutation, so day-level assembly could be split
/// without hidden coupling.
#[derive(Debug, Default)]
struct RepetitionLedger {
    daily: HashMap<(usize, String), u32>,
    weekly: HashMap<String, u32>,
}

impl RepetitionLedger {
    fn count(&self, day: usize, item_id: &str) -> (u32, u32) {
        let daily = self
            .daily
            .get(&(day, item_id.to_string()))
            .copied()
            .unwrap_or(0);
        let weekly = self.weekly.get(item_id).copied().unwrap_or(0);
        (daily, weekly)
    }

    fn record(&mut self, day: usize, item_id: &str) {
        *self.daily.entry((day, item_id.to_string())).or_insert(0) += 1;
        *self.weekly.entry(item_id.to_string()).or_insert(0) += 1;
    }
}

/// Assembles plans slot by slot using an injected knowledge base.
pub struct PlanAssembler<'a> {
    kb: &'a KnowledgeBase,
    daily_cap: u32,
    weekly_cap: u32,
    candidates_per_slot: usize,
    parallel_scoring: bool,
    categories: HashMap<MealType, String>,
}

impl<'a> PlanAssembler<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            daily_cap: 1,
            weekly_cap: 3,
            candidates_per_slot: 10,
            parallel_scoring: false,
            categories: HashMap::new(),
        }
    }

    pub fn with_caps(mut self, daily: u32, weekly: u32) -> Self {
        self.daily_cap = daily.max(1);
        self.weekly_cap = weekly.max(1);
        self
    }

    /// Override the category a meal type draws candidates from.
    /// Meal types without an override use their default category.
    pub fn with_category(mut self, meal: MealType, category: impl Into<String>) -> Self {
        self.categories.insert(meal, category.into());
        self
    }

    pub fn with_candidates_per_slot(mut self, n: usize) -> Self {
        self.candidates_per_slot = n.max(1);
        self
    }

    pub fn with_parallel_scoring(mut self, parallel: bool) -> Self {
        self.parallel_scoring = parallel;
        self
    }

    /// Fill every slot of the grid. Slots are independent except for the
    /// repetition ledger carried across the pass.
    pub fn assemble(
        &self,
        profile: &SubjectProfile,
        ctx: &ScoringContext,
        grid: &SlotGrid,
    ) -> Plan {
        let engine = RankingEngine::new(self.kb).with_parallel(self.parallel_scoring);
        let mut ledger = RepetitionLedger::default();
        let mut slots = Vec::with_capacity(grid.days * grid.meals.len());
        let mut relaxations = Vec::new();

        for day in 0..grid.days {
            for meal in &grid.meals {
                let category = self
                    .categories
                    .get(meal)
                    .map(String::as_str)
                    .unwrap_or_else(|| meal.default_category());
                let filter = CandidateFilter::for_category(category);
                let ranked = engine.rank(profile, ctx, &filter, self.candidates_per_slot);
                let outcome = self.fill_slot(day, *meal, &ranked, &mut ledger, &mut relaxations);
                slots.push(PlanSlot {
                    day,
                    meal: *meal,
                    outcome,
                });
            }
        }

        let season = ctx.effective_season();
        let filled = slots
            .iter()
            .filter(|s| matches!(s.outcome, SlotOutcome::Selected { .. }))
            .count();
        info!(
            profile = %profile.id,
            slots = slots.len(),
            filled,
            relaxations = relaxations.len(),
            "plan assembled"
        );

        Plan {
            id: format!("{}-{}", profile.id, ctx.date),
            profile_id: profile.id.clone(),
            season,
            created_on: ctx.date,
            slots,
            relaxations,
        }
    }

    fn fill_slot(
        &self,
        day: usize,
        meal: MealType,
        ranked: &[Recommendation],
        ledger: &mut RepetitionLedger,
        relaxations: &mut Vec<String>,
    ) -> SlotOutcome {
        if ranked.is_empty() {
            warn!(day, meal = meal.as_str(), "no candidates for slot");
            return SlotOutcome::NoCandidates;
        }

        let pick = ranked.iter().find(|r| {
            let (daily, weekly) = ledger.count(day, &r.item_id);
            daily < self.daily_cap && weekly < self.weekly_cap
        });

        match pick {
            Some(rec) => {
                ledger.record(day, &rec.item_id);
                SlotOutcome::Selected {
                    item_id: rec.item_id.clone(),
                    name: rec.name.clone(),
                    score: rec.score(),
                    relaxed: false,
                }
            }
            None => {
                // Every ranked candidate is repetition-capped: relax the
                // cap for this slot rather than leave it empty.
                let rec = &ranked[0];
                let note = format!(
                    "day {} {}: repetition cap relaxed for '{}'",
                    day + 1,
                    meal.as_str(),
                    rec.name
                );
                warn!("{note}");
                relaxations.push(note);
                ledger.record(day, &rec.item_id);
                SlotOutcome::Selected {
                    item_id: rec.item_id.clone(),
                    name: rec.name.clone(),
                    score: rec.score(),
                    relaxed: true,
                }
            }
        }
    }
}
