//! Ranking engine: hard-filters a candidate set, scores the survivors,
//! and returns a deterministic top-N with rationale.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::knowledge::{KnowledgeBase, KnowledgeItem};
use crate::profile::{ScoringContext, SubjectProfile};
use crate::scoring::{ScoreBreakdown, score_item};

/// A scored candidate. The aggregate lives in `breakdown.aggregate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: String,
    pub name: String,
    pub breakdown: ScoreBreakdown,
}

impl Recommendation {
    pub fn score(&self) -> f32 {
        self.breakdown.aggregate
    }
}

/// Candidate pre-filters applied before scoring. Exclusion filtering is
/// always on; these narrow the pool further.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// Restrict to items carrying this category tag.
    pub category: Option<String>,
    /// Restrict to items applicable in the context's season.
    pub in_season_only: bool,
}

impl CandidateFilter {
    pub fn for_category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            in_season_only: false,
        }
    }
}

/// Scores and ranks candidates from an injected knowledge base.
pub struct RankingEngine<'a> {
    kb: &'a KnowledgeBase,
    parallel: bool,
}

impl<'a> RankingEngine<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            parallel: false,
        }
    }

    /// Enable parallel candidate scoring. The final sort stays
    /// sequential so tie-break order is unaffected.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rank the full store (after filters) and return the top N.
    pub fn rank(
        &self,
        profile: &SubjectProfile,
        ctx: &ScoringContext,
        filter: &CandidateFilter,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let candidates: Vec<&KnowledgeItem> = self.kb.items().collect();
        self.rank_candidates(profile, ctx, filter, candidates, top_n)
    }

    /// Rank the store plus externally supplied candidates (e.g. from a
    /// generative advisor). Extras are deduplicated by id against the
    /// store and re-scored like any other candidate; their origin earns
    /// no score.
    pub fn rank_with_extras(
        &self,
        profile: &SubjectProfile,
        ctx: &ScoringContext,
        filter: &CandidateFilter,
        extras: &'a [KnowledgeItem],
        top_n: usize,
    ) -> Vec<Recommendation> {
        let mut candidates: Vec<&KnowledgeItem> = self.kb.items().collect();
        for extra in extras {
            if self.kb.get(&extra.id).is_none() && !candidates.iter().any(|c| c.id == extra.id) {
                candidates.push(extra);
            }
        }
        self.rank_candidates(profile, ctx, filter, candidates, top_n)
    }

    /// Rank an explicit candidate sequence. Order of the input decides
    /// final tie-breaking (first-seen wins).
    pub fn rank_candidates(
        &self,
        profile: &SubjectProfile,
        ctx: &ScoringContext,
        filter: &CandidateFilter,
        candidates: Vec<&KnowledgeItem>,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let season = ctx.effective_season();
        let admitted: Vec<&KnowledgeItem> = candidates
            .into_iter()
            .filter(|item| {
                if is_excluded(profile, item) {
                    return false;
                }
                if let Some(category) = &filter.category
                    && !item.in_category(category)
                {
                    return false;
                }
                if filter.in_season_only && !item.in_season(season) {
                    return false;
                }
                true
            })
            .collect();

        debug!(
            admitted = admitted.len(),
            parallel = self.parallel,
            "scoring candidate pool"
        );

        // Scoring is embarrassingly parallel; collect preserves input
        // order, and the sequential stable sort below is the
        // serialization point for deterministic tie-breaking.
        let mut scored: Vec<Recommendation> = if self.parallel {
            admitted
                .par_iter()
                .map(|item| recommend(profile, item, ctx))
                .collect()
        } else {
            admitted
                .iter()
                .map(|item| recommend(profile, item, ctx))
                .collect()
        };

        scored.sort_by(|a, b| {
            b.breakdown
                .aggregate
                .total_cmp(&a.breakdown.aggregate)
                .then(b.breakdown.constitutional.total_cmp(&a.breakdown.constitutional))
        });
        scored.truncate(top_n);
        scored
    }
}

fn recommend(
    profile: &SubjectProfile,
    item: &KnowledgeItem,
    ctx: &ScoringContext,
) -> Recommendation {
    Recommendation {
        item_id: item.id.clone(),
        name: item.name.clone(),
        breakdown: score_item(profile, item, ctx),
    }
}

/// Hard exclusion filter: contraindication tags against the subject's
/// exclusions and current symptoms, and dietary exclusion tags against
/// item categories and ingredient names. Never a score penalty.
fn is_excluded(profile: &SubjectProfile, item: &KnowledgeItem) -> bool {
    let blocked = |tag: &str| {
        profile
            .exclusions
            .iter()
            .chain(profile.symptoms.iter())
            .any(|t| t.eq_ignore_ascii_case(tag))
    };
    if item.contraindications.iter().any(|c| blocked(c)) {
        return true;
    }

    let dietary = |name: &str| {
        profile
            .exclusions
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name))
    };
    item.categories.iter().any(|c| dietary(c))
        || item.ingredients.iter().any(|i| dietary(&i.name))
}
