//! Compatibility scorer: per-axis sub-scores between a subject profile
//! and a candidate item (or weighted combination), plus one bounded
//! aggregate in [0, 100].

pub mod constants;
pub mod constitutional;
pub mod therapeutic;
pub mod thermal;

use serde::{Deserialize, Serialize};
use tracing::debug;

use constants::{BASE_SCORE, SCORE_MAX, SCORE_MIN};
use constitutional::constitutional_fit;
use therapeutic::{digestibility_fit, goal_fit};
use thermal::{constitutional_thermal_fit, seasonal_fit};

use crate::knowledge::{Digestibility, DoshaEffects, KnowledgeItem, ThermalEffect};
use crate::profile::{ScoringContext, SubjectProfile};

/// Per-axis sub-scores and the clamped aggregate, with a rationale of
/// which axes contributed positively or negatively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Constitutional fit sub-score in [0, 100]; 50 is neutral.
    pub constitutional: f32,
    /// Seasonal suitability in [0, 100] (season + constitution matrices).
    pub seasonal: f32,
    /// Constitutional-thermal fit in [0, 100] (constitution matrix only).
    pub constitutional_thermal: f32,
    /// Capped therapeutic-goal increment.
    pub therapeutic: f32,
    /// Digestibility bonus (0 or the fixed bonus).
    pub digestibility: f32,
    /// Base score plus all sub-score deltas, clamped to [0, 100].
    pub aggregate: f32,
    pub rationale: Vec<String>,
}

/// Score a single knowledge item against a subject profile and context.
pub fn score_item(
    profile: &SubjectProfile,
    item: &KnowledgeItem,
    ctx: &ScoringContext,
) -> ScoreBreakdown {
    let breakdown = score_parts(
        profile,
        &item.attributes.dosha_effects,
        item.attributes.thermal,
        &item.benefits,
        item.digestibility,
        ctx,
    );
    debug!(
        item = %item.id,
        aggregate = breakdown.aggregate,
        "scored candidate"
    );
    breakdown
}

/// Score a weighted combination of items (e.g. a full meal): dosha
/// effects are weight-averaged, the thermal category is the
/// weight-dominant one, benefits are unioned, and the digestibility
/// tier is the heaviest present.
pub fn score_combination(
    profile: &SubjectProfile,
    parts: &[(&KnowledgeItem, f32)],
    ctx: &ScoringContext,
) -> ScoreBreakdown {
    let total_weight: f32 = parts.iter().map(|(_, w)| w).sum();
    let mut effects = DoshaEffects::default();
    let mut heating = 0.0;
    let mut cooling = 0.0;
    let mut benefits: Vec<String> = Vec::new();
    let mut digestibility = Digestibility::Easy;

    for (item, weight) in parts {
        if total_weight > 0.0 {
            let share = weight / total_weight;
            effects.vata += item.attributes.dosha_effects.vata * share;
            effects.pitta += item.attributes.dosha_effects.pitta * share;
            effects.kapha += item.attributes.dosha_effects.kapha * share;
            match item.attributes.thermal {
                ThermalEffect::Heating => heating += share,
                ThermalEffect::Cooling => cooling += share,
                ThermalEffect::Neutral => {}
            }
        }
        for benefit in &item.benefits {
            if !benefits.iter().any(|b| b.eq_ignore_ascii_case(benefit)) {
                benefits.push(benefit.clone());
            }
        }
        digestibility = heavier(digestibility, item.digestibility);
    }

    let thermal = if heating > cooling && heating > 0.0 {
        ThermalEffect::Heating
    } else if cooling > heating {
        ThermalEffect::Cooling
    } else {
        ThermalEffect::Neutral
    };

    score_parts(profile, &effects, thermal, &benefits, digestibility, ctx)
}

fn heavier(a: Digestibility, b: Digestibility) -> Digestibility {
    fn rank(d: Digestibility) -> u8 {
        match d {
            Digestibility::Easy => 0,
            Digestibility::Moderate => 1,
            Digestibility::Heavy => 2,
        }
    }
    if rank(b) > rank(a) { b } else { a }
}

fn score_parts(
    profile: &SubjectProfile,
    effects: &DoshaEffects,
    thermal: ThermalEffect,
    benefits: &[String],
    digestibility: Digestibility,
    ctx: &ScoringContext,
) -> ScoreBreakdown {
    let season = ctx.effective_season();

    let constitutional = constitutional_fit(effects, profile.archetype);
    let seasonal = seasonal_fit(profile.archetype, thermal, season, ctx.temperature_hint);
    let constitutional_thermal = constitutional_thermal_fit(profile.archetype, thermal);
    let goals = goal_fit(&profile.goals, benefits);
    let digest_bonus = digestibility_fit(profile.digestive_strength, digestibility);

    let mut rationale = constitutional.rationale;
    if seasonal > 50.0 {
        rationale.push(format!(
            "{} suits {} season",
            thermal.as_str(),
            season.as_str()
        ));
    } else if seasonal < 50.0 {
        rationale.push(format!(
            "{} unsuited to {} season",
            thermal.as_str(),
            season.as_str()
        ));
    }
    for matched in &goals.matches {
        rationale.push(format!("supports goal '{matched}'"));
    }
    if digest_bonus > 0.0 {
        rationale.push("easy to digest for weak digestion".to_string());
    }

    // Base 50 plus every sub-score's own delta, clamped.
    let aggregate = (BASE_SCORE
        + (constitutional.sub_score - 50.0)
        + (seasonal - 50.0)
        + (constitutional_thermal - 50.0)
        + goals.increment
        + digest_bonus)
        .clamp(SCORE_MIN, SCORE_MAX);

    ScoreBreakdown {
        constitutional: constitutional.sub_score,
        seasonal,
        constitutional_thermal,
        therapeutic: goals.increment,
        digestibility: digest_bonus,
        aggregate,
        rationale,
    }
}
