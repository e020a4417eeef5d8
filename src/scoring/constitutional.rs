//! Constitutional fit: how an item's weighted dosha effects align with
//! the subject's archetype.

use serde::{Deserialize, Serialize};

use super::constants::{
    CONSTITUTIONAL_BONUS, CONSTITUTIONAL_PENALTY, DOSHA_IMPACT_THRESHOLD, EFFECT_SCORE_SLOPE,
    SCORE_MAX, SCORE_MIN,
};
use crate::knowledge::DoshaEffects;
use crate::profile::{Archetype, PrimaryDosha};

/// Categorical impact of a weighted effect scalar on one dosha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoshaImpact {
    Increases,
    Decreases,
    Neutral,
}

/// Map a signed effect to a categorical impact via the +/-0.5 threshold.
pub fn classify_impact(effect: f32) -> DoshaImpact {
    if effect >= DOSHA_IMPACT_THRESHOLD {
        DoshaImpact::Increases
    } else if effect <= -DOSHA_IMPACT_THRESHOLD {
        DoshaImpact::Decreases
    } else {
        DoshaImpact::Neutral
    }
}

#[derive(Debug, Clone)]
pub struct ConstitutionalFit {
    /// Sub-score in [0, 100]; 50 is neutral.
    pub sub_score: f32,
    pub rationale: Vec<String>,
}

/// Score each primary axis of the archetype independently and average.
/// Pacifying a primary (effect at or beyond the threshold, negative)
/// earns the fixed bonus; aggravating it costs the fixed penalty.
/// Tridoshic subjects score by closeness to net-neutral.
pub fn constitutional_fit(effects: &DoshaEffects, archetype: Archetype) -> ConstitutionalFit {
    let primaries = archetype.primaries();
    if primaries.is_empty() {
        return tridoshic_fit(effects);
    }

    let mut total = 0.0;
    let mut rationale = Vec::new();
    for dosha in primaries {
        let effect = effects.get(*dosha);
        let mut score = 50.0 - effect * EFFECT_SCORE_SLOPE;
        match classify_impact(effect) {
            DoshaImpact::Decreases => {
                score += CONSTITUTIONAL_BONUS;
                rationale.push(format!("pacifies {}", dosha.as_str()));
            }
            DoshaImpact::Increases => {
                score -= CONSTITUTIONAL_PENALTY;
                rationale.push(format!("aggravates {}", dosha.as_str()));
            }
            DoshaImpact::Neutral => {
                rationale.push(format!("neutral for {}", dosha.as_str()));
            }
        }
        total += score.clamp(SCORE_MIN, SCORE_MAX);
    }

    ConstitutionalFit {
        sub_score: total / primaries.len() as f32,
        rationale,
    }
}

fn tridoshic_fit(effects: &DoshaEffects) -> ConstitutionalFit {
    let mean_abs: f32 = PrimaryDosha::ALL
        .iter()
        .map(|d| effects.get(*d).abs())
        .sum::<f32>()
        / PrimaryDosha::ALL.len() as f32;
    // Net-neutral is best: 100 at zero effect, 0 at the +/-3 extreme.
    let sub_score = (SCORE_MAX - mean_abs * (SCORE_MAX / 3.0)).clamp(SCORE_MIN, SCORE_MAX);
    ConstitutionalFit {
        sub_score,
        rationale: vec![format!("tridoshic balance, mean effect {:.2}", mean_abs)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_threshold_is_half_a_point() {
        assert_eq!(classify_impact(0.5), DoshaImpact::Increases);
        assert_eq!(classify_impact(-0.5), DoshaImpact::Decreases);
        assert_eq!(classify_impact(0.49), DoshaImpact::Neutral);
        assert_eq!(classify_impact(-0.49), DoshaImpact::Neutral);
    }

    #[test]
    fn strong_pacification_maxes_out() {
        let effects = DoshaEffects { vata: 0.0, pitta: -3.0, kapha: 0.0 };
        let fit = constitutional_fit(&effects, Archetype::Pitta);
        assert_eq!(fit.sub_score, 100.0);
        assert_eq!(fit.rationale, vec!["pacifies pitta".to_string()]);
    }

    #[test]
    fn strong_aggravation_bottoms_out() {
        let effects = DoshaEffects { vata: 0.0, pitta: 3.0, kapha: 0.0 };
        let fit = constitutional_fit(&effects, Archetype::Pitta);
        assert_eq!(fit.sub_score, 0.0);
    }

    #[test]
    fn neutral_effect_scores_midrange() {
        let effects = DoshaEffects::default();
        let fit = constitutional_fit(&effects, Archetype::Vata);
        assert_eq!(fit.sub_score, 50.0);
    }

    #[test]
    fn composite_archetype_averages_primaries() {
        let effects = DoshaEffects { vata: -3.0, pitta: 3.0, kapha: 0.0 };
        let fit = constitutional_fit(&effects, Archetype::VataPitta);
        assert_eq!(fit.sub_score, 50.0);
        assert_eq!(fit.rationale.len(), 2);
    }

    #[test]
    fn tridoshic_prefers_net_neutral() {
        let neutral = constitutional_fit(&DoshaEffects::default(), Archetype::Tridoshic);
        let skewed = constitutional_fit(
            &DoshaEffects { vata: 3.0, pitta: -3.0, kapha: 3.0 },
            Archetype::Tridoshic,
        );
        assert_eq!(neutral.sub_score, 100.0);
        assert!(skewed.sub_score < neutral.sub_score);
    }
}
