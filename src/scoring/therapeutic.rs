//! Therapeutic-goal and digestibility fit.

use super::constants::{DIGESTIBILITY_BONUS, GOAL_MATCH_CAP, GOAL_MATCH_INCREMENT};
use crate::knowledge::Digestibility;
use crate::profile::DigestiveStrength;

#[derive(Debug, Clone)]
pub struct GoalFit {
    /// Capped increment added to the aggregate, in [0, GOAL_MATCH_CAP].
    pub increment: f32,
    /// The goal tags that matched.
    pub matches: Vec<String>,
}

/// Count case-insensitive exact tag matches between subject goals and
/// item benefit tags; each match contributes a fixed increment, capped.
pub fn goal_fit(goals: &[String], benefits: &[String]) -> GoalFit {
    let mut matches = Vec::new();
    for goal in goals {
        if benefits.iter().any(|b| b.eq_ignore_ascii_case(goal)) {
            matches.push(goal.clone());
        }
    }
    let increment = (matches.len() as f32 * GOAL_MATCH_INCREMENT).min(GOAL_MATCH_CAP);
    GoalFit { increment, matches }
}

/// Fixed bonus when a weak digester meets an easy item; neutral otherwise.
pub fn digestibility_fit(strength: DigestiveStrength, tier: Digestibility) -> f32 {
    match (strength, tier) {
        (DigestiveStrength::Weak, Digestibility::Easy) => DIGESTIBILITY_BONUS,
        _ => 0.0,
    }
}
