//! Taste/attribute profile aggregator: combines weighted item vectors
//! into a composite profile scored against the ideal reference
//! distribution.

use serde::{Deserialize, Serialize};

use crate::knowledge::{AttributeVector, TasteAxis, TasteProfile};

/// Ideal reference distribution in percent, by canonical axis order:
/// sweet 30, sour 15, salty 10, pungent 15, bitter 20, astringent 10.
/// Historical tuning values, preserved for behavioral parity.
pub const IDEAL_TASTE_DISTRIBUTION: [f32; 6] = [30.0, 15.0, 10.0, 15.0, 20.0, 10.0];

/// Mean-absolute-deviation boundary (percentage points) for "balanced".
pub const BALANCED_DEVIATION_LIMIT: f32 = 10.0;

/// Boundary for "imbalanced"; anything above is severely imbalanced.
pub const IMBALANCED_DEVIATION_LIMIT: f32 = 20.0;

/// An axis is dominant when its share strictly exceeds this percentage.
pub const DOMINANT_SHARE_THRESHOLD: f32 = 25.0;

/// An axis is deficient below this fraction of its ideal share.
pub const DEFICIENT_IDEAL_FRACTION: f32 = 0.5;

pub fn ideal_share(axis: TasteAxis) -> f32 {
    IDEAL_TASTE_DISTRIBUTION[axis as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceCategory {
    Balanced,
    Imbalanced,
    SeverelyImbalanced,
}

/// Weighted sum of one or more attribute vectors, normalized to
/// percentages, with a deviation-from-ideal balance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeProfile {
    /// Per-axis percentages; sum to 100 unless the input total was zero.
    pub percentages: TasteProfile,
    /// Balance score in [0, 100]; the ideal distribution scores 100.
    pub balance_score: u8,
    pub category: BalanceCategory,
    /// Top two axes strictly above 25%.
    pub dominant: Vec<TasteAxis>,
    /// Axes below half their ideal share.
    pub deficient: Vec<TasteAxis>,
}

/// Aggregate weighted attribute vectors into a composite profile.
/// A zero weighted total yields a zero profile with balance score 0
/// rather than a division error.
pub fn aggregate(parts: &[(&AttributeVector, f32)]) -> CompositeProfile {
    let weighted: Vec<(&TasteProfile, f32)> =
        parts.iter().map(|(av, w)| (&av.tastes, *w)).collect();
    aggregate_tastes(&weighted)
}

/// Aggregate weighted taste profiles directly.
pub fn aggregate_tastes(parts: &[(&TasteProfile, f32)]) -> CompositeProfile {
    let mut sums = TasteProfile::default();
    for (tastes, weight) in parts {
        for axis in TasteAxis::ALL {
            sums.set(axis, sums.get(axis) + tastes.get(axis) * weight);
        }
    }

    let total = sums.total();
    let mut percentages = TasteProfile::default();
    if total > 0.0 {
        for axis in TasteAxis::ALL {
            percentages.set(axis, sums.get(axis) / total * 100.0);
        }
    }

    profile_from_percentages(percentages)
}

fn profile_from_percentages(percentages: TasteProfile) -> CompositeProfile {
    // Score: mean relative deviation from ideal, per axis.
    let mut relative_deviation = 0.0;
    let mut absolute_deviation = 0.0;
    for axis in TasteAxis::ALL {
        let ideal = ideal_share(axis);
        let diff = (percentages.get(axis) - ideal).abs();
        absolute_deviation += diff;
        relative_deviation += diff / ideal;
    }
    let axes = TasteAxis::ALL.len() as f32;
    let mean_relative = relative_deviation / axes;
    let mean_absolute = absolute_deviation / axes;

    let balance_score = ((1.0 - mean_relative) * 100.0).round().max(0.0) as u8;

    let category = if mean_absolute <= BALANCED_DEVIATION_LIMIT {
        BalanceCategory::Balanced
    } else if mean_absolute <= IMBALANCED_DEVIATION_LIMIT {
        BalanceCategory::Imbalanced
    } else {
        BalanceCategory::SeverelyImbalanced
    };

    // Dominant: top two axes strictly above the share threshold,
    // largest first; canonical axis order breaks ties.
    let mut by_share: Vec<TasteAxis> = TasteAxis::ALL.to_vec();
    by_share.sort_by(|a, b| percentages.get(*b).total_cmp(&percentages.get(*a)));
    let dominant: Vec<TasteAxis> = by_share
        .into_iter()
        .filter(|a| percentages.get(*a) > DOMINANT_SHARE_THRESHOLD)
        .take(2)
        .collect();

    let deficient: Vec<TasteAxis> = TasteAxis::ALL
        .into_iter()
        .filter(|a| percentages.get(*a) < ideal_share(*a) * DEFICIENT_IDEAL_FRACTION)
        .collect();

    CompositeProfile {
        percentages,
        balance_score,
        category,
        dominant,
        deficient,
    }
}
