//! Fixed scoring constants. Historical tuning values preserved for
//! behavioral parity; tests pin the exact numbers.

/// Every aggregate starts here before sub-score deltas are applied.
pub const BASE_SCORE: f32 = 50.0;

/// Weighted dosha effect beyond this magnitude counts as a categorical
/// increase/decrease; anything inside is neutral.
pub const DOSHA_IMPACT_THRESHOLD: f32 = 0.5;

/// Bonus when the net effect pacifies the subject's primary archetype.
pub const CONSTITUTIONAL_BONUS: f32 = 20.0;

/// Penalty when the net effect aggravates the subject's primary archetype.
pub const CONSTITUTIONAL_PENALTY: f32 = 20.0;

/// Sub-score points per unit of signed dosha effect (effects span
/// [-3, +3], mapped across the 50-point half-range).
pub const EFFECT_SCORE_SLOPE: f32 = 50.0 / 3.0;

/// Midpoint of the preference matrices; deviations from it, scaled by
/// 100, adjust thermal scores.
pub const MATRIX_MIDPOINT: f32 = 0.5;

/// Increment per matched therapeutic goal tag.
pub const GOAL_MATCH_INCREMENT: f32 = 10.0;

/// Cap on the total therapeutic increment.
pub const GOAL_MATCH_CAP: f32 = 30.0;

/// Bonus for easy-to-digest items when the subject's digestion is weak.
pub const DIGESTIBILITY_BONUS: f32 = 15.0;

/// Temperature hints beyond these bounds shift thermal preferences.
pub const HOT_HINT_CELSIUS: f32 = 30.0;
pub const COLD_HINT_CELSIUS: f32 = 10.0;

/// Preference shift applied by an extreme temperature hint.
pub const HINT_PREFERENCE_SHIFT: f32 = 0.1;

pub const SCORE_MIN: f32 = 0.0;
pub const SCORE_MAX: f32 = 100.0;
