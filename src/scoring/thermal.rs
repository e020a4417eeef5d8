//! Thermal/seasonal fit: preference matrices per season and per
//! constitution, combined into bounded sub-scores.

use super::constants::{
    COLD_HINT_CELSIUS, HINT_PREFERENCE_SHIFT, HOT_HINT_CELSIUS, MATRIX_MIDPOINT, SCORE_MAX,
    SCORE_MIN,
};
use crate::knowledge::ThermalEffect;
use crate::profile::{Archetype, PrimaryDosha, Season};

/// Season-preference matrix: relative preference in [0, 1] for each
/// thermal category per season.
pub fn season_preference(season: Season, thermal: ThermalEffect) -> f32 {
    use Season::*;
    use ThermalEffect::*;
    match (season, thermal) {
        (Winter, Heating) => 0.9,
        (Winter, Cooling) => 0.1,
        (Winter, Neutral) => 0.6,
        (Summer, Heating) => 0.1,
        (Summer, Cooling) => 0.9,
        (Summer, Neutral) => 0.6,
        (Spring, Heating) => 0.7,
        (Spring, Cooling) => 0.3,
        (Spring, Neutral) => 0.5,
        (Autumn, Heating) => 0.6,
        (Autumn, Cooling) => 0.4,
        (Autumn, Neutral) => 0.5,
        (Monsoon, Heating) => 0.8,
        (Monsoon, Cooling) => 0.2,
        (Monsoon, Neutral) => 0.5,
    }
}

/// Constitution-preference matrix: relative preference in [0, 1] for
/// each thermal category per primary dosha.
pub fn constitution_preference(dosha: PrimaryDosha, thermal: ThermalEffect) -> f32 {
    use PrimaryDosha::*;
    use ThermalEffect::*;
    match (dosha, thermal) {
        (Vata, Heating) => 0.8,
        (Vata, Cooling) => 0.2,
        (Vata, Neutral) => 0.6,
        (Pitta, Heating) => 0.1,
        (Pitta, Cooling) => 0.9,
        (Pitta, Neutral) => 0.6,
        (Kapha, Heating) => 0.8,
        (Kapha, Cooling) => 0.2,
        (Kapha, Neutral) => 0.5,
    }
}

/// Preference of an archetype, averaged over its primaries.
/// Tridoshic averages all three.
fn archetype_preference(archetype: Archetype, thermal: ThermalEffect) -> f32 {
    let primaries = archetype.primaries();
    let doshas: &[PrimaryDosha] = if primaries.is_empty() {
        &PrimaryDosha::ALL
    } else {
        primaries
    };
    doshas
        .iter()
        .map(|d| constitution_preference(*d, thermal))
        .sum::<f32>()
        / doshas.len() as f32
}

/// An extreme regional temperature hint shifts the seasonal preference
/// toward cooling (hot) or heating (cold) by a fixed amount.
fn hint_shift(thermal: ThermalEffect, temperature_hint: Option<f32>) -> f32 {
    let Some(temp) = temperature_hint else {
        return 0.0;
    };
    let direction = if temp >= HOT_HINT_CELSIUS {
        -1.0
    } else if temp <= COLD_HINT_CELSIUS {
        1.0
    } else {
        return 0.0;
    };
    match thermal {
        ThermalEffect::Heating => direction * HINT_PREFERENCE_SHIFT,
        ThermalEffect::Cooling => -direction * HINT_PREFERENCE_SHIFT,
        ThermalEffect::Neutral => 0.0,
    }
}

/// Seasonal suitability: base 50, each matrix contributes its own
/// deviation from the midpoint scaled by 100, clamped to [0, 100].
pub fn seasonal_fit(
    archetype: Archetype,
    thermal: ThermalEffect,
    season: Season,
    temperature_hint: Option<f32>,
) -> f32 {
    let sp = (season_preference(season, thermal) + hint_shift(thermal, temperature_hint))
        .clamp(0.0, 1.0);
    let cp = archetype_preference(archetype, thermal);
    let adjustment = (sp - MATRIX_MIDPOINT) * 100.0 + (cp - MATRIX_MIDPOINT) * 100.0;
    (50.0 + adjustment).clamp(SCORE_MIN, SCORE_MAX)
}

/// Constitutional-thermal fit: the same method against the constitution
/// matrix only.
pub fn constitutional_thermal_fit(archetype: Archetype, thermal: ThermalEffect) -> f32 {
    let cp = archetype_preference(archetype, thermal);
    (50.0 + (cp - MATRIX_MIDPOINT) * 100.0).clamp(SCORE_MIN, SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooling_suits_pitta_in_summer() {
        // 50 + 40 (season) + 40 (constitution), clamped to 100.
        let score = seasonal_fit(Archetype::Pitta, ThermalEffect::Cooling, Season::Summer, None);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn heating_fails_pitta_in_summer() {
        let score = seasonal_fit(Archetype::Pitta, ThermalEffect::Heating, Season::Summer, None);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn each_matrix_contributes_its_full_deviation() {
        // Autumn/Heating: season 0.6 adds 10, vata constitution 0.8 adds
        // 30; the adjustments sum rather than average.
        let score = seasonal_fit(Archetype::Vata, ThermalEffect::Heating, Season::Autumn, None);
        assert_eq!(score, 90.0);
    }

    #[test]
    fn constitutional_thermal_uses_constitution_matrix_only() {
        assert_eq!(
            constitutional_thermal_fit(Archetype::Pitta, ThermalEffect::Cooling),
            90.0
        );
        assert_eq!(
            constitutional_thermal_fit(Archetype::Vata, ThermalEffect::Cooling),
            20.0
        );
    }

    #[test]
    fn hot_hint_shifts_toward_cooling() {
        let without = seasonal_fit(Archetype::Vata, ThermalEffect::Cooling, Season::Summer, None);
        let with = seasonal_fit(
            Archetype::Vata,
            ThermalEffect::Cooling,
            Season::Summer,
            Some(35.0),
        );
        assert_eq!(without, 60.0);
        assert_eq!(with, 70.0);
        // Mild temperatures change nothing.
        let mild = seasonal_fit(
            Archetype::Vata,
            ThermalEffect::Cooling,
            Season::Summer,
            Some(20.0),
        );
        assert_eq!(mild, without);
    }

    #[test]
    fn scores_stay_bounded() {
        for season in Season::ALL {
            for thermal in [
                ThermalEffect::Heating,
                ThermalEffect::Cooling,
                ThermalEffect::Neutral,
            ] {
                let s = seasonal_fit(Archetype::Kapha, thermal, season, Some(40.0));
                assert!((0.0..=100.0).contains(&s));
            }
        }
    }
}
