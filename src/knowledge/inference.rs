//! Load-time backfill inference for items missing explicit thermal or
//! constitutional data. All inference is pure and deterministic so
//! repeated loads are idempotent.

use super::item::{DoshaEffects, TasteAxis, TasteProfile, ThermalEffect};

/// Neutral midpoint of the 1..=5 intensity scale.
const INTENSITY_MIDPOINT: f32 = 3.0;

/// How far the dominant-taste balance can push intensity off the midpoint.
const INTENSITY_SWING: f32 = 4.0;

/// Infer thermal intensity from dominant taste axes: pungent/sour raise
/// it, sweet/bitter lower it, clamped to [1, 5]. A zero-total profile
/// stays at the midpoint.
pub fn infer_thermal_intensity(tastes: &TasteProfile) -> f32 {
    let total = tastes.total();
    if total <= 0.0 {
        return INTENSITY_MIDPOINT;
    }
    let raising = (tastes.pungent + tastes.sour) / total;
    let lowering = (tastes.sweet + tastes.bitter) / total;
    (INTENSITY_MIDPOINT + (raising - lowering) * INTENSITY_SWING).clamp(1.0, 5.0)
}

/// Classical per-taste effect rows: unit contribution of each taste axis
/// to (vata, pitta, kapha). Negative pacifies, positive aggravates.
fn taste_effect_row(axis: TasteAxis) -> DoshaEffects {
    match axis {
        TasteAxis::Sweet => DoshaEffects { vata: -1.0, pitta: -1.0, kapha: 1.0 },
        TasteAxis::Sour => DoshaEffects { vata: -1.0, pitta: 1.0, kapha: 1.0 },
        TasteAxis::Salty => DoshaEffects { vata: -1.0, pitta: 1.0, kapha: 1.0 },
        TasteAxis::Pungent => DoshaEffects { vata: 1.0, pitta: 1.0, kapha: -1.0 },
        TasteAxis::Bitter => DoshaEffects { vata: 1.0, pitta: -1.0, kapha: -1.0 },
        TasteAxis::Astringent => DoshaEffects { vata: 1.0, pitta: -1.0, kapha: -1.0 },
    }
}

/// Infer per-archetype effects from taste composition plus the signed
/// thermal category, scaled into the conventional [-3, +3] range.
pub fn infer_dosha_effects(
    tastes: &TasteProfile,
    thermal: ThermalEffect,
    thermal_intensity: f32,
) -> DoshaEffects {
    let mut fx = DoshaEffects::default();
    let total = tastes.total();
    if total > 0.0 {
        for axis in TasteAxis::ALL {
            let share = tastes.get(axis) / total;
            let row = taste_effect_row(axis);
            fx.vata += row.vata * share * 3.0;
            fx.pitta += row.pitta * share * 3.0;
            fx.kapha += row.kapha * share * 3.0;
        }
    }

    // Thermal category shifts pitta directly and the other two half as much.
    let shift = thermal_intensity / 5.0;
    match thermal {
        ThermalEffect::Heating => {
            fx.pitta += shift;
            fx.vata -= shift * 0.5;
            fx.kapha -= shift * 0.5;
        }
        ThermalEffect::Cooling => {
            fx.pitta -= shift;
            fx.vata += shift * 0.5;
            fx.kapha += shift * 0.5;
        }
        ThermalEffect::Neutral => {}
    }

    DoshaEffects {
        vata: fx.vata.clamp(-3.0, 3.0),
        pitta: fx.pitta.clamp(-3.0, 3.0),
        kapha: fx.kapha.clamp(-3.0, 3.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pungent_sour() -> TasteProfile {
        TasteProfile {
            pungent: 80.0,
            sour: 20.0,
            ..Default::default()
        }
    }

    fn sweet_bitter() -> TasteProfile {
        TasteProfile {
            sweet: 60.0,
            bitter: 20.0,
            astringent: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn pungent_sour_maxes_intensity() {
        assert_eq!(infer_thermal_intensity(&pungent_sour()), 5.0);
    }

    #[test]
    fn sweet_bitter_floors_intensity() {
        assert_eq!(infer_thermal_intensity(&sweet_bitter()), 1.0);
    }

    #[test]
    fn zero_profile_stays_at_midpoint() {
        assert_eq!(infer_thermal_intensity(&TasteProfile::default()), 3.0);
    }

    #[test]
    fn cooling_sweet_item_pacifies_pitta() {
        let intensity = infer_thermal_intensity(&sweet_bitter());
        let fx = infer_dosha_effects(&sweet_bitter(), ThermalEffect::Cooling, intensity);
        assert!(fx.pitta <= -2.5, "expected strong pitta pacification, got {}", fx.pitta);
        assert!(fx.vata < 0.0);
    }

    #[test]
    fn heating_pungent_item_aggravates_pitta() {
        let intensity = infer_thermal_intensity(&pungent_sour());
        let fx = infer_dosha_effects(&pungent_sour(), ThermalEffect::Heating, intensity);
        assert!(fx.pitta >= 2.5);
        assert!(fx.kapha < 0.0);
    }

    #[test]
    fn inference_is_idempotent() {
        let tastes = pungent_sour();
        let a = infer_dosha_effects(&tastes, ThermalEffect::Heating, 5.0);
        let b = infer_dosha_effects(&tastes, ThermalEffect::Heating, 5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn effects_stay_in_conventional_range() {
        for thermal in [ThermalEffect::Heating, ThermalEffect::Cooling, ThermalEffect::Neutral] {
            let fx = infer_dosha_effects(&pungent_sour(), thermal, 5.0);
            for v in [fx.vata, fx.pitta, fx.kapha] {
                assert!((-3.0..=3.0).contains(&v));
            }
        }
    }
}
