//! Item schema for the attribute vector store.

use serde::{Deserialize, Serialize};

use crate::profile::Season;

/// Canonical taste axes in their conventional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TasteAxis {
    Sweet,
    Sour,
    Salty,
    Pungent,
    Bitter,
    Astringent,
}

impl TasteAxis {
    pub const ALL: [TasteAxis; 6] = [
        TasteAxis::Sweet,
        TasteAxis::Sour,
        TasteAxis::Salty,
        TasteAxis::Pungent,
        TasteAxis::Bitter,
        TasteAxis::Astringent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TasteAxis::Sweet => "sweet",
            TasteAxis::Sour => "sour",
            TasteAxis::Salty => "salty",
            TasteAxis::Pungent => "pungent",
            TasteAxis::Bitter => "bitter",
            TasteAxis::Astringent => "astringent",
        }
    }
}

/// Six non-negative taste intensities. Item-level intensities need not sum
/// to any fixed total; normalization happens at aggregation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TasteProfile {
    #[serde(default)]
    pub sweet: f32,
    #[serde(default)]
    pub sour: f32,
    #[serde(default)]
    pub salty: f32,
    #[serde(default)]
    pub pungent: f32,
    #[serde(default)]
    pub bitter: f32,
    #[serde(default)]
    pub astringent: f32,
}

impl TasteProfile {
    pub fn get(&self, axis: TasteAxis) -> f32 {
        match axis {
            TasteAxis::Sweet => self.sweet,
            TasteAxis::Sour => self.sour,
            TasteAxis::Salty => self.salty,
            TasteAxis::Pungent => self.pungent,
            TasteAxis::Bitter => self.bitter,
            TasteAxis::Astringent => self.astringent,
        }
    }

    pub fn set(&mut self, axis: TasteAxis, value: f32) {
        match axis {
            TasteAxis::Sweet => self.sweet = value,
            TasteAxis::Sour => self.sour = value,
            TasteAxis::Salty => self.salty = value,
            TasteAxis::Pungent => self.pungent = value,
            TasteAxis::Bitter => self.bitter = value,
            TasteAxis::Astringent => self.astringent = value,
        }
    }

    pub fn total(&self) -> f32 {
        TasteAxis::ALL.iter().map(|a| self.get(*a)).sum()
    }
}

/// Thermal effect category (virya).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalEffect {
    Heating,
    Cooling,
    Neutral,
}

impl ThermalEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThermalEffect::Heating => "heating",
            ThermalEffect::Cooling => "cooling",
            ThermalEffect::Neutral => "neutral",
        }
    }
}

/// Signed per-archetype effect scalars, conventionally in [-3, +3].
/// Negative pacifies, positive aggravates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DoshaEffects {
    pub vata: f32,
    pub pitta: f32,
    pub kapha: f32,
}

impl DoshaEffects {
    pub fn get(&self, dosha: crate::profile::PrimaryDosha) -> f32 {
        use crate::profile::PrimaryDosha;
        match dosha {
            PrimaryDosha::Vata => self.vata,
            PrimaryDosha::Pitta => self.pitta,
            PrimaryDosha::Kapha => self.kapha,
        }
    }
}

/// Complete attribute vector after load-time validation and backfill.
/// Thermal intensity is always present (explicit or inferred), in [1, 5].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeVector {
    pub tastes: TasteProfile,
    pub thermal: ThermalEffect,
    pub thermal_intensity: f32,
    pub dosha_effects: DoshaEffects,
}

/// Digestibility tier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Digestibility {
    Easy,
    Moderate,
    Heavy,
}

/// Role an ingredient plays in a recipe; drives shopping-list priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientRole {
    Main,
    Base,
    Spice,
    Garnish,
    Other,
}

/// One ingredient line as declared on an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f32,
    pub unit: String,
    #[serde(default = "IngredientLine::default_role")]
    pub role: IngredientRole,
}

impl IngredientLine {
    fn default_role() -> IngredientRole {
        IngredientRole::Other
    }
}

/// Declared nutrient fields, summed verbatim by the reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    #[serde(default)]
    pub calories: f32,
    #[serde(default)]
    pub protein_g: f32,
    #[serde(default)]
    pub carbs_g: f32,
    #[serde(default)]
    pub fat_g: f32,
    #[serde(default)]
    pub fiber_g: f32,
}

impl Nutrients {
    pub fn add(&mut self, other: &Nutrients) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
        self.fiber_g += other.fiber_g;
    }
}

/// A food/recipe item in the knowledge base. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: String,
    pub name: String,
    /// Category/slot tags, e.g. "breakfast", "main-course", "snack".
    pub categories: Vec<String>,
    pub cuisine: Option<String>,
    pub attributes: AttributeVector,
    /// Applicable seasons; empty means all seasons.
    pub seasons: Vec<Season>,
    pub digestibility: Digestibility,
    pub contraindications: Vec<String>,
    /// Declared benefit/use tags matched against subject goals.
    pub benefits: Vec<String>,
    pub nutrients: Nutrients,
    pub ingredients: Vec<IngredientLine>,
    pub preparation: Option<String>,
}

impl KnowledgeItem {
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(category))
    }

    pub fn in_season(&self, season: Season) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&season)
    }
}

/// Raw item record as deserialized from the knowledge file, before
/// validation and backfill. Thermal intensity and dosha effects are
/// optional here; the inference step fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    pub tastes: TasteProfile,
    #[serde(default = "ItemRecord::default_thermal")]
    pub thermal: ThermalEffect,
    #[serde(default)]
    pub thermal_intensity: Option<f32>,
    #[serde(default)]
    pub dosha_effects: Option<DoshaEffects>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default = "ItemRecord::default_digestibility")]
    pub digestibility: Digestibility,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub nutrients: Nutrients,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub preparation: Option<String>,
}

impl ItemRecord {
    fn default_thermal() -> ThermalEffect {
        ThermalEffect::Neutral
    }

    fn default_digestibility() -> Digestibility {
        Digestibility::Moderate
    }
}
