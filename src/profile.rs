//! Subject profiles, constitutional archetypes, and per-request scoring context.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One of the three primary constitutional axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryDosha {
    Vata,
    Pitta,
    Kapha,
}

impl PrimaryDosha {
    pub const ALL: [PrimaryDosha; 3] = [PrimaryDosha::Vata, PrimaryDosha::Pitta, PrimaryDosha::Kapha];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryDosha::Vata => "vata",
            PrimaryDosha::Pitta => "pitta",
            PrimaryDosha::Kapha => "kapha",
        }
    }
}

/// Constitutional archetype: a primary, a two-way composite, or balanced-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Vata,
    Pitta,
    Kapha,
    VataPitta,
    PittaKapha,
    VataKapha,
    Tridoshic,
}

impl Archetype {
    /// Primary axes this archetype is biased toward pacifying.
    /// Tridoshic has no dominant axis; callers treat net-neutral as best.
    pub fn primaries(&self) -> &'static [PrimaryDosha] {
        match self {
            Archetype::Vata => &[PrimaryDosha::Vata],
            Archetype::Pitta => &[PrimaryDosha::Pitta],
            Archetype::Kapha => &[PrimaryDosha::Kapha],
            Archetype::VataPitta => &[PrimaryDosha::Vata, PrimaryDosha::Pitta],
            Archetype::PittaKapha => &[PrimaryDosha::Pitta, PrimaryDosha::Kapha],
            Archetype::VataKapha => &[PrimaryDosha::Vata, PrimaryDosha::Kapha],
            Archetype::Tridoshic => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Vata => "vata",
            Archetype::Pitta => "pitta",
            Archetype::Kapha => "kapha",
            Archetype::VataPitta => "vata-pitta",
            Archetype::PittaKapha => "pitta-kapha",
            Archetype::VataKapha => "vata-kapha",
            Archetype::Tridoshic => "tridoshic",
        }
    }
}

/// Digestive strength tier of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestiveStrength {
    Weak,
    Moderate,
    Strong,
}

/// Subject profile consumed by the scorer. Read-only input per call;
/// produced and maintained by an external profile store.
///
/// The archetype is a required enum field, so a profile missing it fails
/// at deserialization rather than deep inside a scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub id: String,
    pub archetype: Archetype,
    pub digestive_strength: DigestiveStrength,
    /// Stress/activity scalar in [0, 1].
    #[serde(default)]
    pub stress_level: f32,
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Therapeutic goal tags, matched against item benefit tags.
    #[serde(default)]
    pub goals: Vec<String>,
    /// Dietary exclusion tags (allergens, avoided categories/ingredients).
    #[serde(default)]
    pub exclusions: Vec<String>,
}

/// Five-season convention used by the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Monsoon,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Spring,
        Season::Summer,
        Season::Monsoon,
        Season::Autumn,
        Season::Winter,
    ];

    /// Fixed month mapping: Mar-Apr spring, May-Jun summer, Jul-Aug monsoon,
    /// Sep-Oct autumn, Nov-Feb winter.
    pub fn from_date(date: NaiveDate) -> Season {
        match date.month() {
            3 | 4 => Season::Spring,
            5 | 6 => Season::Summer,
            7 | 8 => Season::Monsoon,
            9 | 10 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Monsoon => "monsoon",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

/// Transient per-request context: season (derived from the date when not
/// supplied) and optional regional temperature hint in degrees Celsius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringContext {
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub temperature_hint: Option<f32>,
    pub date: NaiveDate,
}

impl ScoringContext {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            season: None,
            temperature_hint: None,
            date,
        }
    }

    pub fn with_season(date: NaiveDate, season: Season) -> Self {
        Self {
            season: Some(season),
            temperature_hint: None,
            date,
        }
    }

    /// Explicit season wins; otherwise derive from the reference date.
    pub fn effective_season(&self) -> Season {
        self.season.unwrap_or_else(|| Season::from_date(self.date))
    }
}
