//! Attribute vector store: a read-only, in-memory knowledge base of
//! scored food/recipe items with load-time validation and backfill.
//!
//! Malformed records are quarantined with a reason, never coerced; the
//! store serves the remaining valid items.

pub mod inference;
pub mod item;

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{AharaError, Result};
pub use item::{
    AttributeVector, Digestibility, DoshaEffects, IngredientLine, IngredientRole, ItemRecord,
    KnowledgeItem, Nutrients, TasteAxis, TasteProfile, ThermalEffect,
};

/// A record rejected at load time, kept for the quarantine report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QuarantinedItem {
    pub id: String,
    pub reason: String,
}

/// Immutable store of knowledge items. Constructor-injected into every
/// component that needs it; no global state.
#[derive(Debug)]
pub struct KnowledgeBase {
    items: Vec<KnowledgeItem>,
    index: HashMap<String, usize>,
    quarantine: Vec<QuarantinedItem>,
}

impl KnowledgeBase {
    /// Bulk-load items from a JSON file (an array of item records).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AharaError::Knowledge {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let records: Vec<ItemRecord> = serde_json::from_str(&content)?;
        let kb = Self::from_records(records);
        info!(
            items = kb.len(),
            quarantined = kb.quarantine.len(),
            "knowledge base loaded from {}",
            path.display()
        );
        Ok(kb)
    }

    /// Build a store from in-memory records. Runs the same validation
    /// and backfill pipeline as file loading.
    pub fn from_records(records: Vec<ItemRecord>) -> Self {
        let mut items = Vec::with_capacity(records.len());
        let mut index = HashMap::new();
        let mut quarantine = Vec::new();

        for record in records {
            match validate(&record) {
                Some(reason) => {
                    warn!(id = %record.id, %reason, "quarantining malformed item");
                    quarantine.push(QuarantinedItem {
                        id: record.id,
                        reason,
                    });
                }
                None => {
                    if index.contains_key(&record.id) {
                        warn!(id = %record.id, "quarantining duplicate item id");
                        quarantine.push(QuarantinedItem {
                            id: record.id,
                            reason: "duplicate id".to_string(),
                        });
                        continue;
                    }
                    let item = backfill(record);
                    index.insert(item.id.clone(), items.len());
                    items.push(item);
                }
            }
        }

        Self {
            items,
            index,
            quarantine,
        }
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeItem> {
        self.index.get(id).map(|i| &self.items[*i])
    }

    /// All items in load order.
    pub fn items(&self) -> impl Iterator<Item = &KnowledgeItem> {
        self.items.iter()
    }

    /// Finite, restartable query over the in-memory collection.
    pub fn query<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a KnowledgeItem>
    where
        P: Fn(&KnowledgeItem) -> bool + 'a,
    {
        self.items.iter().filter(move |item| predicate(item))
    }

    pub fn quarantine(&self) -> &[QuarantinedItem] {
        &self.quarantine
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Returns a rejection reason for a malformed record, or None if valid.
fn validate(record: &ItemRecord) -> Option<String> {
    for axis in TasteAxis::ALL {
        if record.tastes.get(axis) < 0.0 {
            return Some(format!("negative {} intensity", axis.as_str()));
        }
    }
    if let Some(intensity) = record.thermal_intensity
        && !(1.0..=5.0).contains(&intensity)
    {
        return Some(format!("thermal intensity {intensity} outside [1, 5]"));
    }
    None
}

/// Complete a validated record: infer missing thermal intensity and
/// dosha effects from taste composition.
fn backfill(record: ItemRecord) -> KnowledgeItem {
    let thermal_intensity = record
        .thermal_intensity
        .unwrap_or_else(|| inference::infer_thermal_intensity(&record.tastes));
    let dosha_effects = record.dosha_effects.unwrap_or_else(|| {
        inference::infer_dosha_effects(&record.tastes, record.thermal, thermal_intensity)
    });

    KnowledgeItem {
        id: record.id,
        name: record.name,
        categories: record.categories,
        cuisine: record.cuisine,
        attributes: AttributeVector {
            tastes: record.tastes,
            thermal: record.thermal,
            thermal_intensity,
            dosha_effects,
        },
        seasons: record.seasons,
        digestibility: record.digestibility,
        contraindications: record.contraindications,
        benefits: record.benefits,
        nutrients: record.nutrients,
        ingredients: record.ingredients,
        preparation: record.preparation,
    }
}
