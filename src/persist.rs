//! External collaborator seams: profile and plan stores.
//!
//! The engine only consumes/produces in-memory values; these traits mark
//! the boundary, and the JSON-file implementations back the CLI.

use std::path::{Path, PathBuf};

use crate::error::{AharaError, Result};
use crate::planner::Plan;
use crate::profile::SubjectProfile;

/// Read-only source of subject profiles. The engine never writes one.
pub trait ProfileStore {
    fn load_profile(&self, id: &str) -> Result<SubjectProfile>;
}

/// Persistence for assembled plans.
pub trait PlanStore {
    fn save_plan(&self, plan: &Plan) -> Result<()>;
    fn load_plan(&self, id: &str) -> Result<Plan>;
}

/// JSON-file profile store: one `<id>.json` per profile under
/// `<dir>/profiles`.
pub struct JsonProfileStore {
    dir: PathBuf,
}

impl JsonProfileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("profiles"),
        }
    }
}

impl ProfileStore for JsonProfileStore {
    fn load_profile(&self, id: &str) -> Result<SubjectProfile> {
        let path = self.dir.join(format!("{id}.json"));
        if !path.exists() {
            return Err(AharaError::NotFound {
                what: format!("profile '{id}'"),
            });
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// JSON-file plan store: one `<id>.json` per plan under `<dir>/plans`.
pub struct JsonPlanStore {
    dir: PathBuf,
}

impl JsonPlanStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("plans"),
        }
    }
}

impl PlanStore for JsonPlanStore {
    fn save_plan(&self, plan: &Plan) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.json", plan.id));
        let content = serde_json::to_string_pretty(plan)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn load_plan(&self, id: &str) -> Result<Plan> {
        let path = self.dir.join(format!("{id}.json"));
        if !path.exists() {
            return Err(AharaError::NotFound {
                what: format!("plan '{id}'"),
            });
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
