//! Configuration loaded from ahara.toml and environment variables.
//!
//! Operational tunables only; the scoring constants live in
//! `scoring::constants` and are not configurable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::WeeklyTargets;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub system: SystemConfig,
    pub ranking: RankingConfig,
    pub planner: PlannerConfig,
    #[serde(default)]
    pub targets: WeeklyTargets,
}

/// System-level configuration: knowledge file, data directory, behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemConfig {
    pub knowledge_path: String,
    /// Directory for the JSON profile/plan stores. Defaults to the
    /// platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub parallel_scoring: bool,
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Ranking behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    pub top_n: usize,
    pub candidates_per_slot: usize,
}

/// Plan assembly behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlannerConfig {
    pub days: usize,
    pub daily_repeat_cap: u32,
    pub weekly_repeat_cap: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system: SystemConfig {
                knowledge_path: "knowledge.json".to_string(),
                data_dir: None,
                parallel_scoring: false,
                log_level: None,
            },
            ranking: RankingConfig {
                top_n: 10,
                candidates_per_slot: 10,
            },
            planner: PlannerConfig {
                days: 7,
                daily_repeat_cap: 1,
                weekly_repeat_cap: 3,
            },
            targets: WeeklyTargets::default(),
        }
    }
}

impl Config {
    /// Load configuration: `.env` first, then the TOML file named by
    /// `AHARA_CONFIG` (default `ahara.toml`, defaults when missing),
    /// then individual `AHARA_*` env overrides (env-first).
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var("AHARA_CONFIG").unwrap_or_else(|_| "ahara.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        if let Ok(path) = std::env::var("AHARA_KNOWLEDGE_PATH") {
            config.system.knowledge_path = path;
        }
        if let Ok(dir) = std::env::var("AHARA_DATA_DIR") {
            config.system.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(parallel) = std::env::var("AHARA_PARALLEL_SCORING") {
            config.system.parallel_scoring =
                parallel == "1" || parallel.eq_ignore_ascii_case("true");
        }
        if let Ok(level) = std::env::var("AHARA_LOG") {
            config.system.log_level = Some(level);
        }
        if let Some(top_n) = std::env::var("AHARA_TOP_N")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.ranking.top_n = top_n.clamp(1, 100);
        }
        if let Some(days) = std::env::var("AHARA_PLAN_DAYS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.planner.days = days.clamp(1, 31);
        }
        if let Some(cap) = std::env::var("AHARA_DAILY_REPEAT_CAP")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.planner.daily_repeat_cap = cap.clamp(1, 10);
        }
        if let Some(cap) = std::env::var("AHARA_WEEKLY_REPEAT_CAP")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.planner.weekly_repeat_cap = cap.clamp(1, 31);
        }

        Ok(config)
    }

    /// Data directory for the JSON stores, resolved against the
    /// platform default when unset.
    pub fn data_dir(&self) -> PathBuf {
        self.system.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ahara")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_caps() {
        let config = Config::default();
        assert_eq!(config.planner.daily_repeat_cap, 1);
        assert_eq!(config.planner.weekly_repeat_cap, 3);
        assert_eq!(config.planner.days, 7);
        assert!(!config.system.parallel_scoring);
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.ranking.top_n, config.ranking.top_n);
        assert_eq!(back.system.knowledge_path, config.system.knowledge_path);
    }
}
