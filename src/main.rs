//! ahara CLI: analyze meals, rank candidates, assemble plans, and
//! aggregate reports from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

use ahara::composite;
use ahara::config::Config;
use ahara::knowledge::KnowledgeBase;
use ahara::persist::{JsonPlanStore, JsonProfileStore, PlanStore, ProfileStore};
use ahara::planner::{PlanAssembler, SlotGrid};
use ahara::profile::{ScoringContext, Season, SubjectProfile};
use ahara::ranking::{CandidateFilter, RankingEngine};
use ahara::report::{ProgressMeasurement, aggregate_plan};

#[derive(Parser)]
#[command(name = "ahara")]
#[command(about = "Nutrition plan scoring and assembly engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a meal file into a composite taste profile
    Analyze {
        /// JSON file: [{"item_id": "...", "quantity": 1.5}, ...]
        meal: PathBuf,
    },
    /// Rank knowledge items for a profile and print the top N
    Recommend {
        /// Profile id in the store, or a path to a profile JSON file
        profile: String,
        /// Restrict candidates to a category tag
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        top: Option<usize>,
        /// Override the season (spring|summer|monsoon|autumn|winter)
        #[arg(long)]
        season: Option<String>,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Assemble a multi-day plan and save it to the plan store
    Plan {
        profile: String,
        #[arg(long)]
        days: Option<usize>,
        #[arg(long)]
        season: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Aggregate a saved plan into nutrient totals and a shopping list
    Report {
        /// Plan id in the store, or a path to a plan JSON file
        plan: String,
        /// Optional JSON file with an externally measured progress entry
        #[arg(long)]
        progress: Option<PathBuf>,
    },
    /// Load the knowledge base and print the quarantine report
    KbCheck,
}

#[derive(Deserialize)]
struct MealPart {
    item_id: String,
    quantity: f32,
}

fn main() -> Result<()> {
    let config = Config::load()?;

    let log_level = config.system.log_level.as_deref().unwrap_or("ahara=info");
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { meal } => analyze(&config, &meal),
        Commands::Recommend {
            profile,
            category,
            top,
            season,
            date,
        } => recommend(&config, &profile, category, top, season, date),
        Commands::Plan {
            profile,
            days,
            season,
            date,
        } => plan(&config, &profile, days, season, date),
        Commands::Report { plan, progress } => report(&config, &plan, progress),
        Commands::KbCheck => kb_check(&config),
    }
}

fn load_kb(config: &Config) -> Result<KnowledgeBase> {
    KnowledgeBase::load(Path::new(&config.system.knowledge_path))
        .with_context(|| format!("loading knowledge base {}", config.system.knowledge_path))
}

/// A profile argument is a file path when it points at an existing
/// .json file; otherwise it is an id in the profile store.
fn load_profile(config: &Config, arg: &str) -> Result<SubjectProfile> {
    let path = Path::new(arg);
    if path.extension().is_some_and(|e| e == "json") && path.exists() {
        let content = std::fs::read_to_string(path)?;
        return serde_json::from_str(&content)
            .with_context(|| format!("parsing profile file {arg}"));
    }
    Ok(JsonProfileStore::new(&config.data_dir()).load_profile(arg)?)
}

fn parse_season(arg: Option<String>) -> Result<Option<Season>> {
    let Some(name) = arg else { return Ok(None) };
    let season = match name.to_lowercase().as_str() {
        "spring" => Season::Spring,
        "summer" => Season::Summer,
        "monsoon" => Season::Monsoon,
        "autumn" => Season::Autumn,
        "winter" => Season::Winter,
        other => bail!("unknown season '{other}'"),
    };
    Ok(Some(season))
}

fn build_context(season: Option<String>, date: Option<String>) -> Result<ScoringContext> {
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .with_context(|| format!("parsing date '{d}'"))?,
        None => chrono::Local::now().date_naive(),
    };
    let mut ctx = ScoringContext::for_date(date);
    ctx.season = parse_season(season)?;
    Ok(ctx)
}

fn analyze(config: &Config, meal: &Path) -> Result<()> {
    let kb = load_kb(config)?;
    let content = std::fs::read_to_string(meal)?;
    let parts: Vec<MealPart> = serde_json::from_str(&content)?;

    let mut weighted = Vec::with_capacity(parts.len());
    for part in &parts {
        let item = kb
            .get(&part.item_id)
            .with_context(|| format!("unknown item '{}'", part.item_id))?;
        weighted.push((&item.attributes, part.quantity));
    }

    let profile = composite::aggregate(&weighted);
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn recommend(
    config: &Config,
    profile_arg: &str,
    category: Option<String>,
    top: Option<usize>,
    season: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let kb = load_kb(config)?;
    let profile = load_profile(config, profile_arg)?;
    let ctx = build_context(season, date)?;
    let filter = CandidateFilter {
        category,
        in_season_only: false,
    };
    let engine = RankingEngine::new(&kb).with_parallel(config.system.parallel_scoring);
    let recs = engine.rank(&profile, &ctx, &filter, top.unwrap_or(config.ranking.top_n));
    println!("{}", serde_json::to_string_pretty(&recs)?);
    Ok(())
}

fn plan(
    config: &Config,
    profile_arg: &str,
    days: Option<usize>,
    season: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let kb = load_kb(config)?;
    let profile = load_profile(config, profile_arg)?;
    let ctx = build_context(season, date)?;

    let mut grid = SlotGrid::week();
    grid.days = days.unwrap_or(config.planner.days);

    let assembler = PlanAssembler::new(&kb)
        .with_caps(
            config.planner.daily_repeat_cap,
            config.planner.weekly_repeat_cap,
        )
        .with_candidates_per_slot(config.ranking.candidates_per_slot)
        .with_parallel_scoring(config.system.parallel_scoring);
    let plan = assembler.assemble(&profile, &ctx, &grid);

    JsonPlanStore::new(&config.data_dir()).save_plan(&plan)?;
    info!(plan = %plan.id, "plan saved");
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn report(config: &Config, plan_arg: &str, progress: Option<PathBuf>) -> Result<()> {
    let kb = load_kb(config)?;
    let path = Path::new(plan_arg);
    let plan = if path.extension().is_some_and(|e| e == "json") && path.exists() {
        serde_json::from_str(&std::fs::read_to_string(path)?)?
    } else {
        JsonPlanStore::new(&config.data_dir()).load_plan(plan_arg)?
    };

    let progress: Option<ProgressMeasurement> = match progress {
        Some(p) => Some(serde_json::from_str(&std::fs::read_to_string(&p)?)?),
        None => None,
    };

    let report = aggregate_plan(&plan, &kb, &config.targets, progress);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn kb_check(config: &Config) -> Result<()> {
    let kb = load_kb(config)?;
    let summary = serde_json::json!({
        "items": kb.len(),
        "quarantined": kb.quarantine().len(),
        "quarantine": kb.quarantine(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
