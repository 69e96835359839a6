//! combat_sim - Seeded duel simulator for combat balance runs
//!
//! Pits a preset hero against an acid ooze and reports hit, crit, damage
//! and outcome statistics.

mod presets;
mod simulation;

use clap::Parser;
use combat_core::{CombatEvents, CombatRules, ConfigError, ItemCatalog, Session};
use simulation::{simulate, AttackStats, DuelStats};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(about = "Run seeded duels through the combat engine")]
struct Args {
    /// Random seed (uses OS entropy if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of duels to run
    #[arg(short, long, default_value = "100")]
    duels: u32,

    /// Combat rules TOML file (built-in defaults if not specified)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Item catalog TOML file (built-in catalog if not specified)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Resolve attacks with the legacy power-vs-defense path
    #[arg(long)]
    legacy: bool,

    /// Print statistics and the last duel's events as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Error, Debug)]
enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => CombatRules::load(path)?,
        None => CombatRules::default(),
    };
    let catalog = match &args.items {
        Some(path) => ItemCatalog::load(path)?,
        None => ItemCatalog::parse(presets::DEFAULT_ITEMS)?,
    };

    let mut session = match args.seed {
        Some(seed) => Session::seeded(seed),
        None => Session::from_entropy(),
    }
    .with_rules(rules);

    info!(seed = ?args.seed, duels = args.duels, legacy = args.legacy, "starting simulation");
    let (stats, last_duel) = simulate(&catalog, &mut session, args.duels, args.legacy);

    if args.json {
        let report = serde_json::json!({
            "stats": stats,
            "last_duel": last_duel,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&stats, &last_duel);
    }
    Ok(())
}

fn print_report(stats: &DuelStats, last_duel: &[combat_core::CombatEvent]) {
    println!("Duels:        {}", stats.duels);
    println!("Hero wins:    {}", stats.hero_wins);
    println!("Monster wins: {}", stats.monster_wins);
    println!("Escapes:      {}", stats.escapes);
    println!("Stalemates:   {}", stats.stalemates);
    println!("Avg rounds:   {:.1}", stats.avg_rounds());
    println!("Corrosions:   {}", stats.corrosions);
    println!("Lost turns:   {}", stats.skipped_turns);
    println!();
    print_side("Hero", &stats.hero);
    print_side("Monster", &stats.monster);

    println!();
    println!("Last duel:");
    for line in last_duel.messages() {
        println!("  {}", line);
    }
}

fn print_side(name: &str, stats: &AttackStats) {
    println!(
        "{:<8} {} attacks, {:.1}% hit, {:.1}% crit, {:.2} avg damage, {} fumbles",
        name,
        stats.attacks,
        stats.hit_rate(),
        stats.crit_rate(),
        stats.avg_damage(),
        stats.fumbles
    );
}
