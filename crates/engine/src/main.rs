//! Chronicler - rules engine command line.
//!
//! Composes the configured rule system once, runs one command and prints the
//! result as JSON on stdout. Logs go to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chronicler_domain::{CheckInput, StatTable};
use chronicler_engine::use_cases::{bench, contract, narration};
use chronicler_engine::{App, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "chronicler", version, about = "Resolve tabletop dice mechanics")]
struct Cli {
    /// Rule system to use (overrides GAME_SYSTEM)
    #[arg(long, global = true)]
    system: Option<String>,

    /// Session seed for reproducible rolls (overrides DICE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file mapping actor ids to modifiers
    #[arg(long, global = true, value_name = "FILE")]
    stats: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Resolve one ability check
    Check {
        #[arg(long, default_value = "pc1")]
        actor: String,
        #[arg(long)]
        skill: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        difficulty: Option<i32>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Roll an NdM+K expression
    Damage { expr: String },
    /// Order actors for a combat round
    Order {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List registered rule systems
    Systems,
    /// Verify every registered system against the engine contract
    Contract,
    /// Time repeated ability checks
    Bench {
        #[arg(long)]
        iterations: Option<u32>,
    },
    /// Resolve roll tags in narrator text read from FILE or stdin
    Narrate { file: Option<PathBuf> },
}

fn main() -> anyhow::Result<()> {
    // Load environment from repo root.
    load_dotenv_from_repo_root();

    // Initialize logging; stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chronicler_engine=info,chronicler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let config = apply_overrides(config, &cli);
    let stats = match &cli.stats {
        Some(path) => load_stats(path)?,
        None => StatTable::new(),
    };

    let app = App::new(config).context("Failed to compose rules engine")?;
    tracing::debug!(command = ?cli.command, "Running command");
    let output = run(&app, &stats, cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(system) = &cli.system {
        config = config.with_game_system(system.clone());
    }
    if cli.seed.is_some() {
        config = config.with_dice_seed(cli.seed);
    }
    config
}

fn run(app: &App, stats: &StatTable, command: Command) -> anyhow::Result<Value> {
    let mechanics = &app.mechanics;

    let output = match command {
        Command::Check {
            actor,
            skill,
            difficulty,
            tags,
        } => {
            let input = CheckInput {
                actor_id: actor,
                skill,
                difficulty,
                tags,
            };
            serde_json::to_value(mechanics.ability_check_with(&input, stats))?
        }
        Command::Damage { expr } => serde_json::to_value(mechanics.damage_roll(&expr))?,
        Command::Order { ids } => serde_json::to_value(mechanics.turn_order_with(&ids, stats))?,
        Command::Systems => Value::Array(
            app.registry
                .list_systems_with_names()
                .into_iter()
                .map(|(id, name)| {
                    json!({
                        "id": id,
                        "displayName": name,
                        "active": id == mechanics.system_name(),
                    })
                })
                .collect(),
        ),
        Command::Contract => {
            let reports = contract::verify_all(&app.registry, app.rng.clone())
                .context("Rules engine contract violated")?;
            serde_json::to_value(reports)?
        }
        Command::Bench { iterations } => {
            let iterations = iterations.unwrap_or(app.config.bench_iterations);
            let report = bench::run(app.engine.as_ref(), iterations);
            let mut value = serde_json::to_value(&report)?;
            value["checksPerSecond"] = json!(report.checks_per_second());
            value
        }
        Command::Narrate { file } => {
            let raw = read_input(file.as_deref())?;
            serde_json::to_value(narration::process_narration(&raw, mechanics, stats))?
        }
    };

    Ok(output)
}

fn load_stats(path: &Path) -> anyhow::Result<StatTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stats file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Stats file {} is not a valid stat table", path.display()))
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
