//! Swing Engine CLI
//!
//! Offline analysis of exported swing-sensor batches: daily squared-up
//! rates and cohort carry-distance projections.

use swing_engine::aggregate::DateRange;
use swing_engine::app::cli::{Cli, Commands, ConfigAction};
use swing_engine::app::config::Config;
use swing_engine::engine::Engine;
use swing_engine::records::Batch;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    match cli.command {
        Commands::Analyze {
            input,
            since,
            until,
            json,
        } => {
            run_analyze(&input, since, until, json, config)?;
        }
        Commands::Project {
            swing_speed,
            level,
            json,
        } => {
            run_project(swing_speed, &level, json, config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_analyze(
    input: &std::path::Path,
    since: Option<chrono::NaiveDate>,
    until: Option<chrono::NaiveDate>,
    json: bool,
    config: Config,
) -> anyhow::Result<()> {
    info!("Analyzing batch {:?}", input);

    if !input.exists() {
        anyhow::bail!("Batch file not found: {:?}", input);
    }

    let content = std::fs::read_to_string(input)?;
    let batch: Batch = serde_json::from_str(&content)?;

    info!(
        "Loaded {} motion and {} contact records across {} sessions",
        batch.motion.len(),
        batch.contact.len(),
        batch.sessions.len()
    );

    let range = (since.is_some() || until.is_some()).then_some(DateRange { since, until });

    let engine = Engine::new(config);
    let rates = engine.daily_squared_up_rates(
        &batch.motion,
        &batch.contact,
        &batch.sessions,
        range.as_ref(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rates)?);
        return Ok(());
    }

    if rates.is_empty() {
        println!("No matched pairs in the requested range.");
        return Ok(());
    }

    println!("{:<12} {:>8} {:>10} {:>8}", "day", "paired", "qualified", "rate");
    for rate in &rates {
        println!(
            "{:<12} {:>8} {:>10} {:>7.1}%",
            rate.day, rate.total_paired, rate.qualified_count, rate.rate
        );
    }

    Ok(())
}

fn run_project(swing_speed: f64, level: &str, json: bool, config: Config) -> anyhow::Result<()> {
    info!("Projecting carry for {swing_speed} mph swing at level '{level}'");

    let engine = Engine::new(config);
    let cohorts = engine.distance_projection(swing_speed, level)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cohorts)?);
        return Ok(());
    }

    println!(
        "{:>10} {:>12} {:>12} {:>8}",
        "pitch", "achievable", "carry (ft)", "points"
    );
    for cohort in &cohorts {
        println!(
            "{:>10.1} {:>12.1} {:>12.1} {:>8}",
            cohort.input_speed,
            cohort.achievable_speed,
            cohort.max_distance_ft,
            cohort.points.len()
        );
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
        }
    }

    Ok(())
}
