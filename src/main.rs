use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rotation_engine::alias::{resolve_eligible, AliasResolver};
use rotation_engine::config::AppConfig;
use rotation_engine::rotation::{DraftRequest, RotationEngine};
use rotation_engine::storage::{
    availability_path, load_aliases, read_availability, read_history, DraftStore, StorageConfig,
};
use rotation_engine::{
    parse_fixture_date, week_for_date, PlayerId, RankPolicy, RankedPlayer, RunReport, WeekId,
};

#[derive(Parser)]
#[command(name = "rotation")]
#[command(about = "Weekly team balancing and standby rotation")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where this week's availability comes from.
#[derive(clap::Args)]
struct Availability {
    /// Available players, comma-separated (overrides the availability file)
    #[arg(long, value_delimiter = ',')]
    players: Vec<String>,

    /// Availability file, one name per line
    #[arg(long)]
    availability: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the player ranking for a fixture date
    Rank {
        /// Fixture date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Ranking policy (overrides the config file)
        #[arg(long)]
        policy: Option<RankPolicy>,

        /// RNG seed for the random policy
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        availability: Availability,
    },

    /// Generate (or keep) the team sheet for a fixture week
    Draft {
        /// Fixture date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Week index within the month (default: derived from the date)
        #[arg(long)]
        week: Option<u32>,

        /// Ranking policy (overrides the config file)
        #[arg(long)]
        policy: Option<RankPolicy>,

        /// Put this player on standby if a slot is needed (repeatable)
        #[arg(long = "force-standby")]
        force_standby: Vec<String>,

        /// RNG seed for the standby shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Print the result without saving it
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        availability: Availability,
    },

    /// Print the saved team sheet for a fixture week
    Show {
        /// Fixture date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Week index within the month (default: derived from the date)
        #[arg(long)]
        week: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config {:?}", cli.config))?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::debug!("Starting rotation v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let engine = RotationEngine::new(&config.engine).context("Invalid engine configuration")?;

    match cli.command {
        Commands::Rank {
            date,
            policy,
            seed,
            availability,
        } => {
            let week = resolve_week(&date, None)?;
            let engine = match policy {
                Some(p) => engine.with_policy(p),
                None => engine,
            };
            let mut rng = build_rng(seed.or(config.engine.seed));

            let history = read_history(&storage).context("Failed to read history")?;
            let resolver = load_aliases(&storage, &history)?;
            let raw = raw_names(&availability, &storage, &week)?;
            let (eligible, alias_report) = resolve_eligible(&resolver, &raw);

            let (ranked, mut report) = engine.rank(&history, &eligible, &mut rng)?;
            report.merge(&alias_report);

            println!("\n=== Ranking for {} ({}) ===", week, engine.policy());
            print_ranking(&ranked, engine.policy());
            print_report(&report);
        }

        Commands::Draft {
            date,
            week,
            policy,
            force_standby,
            seed,
            dry_run,
            availability,
        } => {
            let week = resolve_week(&date, week)?;
            let engine = match policy {
                Some(p) => engine.with_policy(p),
                None => engine,
            };
            let mut rng = build_rng(seed.or(config.engine.seed));

            let history = read_history(&storage).context("Failed to read history")?;
            let resolver = load_aliases(&storage, &history)?;
            let raw = raw_names(&availability, &storage, &week)?;
            let (eligible, forced, alias_report) =
                resolve_draft_names(&resolver, &raw, &force_standby);

            let store = DraftStore::new(&storage);
            let previous = store
                .load(&week)
                .with_context(|| format!("Failed to read saved draft for {}", week))?;

            let mut outcome = engine.generate(
                DraftRequest {
                    history: &history,
                    eligible: &eligible,
                    previous: previous.as_ref(),
                    forced_standby: &forced,
                },
                &mut rng,
            )?;
            outcome.report.merge(&alias_report);

            println!("\n=== Draft for {} ===", week);
            if outcome.regenerated {
                println!("Regenerated ({})", outcome.change);
                print_ranking(&outcome.ranking, engine.policy());
                println!();
            } else {
                println!("Unchanged since last run; keeping saved draft");
                if let Some(note) = override_note(&forced, outcome.regenerated) {
                    println!("{}", note);
                }
            }
            print!("{}", outcome.draft);
            println!("Summary:     {}", outcome.draft.summary());
            println!("Fingerprint: {}", outcome.draft.fingerprint());
            print_report(&outcome.report);

            if outcome.regenerated {
                if dry_run {
                    println!("\n(dry run - draft not saved)");
                } else {
                    let path = store.save(&week, &outcome.draft)?;
                    println!("\nSaved to {}", path.display());
                }
            }
        }

        Commands::Show { date, week } => {
            let week = resolve_week(&date, week)?;
            match DraftStore::new(&storage).load(&week)? {
                Some(draft) => {
                    println!("\n=== Draft for {} ===", week);
                    print!("{}", draft);
                    println!("Summary:     {}", draft.summary());
                }
                None => println!("No saved draft for {}", week),
            }
        }
    }

    Ok(())
}

fn resolve_week(date: &str, week: Option<u32>) -> Result<WeekId> {
    let date = parse_fixture_date(date)
        .with_context(|| format!("Invalid --date (expected YYYY-MM-DD): {}", date))?;
    let derived = week_for_date(date);
    Ok(match week {
        Some(index) => WeekId::new(derived.month, index),
        None => derived,
    })
}

fn build_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn raw_names(
    availability: &Availability,
    storage: &StorageConfig,
    week: &WeekId,
) -> Result<Vec<String>> {
    if !availability.players.is_empty() {
        return Ok(availability.players.clone());
    }
    let path = availability
        .availability
        .clone()
        .unwrap_or_else(|| availability_path(storage, week));
    read_availability(&path)
        .with_context(|| format!("Failed to read availability from {:?}", path))
}

/// Resolve poll names and `--force-standby` names, counting problems in both.
fn resolve_draft_names<A: AliasResolver>(
    resolver: &A,
    raw: &[String],
    force_standby: &[String],
) -> (Vec<PlayerId>, Vec<PlayerId>, RunReport) {
    let (eligible, mut report) = resolve_eligible(resolver, raw);
    let (forced, forced_report) = resolve_eligible(resolver, force_standby);
    report.merge(&forced_report);
    (eligible, forced, report)
}

fn override_note(forced: &[PlayerId], regenerated: bool) -> Option<String> {
    if regenerated || forced.is_empty() {
        return None;
    }
    let names: Vec<&str> = forced.iter().map(PlayerId::as_str).collect();
    Some(format!(
        "Note: --force-standby ({}) ignored; overrides only apply when the draft is regenerated",
        names.join(", ")
    ))
}

fn print_ranking(ranked: &[RankedPlayer], policy: RankPolicy) {
    println!(
        "{:>3}  {:<20} {:>4} {:>4} {:>4} {:>4} {:>5} {:>8}",
        "#", "Player", "Avl", "W", "D", "L", "Goals", "Value"
    );
    for (i, row) in ranked.iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:>4} {:>4} {:>4} {:>4} {:>5} {:>8}",
            i + 1,
            row.player.as_str(),
            if row.eligible { "yes" } else { "" },
            row.stats.won,
            row.stats.drawn,
            row.stats.lost,
            row.stats.goals_scored,
            row.display_value(policy)
        );
    }
}

fn print_report(report: &RunReport) {
    if report.is_clean() {
        return;
    }
    println!("\nData issues:");
    println!("  Malformed records:   {}", report.malformed_records);
    println!("  Unresolved names:    {}", report.unresolved_aliases);
    println!("  Duplicate names:     {}", report.duplicate_names);
    println!("  Standby shortfall:   {}", report.standby_shortfall);
    println!("  Overflow to standby: {}", report.overflow_to_standby);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_engine::alias::InMemoryAliasResolver;

    fn resolver() -> InMemoryAliasResolver {
        let mut resolver = InMemoryAliasResolver::new();
        resolver.add_player("Alice").add_player("Cara").add_alias("bob", "Robert");
        resolver
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unresolved_force_standby_names_are_counted() {
        let (eligible, forced, report) = resolve_draft_names(
            &resolver(),
            &names(&["Alice", "bob", "Stranger"]),
            &names(&["Cara", "Nobody", "cara"]),
        );

        assert_eq!(eligible, vec![PlayerId::from("Alice"), PlayerId::from("Robert")]);
        assert_eq!(forced, vec![PlayerId::from("Cara")]);
        assert_eq!(report.unresolved_aliases, 2);
        assert_eq!(report.duplicate_names, 1);
    }

    #[test]
    fn test_override_note_only_when_kept() {
        let forced = vec![PlayerId::from("Cara")];

        let note = override_note(&forced, false).unwrap();
        assert!(note.contains("Cara"));
        assert!(override_note(&forced, true).is_none());
        assert!(override_note(&[], false).is_none());
    }
}
