use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use semester_core::time::{parse_timestamp, parse_tz};
use semester_core::{
    apply_session, assess, coaching_brief, compute_danger_zone, compute_procrastination_score,
    replay_counters, upcoming_deadlines,
};
use semester_ingest::{load_snapshot, parse_assignments_csv, Snapshot};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "semester",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SEMESTER_BUILD_SHA"), ")"),
    about = "Procrastination score and deadline danger zone for your semester"
)]
struct Cli {
    /// Config file (default: ~/.semester/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// IANA timezone for timestamps without an offset (overrides config)
    #[arg(long, global = true)]
    tz: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON snapshot with courses, assignments and sessions
    #[arg(long, conflicts_with = "csv")]
    snapshot: Option<PathBuf>,

    /// Assignments sheet exported as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct NowArg {
    /// Evaluate as of this instant instead of the wall clock
    #[arg(long)]
    now: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Procrastination score and tier over started tasks
    Score {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        json: bool,
    },

    /// Up to N not-started tasks most at risk of slipping
    Danger {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        now: NowArg,
        #[arg(long)]
        json: bool,
    },

    /// Score + danger zone, or nothing when everything looks fine
    Report {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        now: NowArg,
        #[arg(long)]
        json: bool,
    },

    /// Next open deadlines, flagged when due soon
    Upcoming {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        now: NowArg,
        #[arg(long)]
        json: bool,
    },

    /// Per-course hours and assignment counters
    Courses {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Coaching payload (JSON) for an external advice service
    Brief {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        now: NowArg,
    },

    /// Manage ~/.semester/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(p) => p,
        None => state::default_config_path()?,
    };

    // Config commands must work even when the file or the zone is broken.
    if let Command::Config { command } = &cli.command {
        init_logging("warn")?;
        match command {
            ConfigCommand::Init => config::init_config(&config_path)?,
            ConfigCommand::Show => {
                print!("{}", config::show_config(&config_path, cli.tz.as_deref())?)
            }
        }
        return Ok(());
    }

    let mut cfg = config::load_config(&config_path)?;
    if let Some(tz) = &cli.tz {
        cfg.timezone = tz.clone();
    }
    init_logging(&cfg.log_level)?;
    tracing::debug!("config: {}", config_path.display());

    let tz = parse_tz(&cfg.timezone)?;
    let policy = cfg.policy;

    match cli.command {
        Command::Score { input, json } => {
            let snap = load_input(&input, tz)?;
            let score = compute_procrastination_score(&snap.assignments, &policy);
            if json {
                println!("{}", serde_json::to_string_pretty(&score)?);
            } else {
                println!("{}", render::score_line(&score));
            }
        }

        Command::Danger { input, now, json } => {
            let snap = load_input(&input, tz)?;
            let now = resolve_now(&now, tz)?;
            let zone = compute_danger_zone(&snap.assignments, now, &policy);
            if json {
                println!("{}", serde_json::to_string_pretty(&zone)?);
            } else {
                print!("{}", render::danger_lines(&zone, &snap));
            }
        }

        Command::Report { input, now, json } => {
            let snap = load_input(&input, tz)?;
            let now = resolve_now(&now, tz)?;
            let report = assess(&snap.assignments, now, &policy);
            tracing::info!(
                score = report.score.score,
                at_risk = report.danger_zone.len(),
                show_alert = report.show_alert,
                "assessed {} tasks",
                snap.assignments.len()
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::report(&report, &snap));
            }
        }

        Command::Upcoming { input, now, json } => {
            let snap = load_input(&input, tz)?;
            let now = resolve_now(&now, tz)?;
            let items = upcoming_deadlines(&snap.assignments, now, &policy);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print!("{}", render::upcoming(&items, &snap));
            }
        }

        Command::Courses { input } => {
            let snap = load_input(&input, tz)?;
            if snap.courses.is_empty() {
                bail!("no courses in input (course breakdown needs --snapshot)");
            }
            let mut courses = replay_counters(&snap.courses, &snap.assignments);
            for s in &snap.sessions {
                apply_session(&mut courses, s);
            }
            print!("{}", render::courses(&courses));
        }

        Command::Brief { input, now } => {
            let snap = load_input(&input, tz)?;
            let now = resolve_now(&now, tz)?;
            let report = assess(&snap.assignments, now, &policy);
            let brief = coaching_brief(&snap.assignments, &report);
            println!("{}", serde_json::to_string_pretty(&brief)?);
        }

        Command::Config { .. } => unreachable!("handled before config load"),
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log_level '{level}'"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn load_input(input: &InputArgs, tz: Tz) -> Result<Snapshot> {
    if let Some(p) = &input.snapshot {
        return load_snapshot(p).with_context(|| format!("loading {}", p.display()));
    }
    if let Some(p) = &input.csv {
        let tasks =
            parse_assignments_csv(p, tz).with_context(|| format!("parsing {}", p.display()))?;
        return Ok(Snapshot::from_assignments(tasks));
    }
    bail!("no input: pass --snapshot <file.json> or --csv <file.csv>")
}

/// The wall clock is read here and nowhere else.
fn resolve_now(arg: &NowArg, tz: Tz) -> Result<DateTime<Utc>> {
    match &arg.now {
        Some(raw) => parse_timestamp(raw, tz).with_context(|| format!("--now '{raw}'")),
        None => Ok(Utc::now()),
    }
}
