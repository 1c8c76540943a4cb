use clap::{Args, Parser, Subcommand};
use fitplan_core::catalog::category_description;
use fitplan_core::script::{self, Segment};
use fitplan_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Exit status when no exercise fits the requested time
const EXIT_NO_FIT: u8 = 2;

#[derive(Parser)]
#[command(name = "fitplan")]
#[command(about = "Timed workout plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log selection details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List workout categories and groups
    Groups,

    /// Generate a workout plan
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the guided instructions for a new plan
    Script {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print only the text handed to speech synthesis
        #[arg(long)]
        speech: bool,
    },

    /// Generate a plan and follow it with the guided timer
    Guide {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Milliseconds to wait per simulated second (0-1000)
        #[arg(long, value_parser = clap::value_parser!(u64).range(0..=1000))]
        tick_millis: Option<u64>,
    },
}

#[derive(Args)]
struct SelectionArgs {
    /// Workout group, e.g. "Box Breathing"
    #[arg(long)]
    group: Option<String>,

    /// Fitness level (beginner, intermediate, advanced)
    #[arg(long)]
    level: Option<Level>,

    /// Workout length in minutes (5-60)
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=60))]
    minutes: Option<u32>,

    /// Seed for reproducible plans
    #[arg(long)]
    seed: Option<u64>,
}

/// A fully resolved selection request
struct Selection {
    group: String,
    level: Level,
    minutes: u32,
    seed: Option<u64>,
}

impl SelectionArgs {
    fn resolve(self, config: &Config) -> Selection {
        Selection {
            group: self.group.unwrap_or_else(|| config.defaults.group.clone()),
            level: self.level.unwrap_or(config.defaults.level),
            minutes: self.minutes.unwrap_or(config.defaults.duration_minutes),
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Selection(err @ SelectionError::NoFit { .. })) => {
            eprintln!("✗ Couldn't generate a workout plan: {}.", err);
            eprintln!("  Try a longer duration or a different type.");
            ExitCode::from(EXIT_NO_FIT)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    fitplan_core::logging::init_for_cli(cli.verbose);

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let catalog = config.load_catalog()?;
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Commands::Groups => cmd_groups(&catalog),
        Commands::Generate { selection, json } => {
            cmd_generate(&catalog, selection.resolve(&config), json)
        }
        Commands::Script { selection, speech } => {
            cmd_script(&catalog, selection.resolve(&config), speech)
        }
        Commands::Guide {
            selection,
            tick_millis,
        } => {
            let tick = tick_millis.unwrap_or(config.guide.tick_millis);
            cmd_guide(&catalog, selection.resolve(&config), tick)
        }
    }
}

fn cmd_groups(catalog: &Catalog) -> Result<()> {
    for (category, groups) in catalog.categories() {
        println!("{}", category);
        if let Some(description) = category_description(category) {
            println!("  {}", description);
        }
        for group in groups {
            let levels: Vec<&str> = catalog.levels(group).iter().map(Level::as_str).collect();
            println!("  • {} ({})", group, levels.join(", "));
        }
        println!();
    }
    Ok(())
}

fn cmd_generate(catalog: &Catalog, selection: Selection, json: bool) -> Result<()> {
    let Some(plan) = plan_or_report(catalog, &selection)? else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&plan);
    }
    Ok(())
}

fn cmd_script(catalog: &Catalog, selection: Selection, speech: bool) -> Result<()> {
    let Some(plan) = plan_or_report(catalog, &selection)? else {
        return Ok(());
    };

    let text = script::instructions(&plan);
    if speech {
        println!("{}", script::speech_text(&text));
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_guide(catalog: &Catalog, selection: Selection, tick_millis: u64) -> Result<()> {
    let Some(plan) = plan_or_report(catalog, &selection)? else {
        return Ok(());
    };

    let total = plan.total_seconds();
    let tick = Duration::from_millis(tick_millis);
    let mut stdout = io::stdout();

    println!("Follow along with the timer:");
    for segment in script::timeline(&plan) {
        match segment {
            Segment::Exercise { exercise, .. } => {
                println!("NOW: {} - {}", exercise.name, exercise.description);
            }
            Segment::Rest { .. } => println!("REST"),
        }

        if !tick.is_zero() {
            for _ in 0..segment.duration_seconds() {
                std::thread::sleep(tick);
            }
        }

        let elapsed = segment.start_seconds() + segment.duration_seconds();
        println!("  [{:>3.0}%]", script::progress(elapsed, total) * 100.0);
        stdout.flush()?;
    }

    println!("Workout complete! Great job!");
    Ok(())
}

/// Run the selector and report the recoverable outcomes
///
/// A catalog miss prints a notice and yields `None`. No fit is returned
/// as an error for `main` to report.
fn plan_or_report(catalog: &Catalog, selection: &Selection) -> Result<Option<WorkoutPlan>> {
    let mut rng = match selection.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        "Generating {} minute '{}' plan at {} level",
        selection.minutes,
        selection.group,
        selection.level
    );

    let outcome = generate(
        catalog,
        &selection.group,
        selection.level,
        selection.minutes,
        &mut rng,
    )?;

    match outcome {
        Ok(plan) => Ok(Some(plan)),
        Err(SelectionError::CatalogMiss { group, level }) => {
            println!(
                "⚠ {} workouts for the {} level are coming soon! Try another type.",
                group, level
            );
            Ok(None)
        }
        Err(err @ SelectionError::NoFit { .. }) => Err(err.into()),
    }
}

fn display_plan(plan: &WorkoutPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} ({}, {} min)", plan.group, plan.level, plan.duration_minutes);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for (i, exercise) in plan.iter().enumerate() {
        println!(
            "  {}. {} ({} seconds)",
            i + 1,
            exercise.name,
            exercise.duration_seconds
        );
        if !exercise.description.is_empty() {
            println!("     {}", exercise.description);
        }
    }

    let total = plan.total_seconds();
    println!();
    println!(
        "  Total: {} min {:02} s with {} s rests between exercises",
        total / 60,
        total % 60,
        REST_SECONDS
    );
    println!();
}
