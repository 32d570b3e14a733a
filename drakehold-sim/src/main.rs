//! Headless runner for the Drakehold simulation.
//!
//! Builds a named scenario, drives the fixed-update loop across a number of
//! days, and reports each day's outcomes on the console or as JSON.

mod scenario;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use drakehold_game::{CostTable, DayReport, DungeonSim, OutcomeKind};
use std::fs;
use std::path::PathBuf;

use scenario::{SCENARIOS, get_scenario, sweep_seeds};

#[derive(Debug, Parser)]
#[command(name = "drakehold-sim", version = "0.1.0")]
#[command(about = "Headless scenario runner for the Drakehold dungeon simulation")]
struct Args {
    /// Scenario to run
    #[arg(long, default_value = "lair")]
    scenario: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Master seed
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Number of runs; extra run seeds are derived from the master seed
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Days to simulate per run
    #[arg(long, default_value_t = 3)]
    days: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Print the dungeon map before and after each run
    #[arg(long)]
    map: bool,

    /// JSON file overriding placement costs
    #[arg(long)]
    costs: Option<PathBuf>,
}

const MAX_TICKS_PER_DAY: u32 = 1_000_000;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        for entry in SCENARIOS {
            println!("{:<10} {}", entry.name, entry.summary);
        }
        return Ok(());
    }

    let costs = match &args.costs {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading cost table {}", path.display()))?;
            Some(CostTable::from_json(&raw).context("parsing cost table")?)
        }
        None => None,
    };

    let chosen = get_scenario(&args.scenario)?;
    let seeds = if args.runs > 1 {
        sweep_seeds(args.seed, args.runs)
    } else {
        vec![args.seed]
    };

    let console = args.report == "console";
    let mut all_reports = Vec::new();
    for seed in seeds {
        log::info!("running scenario '{}' with seed {seed:#018x}", chosen.name);
        let mut sim = chosen.build(seed, costs.clone())?;
        if console {
            println!(
                "{} (seed {seed:#x}, treasury ${})",
                chosen.name.bold(),
                sim.economy().money
            );
        }
        if args.map && console {
            println!("{}", sim.grid().ascii_map());
        }

        for _ in 0..args.days {
            let report = run_day(&mut sim)?;
            if console {
                print_report(&report);
            }
            all_reports.push(report);
        }

        let economy = sim.economy();
        log::debug!(
            "finished seed {seed:#x}: money {} bodies {}",
            economy.money,
            economy.placable_bodies
        );
        if console {
            println!(
                "after {} days: treasury ${}, {} recovered bodies\n",
                args.days, economy.money, economy.placable_bodies
            );
            if args.map {
                println!("{}", sim.grid().ascii_map());
            }
        }
    }

    if !console {
        println!("{}", serde_json::to_string_pretty(&all_reports)?);
    }
    Ok(())
}

fn run_day(sim: &mut DungeonSim) -> Result<DayReport> {
    sim.start_day()?;
    for _ in 0..MAX_TICKS_PER_DAY {
        if let Some(report) = sim.fixed_update() {
            return Ok(report);
        }
    }
    bail!("day did not settle within {MAX_TICKS_PER_DAY} ticks");
}

fn print_report(report: &DayReport) {
    println!("{}", format!("== Day {} ==", report.day).bold());
    for line in &report.lines {
        let kind = match line.kind {
            OutcomeKind::Death => "Death".red(),
            OutcomeKind::Fled => "Fled".yellow(),
            OutcomeKind::Escaped => "Escaped".green(),
        };
        println!("  {kind} (level {})  {}", line.level, line.tags.join(" "));
    }
    println!("  Tribute from villages: ${}", report.tribute);
    println!(
        "  Treasury: ${}  risk {:.2}  reward {:.2}  deception {:.2}",
        report.money, report.risk, report.reward, report.deception
    );
}
