mod policy;
mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use holdout_game::SceneCatalog;
use policy::PolicyId;
use simulation::{BatchReport, SimulationConfig, run_batch};

#[derive(Debug, Parser)]
#[command(name = "holdout-tester", version)]
#[command(about = "Batch playtesting for the Holdout turn engine - pure logic, no server")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Sessions per policy and seed
    #[arg(long, default_value_t = 100)]
    iterations: usize,

    /// Policies to exercise (defaults to all)
    #[arg(long, value_enum)]
    policy: Vec<PolicyId>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seeds = split_seeds(&args.seeds)?;
    let policies: Vec<PolicyId> = if args.policy.is_empty() {
        PolicyId::ALL.to_vec()
    } else {
        args.policy.clone()
    };
    let catalog = SceneCatalog::default_catalog();
    log::info!(
        "running {} polic(ies) x {} seed(s) x {} iteration(s)",
        policies.len(),
        seeds.len(),
        args.iterations
    );

    let mut breaches = 0_usize;
    for &policy in &policies {
        for &seed in &seeds {
            let report = run_batch(
                catalog,
                policy,
                SimulationConfig {
                    seed,
                    iterations: args.iterations,
                },
            );
            breaches += report.invariant_breaches;

            if args.report == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_console(&report);
            }
        }
    }

    if breaches > 0 {
        anyhow::bail!("{breaches} engine invariant breach(es) detected");
    }
    Ok(())
}

fn split_seeds(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .with_context(|| format!("invalid seed '{part}'"))
        })
        .collect()
}

fn print_console(report: &BatchReport) {
    println!(
        "{} policy={} seed={} sessions={}",
        "holdout".bold(),
        report.policy.cyan(),
        report.seed,
        report.sessions
    );
    for (ending, count) in &report.endings {
        let line = format!("  {ending:<20} {count:>5}");
        if ending == "died" {
            println!("{}", line.red());
        } else {
            println!("{}", line.green());
        }
    }
    println!(
        "  avg days {:.2}, infected finishes {}, starvation ticks {}",
        report.average_days, report.infected_finishes, report.starvation_ticks
    );
    if report.invariant_breaches > 0 {
        println!(
            "{}",
            format!("  {} INVARIANT BREACHES", report.invariant_breaches)
                .red()
                .bold()
        );
    }
}
