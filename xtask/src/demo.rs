//! Car door assembly demo.
//!
//! Builds a six-part door (checker, latch, front panel, body and two bolts),
//! plans it and prints each plan step by step.

use anyhow::{Context, Result};
use assembly_plan::{BreadthFirstPlanner, GreedyPlanner};
use assembly_types::{Catalog, Goal, PlanOutcome, PlannerConfig, Registry};
use owo_colors::OwoColorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Plan the door and print the outcome.
pub fn run(goal: &[String], greedy: bool, sequential: bool) -> Result<()> {
    init_logging();

    let registry = door_registry()?;
    let catalog = door_catalog()?;

    let report = registry.validate_catalog(&catalog);
    if !report.is_clean() {
        println!("{} {}", "⚠".yellow(), report.summary().yellow());
    }

    let goal = (!goal.is_empty()).then(|| Goal::categories(goal.iter().map(String::as_str)));

    println!();
    println!("{}", "Door Assembly Planning".bold());
    println!("{}", "======================".bold());
    println!();

    let outcome = if greedy {
        GreedyPlanner::new(&catalog, &registry, PlannerConfig::greedy()).plan(goal.as_ref())
    } else {
        let config = if sequential {
            PlannerConfig::sequential()
        } else {
            PlannerConfig::default()
        };
        BreadthFirstPlanner::new(&catalog, &registry, config).plan(goal.as_ref())
    }
    .context("Planning failed")?;

    print_outcome(&outcome, &catalog)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn print_outcome(outcome: &PlanOutcome, catalog: &Catalog) -> Result<()> {
    let stats = outcome.stats();
    println!(
        "{} {} ({} states expanded, {} levels, {:.2?})",
        "Status:".bold(),
        outcome.status(),
        stats.nodes_expanded(),
        stats.levels(),
        stats.elapsed()
    );

    for (i, plan) in outcome.plans().iter().enumerate() {
        println!();
        println!("{}", format!("Plan {} of {}", i + 1, outcome.plans().len()).cyan());
        print!("{}", plan.describe(catalog)?);
    }

    if outcome.is_solved() {
        println!();
        println!("{}", "✓ Assembly planned".green().bold());
    } else {
        println!();
        println!("{}", "✗ No complete plan".red().bold());
    }
    Ok(())
}

fn door_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    registry.add_rule("A", ["m", "f"])?;
    registry.add_rule("B", ["m", "i", "f"])?;
    registry.add_rule("C", ["m", "f"])?;
    registry.add_rule("D", ["m", "i", "f"])?;
    registry.add_rule("E", ["m", "f"])?;
    registry.add_rule("F", ["m", "f"])?;
    Ok(registry)
}

fn door_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    catalog.add_part("door-checker", [("C", "m"), ("D", "i")])?;
    catalog.add_part("door-latch", [("A", "f"), ("B", "f"), ("E", "m"), ("F", "m")])?;
    catalog.add_part("front-door", [("A", "m"), ("B", "i"), ("C", "f")])?;
    catalog.add_part("body", [("D", "f")])?;
    catalog.add_part("bolt1", [("B", "m")])?;
    catalog.add_part("bolt2", [("D", "m")])?;
    Ok(catalog)
}
