// src/lib.rs

pub mod cli;
pub mod config;
pub mod cpm;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod model;
pub mod session;
pub mod source;
pub mod types;
pub mod view;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::PlanFile;
use crate::config::load_and_validate;
use crate::session::{PlannerSession, UiIntent};
use crate::view::Filters;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan file loading and validation
/// - the planner session (store + mutator + engine + projection)
/// - view flags from the command line
/// - rendering rows (and critical chains) to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let plan = load_and_validate(&args.plan)?;

    if args.check {
        print_check(&plan);
        return Ok(());
    }

    let mut session = PlannerSession::load(&plan)?
        .with_cpm_options(plan.settings.cpm_options())
        .with_today(chrono::Utc::now());

    if !args.projects.is_empty() {
        session.handle(UiIntent::ProjectSelectionChange(args.projects.clone()))?;
    }
    for project in args.collapse.iter() {
        session.handle(UiIntent::CollapseToggle(project.clone()))?;
    }
    if let Some(query) = args.query.as_ref() {
        session.handle(UiIntent::FilterChange(Filters::query(query.clone())))?;
    }
    session.handle(UiIntent::ShowMilestones(!args.hide_milestones))?;
    session.handle(UiIntent::ShowCriticalPath(args.critical))?;

    for row in session.rows()? {
        println!("{row}");
    }

    if args.critical {
        println!();
        for project_id in session.view_options().selection.iter() {
            let schedule = session.schedule(project_id)?;
            let chain = schedule.critical_chain();
            if chain.is_empty() {
                println!("{project_id}: no working tasks");
            } else {
                println!(
                    "{project_id}: {} (finish {})",
                    chain.join(" -> "),
                    schedule.project_finish.format("%Y-%m-%d")
                );
            }
        }
    }

    info!("plan rendered");
    Ok(())
}

/// `--check` output: counts per project, nothing rendered.
fn print_check(plan: &PlanFile) {
    println!("planline check: ok");
    println!(
        "  settings.slack_tolerance_hours = {}",
        plan.settings.slack_tolerance_hours
    );
    println!();

    println!("projects ({}):", plan.projects.len());
    for project in plan.projects.iter() {
        let tasks = plan
            .tasks
            .iter()
            .filter(|t| t.project_id == project.id)
            .count();
        let milestones = plan
            .tasks
            .iter()
            .filter(|t| t.project_id == project.id && t.is_milestone)
            .count();
        println!("  - {} [{}] {}", project.id, project.code, project.name);
        println!(
            "      {} .. {}",
            project.start_date.format("%Y-%m-%d"),
            project.end_date.format("%Y-%m-%d")
        );
        println!("      tasks: {tasks} ({milestones} milestones)");
        if !project.manager.is_empty() {
            println!("      manager: {}", project.manager);
        }
        if !project.team.is_empty() {
            println!("      team: {:?}", project.team);
        }
    }

    debug!("check complete (nothing rendered)");
}
