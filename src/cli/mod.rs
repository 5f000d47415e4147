//! Command line surface.

mod layout;
mod walk;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wp_app::usecases::onboarding::{GetOnboardingSummary, MarkMilestone, ResetTour};
use wp_core::{Milestone, TourId, UserId};

use crate::bootstrap::wiring::{build_catalog, build_onboarding_store};
use crate::bootstrap::AppConfig;

pub use layout::{ElementSpec, HostLayout};

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Guided product tours with persisted onboarding progress", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/waypoint/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// User whose onboarding record is used
    #[arg(short, long, global = true, default_value = "local")]
    pub user: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show completed tours and milestones
    Status,
    /// List the tour catalog
    Tours,
    /// Mark a tour as not completed
    Reset {
        /// Tour id, e.g. `leads`
        tour: TourId,
    },
    /// Record a milestone
    Milestone {
        /// Milestone name, e.g. `first_email_sent`
        milestone: Milestone,
    },
    /// Walk through a tour interactively, printing overlay frames as JSON
    Walk {
        /// Tour id, e.g. `welcome`
        tour: TourId,
        /// TOML file describing the rendered elements of the host screen
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let user = UserId::from(cli.user);

    match cli.command {
        Commands::Status => run_status(&config, &user).await,
        Commands::Tours => run_tours(),
        Commands::Reset { tour } => run_reset(&config, &user, tour).await,
        Commands::Milestone { milestone } => run_milestone(&config, &user, milestone).await,
        Commands::Walk { tour, layout } => walk::run_walk(&config, user, tour, layout).await,
    }
}

async fn run_status(config: &AppConfig, user: &UserId) -> anyhow::Result<()> {
    let summary =
        GetOnboardingSummary::from_ports(build_onboarding_store(config)?, build_catalog()?)
            .execute(user)
            .await?;

    println!("onboarding status for {user}");
    println!(
        "- tours completed: {}/{}",
        summary.completed_tours, summary.total_tours
    );
    for tour in &summary.tours {
        let mark = if tour.completed { "x" } else { " " };
        println!("  [{mark}] {:<10} {}", tour.tour_id.as_str(), tour.title);
    }
    println!("- milestones:");
    for (milestone, reached) in &summary.milestones {
        let mark = if *reached { "x" } else { " " };
        println!("  [{mark}] {milestone}");
    }
    Ok(())
}

fn run_tours() -> anyhow::Result<()> {
    let catalog = build_catalog()?;
    for definition in catalog.iter() {
        println!(
            "{:<10} {:<28} {} steps  {}",
            definition.id.as_str(),
            definition.title,
            definition.len(),
            definition.entry_route
        );
    }
    Ok(())
}

async fn run_reset(config: &AppConfig, user: &UserId, tour: TourId) -> anyhow::Result<()> {
    ResetTour::from_ports(build_onboarding_store(config)?)
        .execute(user, tour)
        .await?;
    println!("tour {tour} reset for {user}");
    Ok(())
}

async fn run_milestone(
    config: &AppConfig,
    user: &UserId,
    milestone: Milestone,
) -> anyhow::Result<()> {
    let written = MarkMilestone::from_ports(build_onboarding_store(config)?)
        .execute(user, milestone)
        .await?;
    if written {
        println!("milestone {milestone} recorded for {user}");
    } else {
        println!("milestone {milestone} already reached by {user}");
    }
    Ok(())
}
