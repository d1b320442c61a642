mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tutorbook",
    about = "Tutoring lesson booking — undoable scheduling with event notifications",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scripted walkthrough of the booking workflow (schedule, cancel,
    /// reschedule, undo/redo, notifications)
    Demo,

    /// Replay a scenario file against a fresh booking session
    Run {
        /// Path to a scenario YAML file
        scenario: PathBuf,
    },

    /// Price a lesson bundle with a pricing strategy
    Price {
        /// Lesson kind (math, programming, english)
        #[arg(long)]
        lesson: String,

        /// Number of lessons in the bundle
        #[arg(long, default_value = "1")]
        count: u32,

        /// Pricing strategy (standard, bulk, seasonal, referral)
        #[arg(long, default_value = "standard")]
        strategy: String,

        /// Add-ons to stack on each lesson (recorded, materials, premium)
        #[arg(long = "add-on")]
        add_ons: Vec<String>,

        /// Referral count (referral strategy)
        #[arg(long, default_value = "0")]
        referrals: u32,

        /// Discount fraction, e.g. 0.15 (seasonal strategy)
        #[arg(long, default_value = "0.15")]
        discount: f64,
    },

    /// List lesson kinds, base prices, and add-ons
    Catalog,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Demo => cmd::demo::run(cli.json),
        Commands::Run { scenario } => cmd::run::run(&scenario, cli.json),
        Commands::Price {
            lesson,
            count,
            strategy,
            add_ons,
            referrals,
            discount,
        } => cmd::price::run(&lesson, count, &strategy, &add_ons, referrals, discount, cli.json),
        Commands::Catalog => cmd::catalog::run(cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
