use anyhow::Result;
use budgetmx::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Override the target overhead percentage
    #[arg(long, global = true)]
    overhead_pct: Option<f64>,

    /// Override the materials percentage
    #[arg(long, global = true)]
    materials_pct: Option<f64>,

    /// Override the sales commission percentage
    #[arg(long, global = true)]
    commission_pct: Option<f64>,

    /// Override the job supplies percentage
    #[arg(long, global = true)]
    job_supplies_pct: Option<f64>,

    /// Override the non-direct labor percentage
    #[arg(long, global = true)]
    non_direct_labor_pct: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn overrides(&self) -> budgetmx::PlanOverrides {
        budgetmx::PlanOverrides {
            overhead_pct: self.overhead_pct,
            materials_pct: self.materials_pct,
            commission_pct: self.commission_pct,
            job_supplies_pct: self.job_supplies_pct,
            non_direct_labor_pct: self.non_direct_labor_pct,
        }
    }
}

impl From<Commands> for budgetmx::AppCommand {
    fn from(cmd: Commands) -> budgetmx::AppCommand {
        match cmd {
            Commands::Summary => budgetmx::AppCommand::Summary,
            Commands::Monthly => budgetmx::AppCommand::Monthly,
            Commands::Products => budgetmx::AppCommand::Products,
            Commands::Overhead => budgetmx::AppCommand::Overhead,
            Commands::Crew => budgetmx::AppCommand::Crew,
            Commands::Export => budgetmx::AppCommand::Export,
            Commands::All => budgetmx::AppCommand::All,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display revenue goal, four buckets, quarters and prior-period comparison
    Summary,
    /// Display the monthly P&L
    Monthly,
    /// Display revenue and projects by product
    Products,
    /// Display overhead categories ranked by amount
    Overhead,
    /// Display crew roster, labor summary and debt service
    Crew,
    /// Print the full derived plan as JSON
    Export,
    /// Display every view
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => budgetmx::cli::setup::setup(),
        Some(cmd) => {
            budgetmx::run_command(cmd.into(), cli.config_path.as_deref(), &cli.overrides())
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
