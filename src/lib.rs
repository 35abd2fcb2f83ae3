pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::{BudgetParameters, DerivationCache};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Summary,
    Monthly,
    Products,
    Overhead,
    Crew,
    Export,
    All,
}

/// What-if edits applied to the loaded plan before it is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanOverrides {
    pub overhead_pct: Option<f64>,
    pub materials_pct: Option<f64>,
    pub commission_pct: Option<f64>,
    pub job_supplies_pct: Option<f64>,
    pub non_direct_labor_pct: Option<f64>,
}

impl PlanOverrides {
    /// Returns a new snapshot; `params` is left as it was.
    pub fn apply(&self, params: &BudgetParameters) -> BudgetParameters {
        let mut next = params.clone();
        if let Some(pct) = self.overhead_pct {
            next = next.with_overhead_pct(pct);
        }
        if let Some(pct) = self.materials_pct {
            next = next.with_materials_pct(pct);
        }
        if let Some(pct) = self.commission_pct {
            next = next.with_commission_pct(pct);
        }
        if let Some(pct) = self.job_supplies_pct {
            next = next.with_job_supplies_pct(pct);
        }
        if let Some(pct) = self.non_direct_labor_pct {
            next = next.with_non_direct_labor_pct(pct);
        }
        next
    }
}

/// Renders the output of `command` for `config`, deriving through `cache`.
pub fn render_command(
    command: AppCommand,
    config: &AppConfig,
    overrides: &PlanOverrides,
    cache: &DerivationCache,
) -> Result<String> {
    let params = overrides.apply(&config.plan);
    let plan = cache.derive(&params)?;
    debug!(?command, revenue_goal = plan.revenue_goal, "Rendering command");

    let output = match command {
        AppCommand::Summary => cli::summary::render(&config.plan_name, &params, &plan),
        AppCommand::Monthly => cli::monthly::render(&params, &plan),
        AppCommand::Products => cli::products::render(&params, &plan),
        AppCommand::Overhead => cli::overhead::render(&plan),
        AppCommand::Crew => cli::crew::render(&params, &plan),
        AppCommand::Export => cli::export::render(&plan)?,
        AppCommand::All => {
            let views = [
                AppCommand::Summary,
                AppCommand::Monthly,
                AppCommand::Products,
                AppCommand::Overhead,
                AppCommand::Crew,
            ];
            let mut sections = Vec::with_capacity(views.len());
            for view in views {
                sections.push(render_command(view, config, overrides, cache)?);
            }
            sections.join(&cli::ui::separator())
        }
    };
    Ok(output)
}

pub fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    overrides: &PlanOverrides,
) -> Result<()> {
    info!("Budget planner starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let cache = DerivationCache::new();
    let output = render_command(command, &config, overrides, &cache)?;
    println!("{output}");
    Ok(())
}
