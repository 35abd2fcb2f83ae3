use crate::core::params::BudgetParameters;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, info};

fn default_plan_name() -> String {
    "Annual Budget".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_plan_name")]
    pub plan_name: String,
    #[serde(default)]
    pub plan: BudgetParameters,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            plan_name: default_plan_name(),
            plan: BudgetParameters::with_defaults(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or falls back to the
    /// built-in plan when no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            info!(
                "No config found at {}, using the default plan",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "budgetmx", "budgetmx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r##"
plan_name: "2026 Budget"
plan:
  overhead_pct: 30.0
  materials_pct: 38.5
  products:
    - name: "Wood"
      mix_pct: 60.0
      avg_sale_value: 14300.0
      display_color: "#eab308"
    - name: "Service"
      mix_pct: 40.0
      avg_sale_value: 1.0
      display_color: "#f97316"
  overhead_line_items:
    payroll_tax_rate_pct: 12.0
    items:
      - name: "Rent"
        amount: 48000.0
      - name: "Advertising"
        amount: 90000.0
      - name: "Meals"
        amount: 800.0
        minor: true
  debt_obligations:
    - name: "Truck Loan"
      annual_payment: 9600.0
"##;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.plan_name, "2026 Budget");
        assert_eq!(config.plan.overhead_pct, 30.0);
        assert_eq!(config.plan.materials_pct, 38.5);
        assert_eq!(config.plan.products.len(), 2);
        assert_eq!(config.plan.products[1].avg_sale_value, 1.0);

        let items = &config.plan.overhead_line_items;
        assert_eq!(items.payroll_tax_rate_pct, 12.0);
        assert_eq!(items.items.len(), 3);
        assert!(!items.items[0].minor);
        assert!(items.items[2].minor);
        assert_eq!(items.advertising(), 90000.0);
        assert_eq!(config.plan.debt_obligations.len(), 1);

        // Omitted fields come from the default plan
        assert_eq!(config.plan.commission_pct, 7.0);
        assert_eq!(config.plan.crew_members.len(), 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = AppConfig::load_from_path("/nonexistent/budgetmx/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
