use budgetmx::core::config::AppConfig;
use budgetmx::core::{BudgetError, DerivationCache};
use budgetmx::{AppCommand, PlanOverrides};
use std::fs;
use tracing::info;

mod test_utils {
    use std::fs;

    pub fn write_config(content: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        fs::write(config_file.path(), content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test]
fn test_full_app_flow_with_config() {
    let config_file = test_utils::write_config(
        r#"
plan_name: "Scenario A"
plan:
  overhead_pct: 30.0
  materials_pct: 30.0
  commission_pct: 5.0
  job_supplies_pct: 0.0
  non_direct_labor_pct: 0.0
  overhead_line_items:
    payroll_tax_rate_pct: 0.0
    items:
      - name: "Rent"
        amount: 150000.0
  crew_members:
    - name: "Installer"
      annual_compensation: 160000.0
      active_months: [true, true, true, true, true, true, true, true, true, true, true, true]
  shop_manager:
    name: "Shop"
    annual_compensation: 40000.0
"#,
    );
    let config_path = config_file.path().to_str().unwrap();

    for command in [
        AppCommand::Summary,
        AppCommand::Monthly,
        AppCommand::Products,
        AppCommand::Overhead,
        AppCommand::Crew,
        AppCommand::Export,
        AppCommand::All,
    ] {
        let result = budgetmx::run_command(command, Some(config_path), &PlanOverrides::default());
        assert!(
            result.is_ok(),
            "{command:?} failed with: {:?}",
            result.err()
        );
    }
}

#[test_log::test]
fn test_export_from_config_matches_scenario() {
    let config_file = test_utils::write_config(
        r#"
plan:
  overhead_pct: 30.0
  materials_pct: 30.0
  commission_pct: 5.0
  overhead_line_items:
    payroll_tax_rate_pct: 0.0
    items:
      - name: "Rent"
        amount: 150000.0
  crew_members:
    - name: "Installer"
      annual_compensation: 160000.0
      active_months: [true, true, true, true, true, true, true, true, true, true, true, true]
  shop_manager:
    name: "Shop"
    annual_compensation: 40000.0
"#,
    );
    let config = AppConfig::load_from_path(config_file.path()).unwrap();
    let json = budgetmx::render_command(
        AppCommand::Export,
        &config,
        &PlanOverrides::default(),
        &DerivationCache::new(),
    )
    .unwrap();
    info!(bytes = json.len(), "Exported plan");

    let plan: serde_json::Value = serde_json::from_str(&json).unwrap();
    let revenue_goal = plan["revenue_goal"].as_f64().unwrap();
    let labor_pct = plan["labor_pct"].as_f64().unwrap();
    let net_profit = plan["net_profit_dollars"].as_f64().unwrap();
    assert!((revenue_goal - 500000.0).abs() < 1e-6);
    assert!((labor_pct - 45.0).abs() < 1e-9);
    assert!((net_profit + 25000.0).abs() < 1e-6);
}

#[test_log::test]
fn test_override_changes_revenue_goal() {
    let config = AppConfig::default();
    let cache = DerivationCache::new();
    let overrides = PlanOverrides {
        overhead_pct: Some(40.0),
        ..Default::default()
    };

    let base = budgetmx::render_command(
        AppCommand::Export,
        &config,
        &PlanOverrides::default(),
        &cache,
    )
    .unwrap();
    let what_if =
        budgetmx::render_command(AppCommand::Export, &config, &overrides, &cache).unwrap();

    let base: serde_json::Value = serde_json::from_str(&base).unwrap();
    let what_if: serde_json::Value = serde_json::from_str(&what_if).unwrap();
    let ratio =
        base["revenue_goal"].as_f64().unwrap() / what_if["revenue_goal"].as_f64().unwrap();
    assert!((ratio - 40.0 / 32.0).abs() < 1e-9);
    assert_eq!(cache.len(), 2);
    assert_eq!(config.plan.overhead_pct, 32.0);
}

#[test_log::test]
fn test_invalid_config_reports_parameter() {
    let config_file = test_utils::write_config("plan:\n  month_weights: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]\n");
    let config = AppConfig::load_from_path(config_file.path()).unwrap();

    let err = budgetmx::render_command(
        AppCommand::Summary,
        &config,
        &PlanOverrides::default(),
        &DerivationCache::new(),
    )
    .unwrap_err();

    match err.downcast_ref::<BudgetError>() {
        Some(BudgetError::InvalidParameter { field, .. }) => assert_eq!(field, "month_weights"),
        None => panic!("expected an InvalidParameter error, got {err}"),
    }
}

#[test_log::test]
fn test_malformed_config_fails_to_load() {
    let config_file = test_utils::write_config("plan: [not, a, mapping]");
    let result = AppConfig::load_from_path(config_file.path());
    assert!(result.is_err());

    let missing = budgetmx::run_command(
        AppCommand::Summary,
        Some("/nonexistent/budgetmx/config.yaml"),
        &PlanOverrides::default(),
    );
    assert!(missing.is_err());
}

#[test_log::test]
fn test_setup_then_load() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");

    budgetmx::cli::setup::setup_at_path(&config_path).unwrap();
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.starts_with("# Example configuration file for budgetmx"));

    let result = budgetmx::run_command(
        AppCommand::Summary,
        config_path.to_str(),
        &PlanOverrides::default(),
    );
    assert!(result.is_ok());
}
