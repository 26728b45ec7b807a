mod common;

use std::fs;

use common::setup_config_manager;
use pennywise::config::{Config, ConfigError};
use pennywise::core::services::TrendAggregator;
use pennywise::ledger::{BudgetHealth, BudgetTracker};
use rust_decimal_macros::dec;

#[test]
fn fresh_directory_loads_defaults() {
    let manager = setup_config_manager();
    let config = manager.load().expect("load defaults");
    assert_eq!(config, Config::default());
    assert_eq!(config.alert_threshold_percent, 80);
    assert!(manager.export_path(&config).ends_with("transactions.csv"));
}

#[test]
fn saved_threshold_drives_budget_health() {
    let manager = setup_config_manager();
    let config = Config {
        alert_threshold_percent: 50,
        ..Config::default()
    };
    manager.save(&config).expect("save config");
    let loaded = manager.load().expect("reload config");

    let mut budgets = BudgetTracker::new();
    budgets.set_budget("Food", dec!(100)).expect("set budget");
    assert_eq!(
        budgets.health("Food", loaded.alert_threshold_percent),
        Ok(BudgetHealth::WithinBudget)
    );
    let report = TrendAggregator::analyze(&[], &budgets, loaded.alert_threshold_percent);
    assert_eq!(report.len(), 1);
}

#[test]
fn partial_file_keeps_defaults_for_missing_keys() {
    let manager = setup_config_manager();
    fs::write(manager.config_path(), r#"{ "floor_remaining": true }"#).expect("write config");
    let config = manager.load().expect("load partial config");
    assert!(config.floor_remaining);
    assert_eq!(config.export_file_name, "transactions.csv");
}

#[test]
fn out_of_range_threshold_on_disk_is_rejected() {
    let manager = setup_config_manager();
    fs::write(manager.config_path(), r#"{ "alert_threshold_percent": 0 }"#).expect("write config");
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));
}
