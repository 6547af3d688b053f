use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub planner: PlannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Hard ceiling for a single charge, in IDR.
    #[serde(default = "default_max_payment_idr")]
    pub max_payment_idr: i64,
    /// Allowed relative deviation between reported and recalculated totals.
    #[serde(default = "default_cost_tolerance")]
    pub cost_tolerance: f64,
    #[serde(default = "default_min_budget_idr")]
    pub min_budget_idr: i64,
    #[serde(default = "default_max_budget_idr")]
    pub max_budget_idr: i64,
    #[serde(default = "default_max_travelers")]
    pub max_travelers: u32,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            max_payment_idr: default_max_payment_idr(),
            cost_tolerance: default_cost_tolerance(),
            min_budget_idr: default_min_budget_idr(),
            max_budget_idr: default_max_budget_idr(),
            max_travelers: default_max_travelers(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

fn default_max_payment_idr() -> i64 {
    50_000_000
}

fn default_cost_tolerance() -> f64 {
    0.05
}

fn default_min_budget_idr() -> i64 {
    500_000
}

fn default_max_budget_idr() -> i64 {
    50_000_000
}

fn default_max_travelers() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_min_interval_ms() -> u64 {
    1000
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let settings = config::Config::builder()
            // Base configuration, overridable per environment.
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in.
            .add_source(config::File::with_name("config/local").required(false))
            // `ROAM__BUSINESS_RULES__MAX_PAYMENT_IDR=...` style overrides.
            .add_source(config::Environment::with_prefix("ROAM").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
