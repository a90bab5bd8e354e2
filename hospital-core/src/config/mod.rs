use crate::error::AppError;
use config::{Config as Cfg, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Workspace configuration, loaded from an optional `configuration` file
/// plus `APP__`-prefixed environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Jurisdiction tax rate as a percentage, applied to the
    /// post-discount amount of every bill. Not user-editable per bill.
    #[serde(default = "default_tax_rate")]
    pub tax_rate_percent: Decimal,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Path of the bill-in-progress session file used by the CLI.
    #[serde(default = "default_session_path")]
    pub session_path: String,

    /// Path of the finalized invoice store used by the CLI.
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tax_rate() -> Decimal {
    // GST rate of the original deployment jurisdiction
    Decimal::from(18)
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_session_path() -> String {
    ".hospbill-session.json".to_string()
}

fn default_store_path() -> String {
    ".hospbill-invoices.json".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let config: Config = config.try_deserialize()?;

        if config.tax_rate_percent < Decimal::ZERO || config.tax_rate_percent > Decimal::from(100)
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "tax_rate_percent must be within [0, 100], got {}",
                config.tax_rate_percent
            )));
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tax_rate_percent: default_tax_rate(),
            currency: default_currency(),
            session_path: default_session_path(),
            store_path: default_store_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_jurisdiction() {
        let config = Config::default();
        assert_eq!(config.tax_rate_percent, dec!(18));
        assert_eq!(config.currency, "INR");
        assert_eq!(config.log_level, "info");
    }
}
