//! Handles settings for the application.
//!
//! Layers, lowest priority first: the built-in defaults, an optional TOML file
//! (`config/farmcost.toml` unless `--config` is given), `FARMCOST_*`
//! environment variables (`FARMCOST_DURATION_MONTHS=24`) and finally
//! command-line flags.
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Args;
use cost_engine::{ClassificationTable, DEFAULT_DURATION_MONTHS, ExpenseCategory, ExpenseClass};
use serde::Deserialize;

use crate::{
    currency::Currency,
    error::{AppError, Result},
};

const DEFAULT_CONFIG_PATH: &str = "config/farmcost.toml";

/// Market price per kg used when the project does not set one.
const DEFAULT_MARKET_PRICE_PER_KG: f64 = 1300.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    /// Project-wide amortization duration for capital expenses.
    pub duration_months: i32,
    pub currency: String,
    /// Decimals kept when printing reports. Defaults to the currency's minor
    /// unit.
    pub decimals: Option<u32>,
    pub market_price_per_kg: f64,
    /// IANA timezone deciding what "today" and "this month" are.
    pub timezone: String,
    pub expenses: Option<String>,
    pub sales: Option<String>,
    /// Categories to treat as capital on top of the standard table.
    pub capital_categories: Vec<String>,
    /// Categories to treat as operating on top of the standard table.
    pub operating_categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            duration_months: DEFAULT_DURATION_MONTHS,
            currency: Currency::default().code().to_string(),
            decimals: None,
            market_price_per_kg: DEFAULT_MARKET_PRICE_PER_KG,
            timezone: "Africa/Abidjan".to_string(),
            expenses: None,
            sales: None,
            capital_categories: Vec::new(),
            operating_categories: Vec::new(),
        }
    }
}

/// Command-line overrides shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the expenses CSV path.
    #[arg(long, global = true)]
    pub expenses: Option<String>,
    /// Override the sales CSV path.
    #[arg(long, global = true)]
    pub sales: Option<String>,
    /// Override the amortization duration, in months.
    #[arg(long, global = true)]
    pub duration_months: Option<i32>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn load(args: &SettingsArgs) -> Result<Self> {
        Self::load_with_env(args, None)
    }

    /// Same as [`Settings::load`], reading variables from `env` instead of the
    /// process environment when given.
    fn load_with_env(args: &SettingsArgs, env: Option<config::Map<String, String>>) -> Result<Self> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(args.config.is_some()))
            .add_source(
                config::Environment::with_prefix("FARMCOST")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("capital_categories")
                    .with_list_parse_key("operating_categories")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        if let Some(expenses) = &args.expenses {
            settings.expenses = Some(expenses.clone());
        }
        if let Some(sales) = &args.sales {
            settings.sales = Some(sales.clone());
        }
        if let Some(duration) = args.duration_months {
            settings.duration_months = duration;
        }
        if let Some(level) = &args.log_level {
            settings.log_level = level.clone();
        }

        Ok(settings)
    }

    /// Amortization duration, falling back to the default when the configured
    /// one is not positive.
    pub fn effective_duration(&self) -> i32 {
        if self.duration_months > 0 {
            return self.duration_months;
        }
        tracing::warn!(
            "duration_months = {} is not positive, using {DEFAULT_DURATION_MONTHS}",
            self.duration_months
        );
        DEFAULT_DURATION_MONTHS
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::try_from(self.currency.as_str())
    }

    pub fn decimals(&self) -> Result<u32> {
        match self.decimals {
            Some(decimals) => Ok(decimals),
            None => Ok(self.currency()?.minor_units()),
        }
    }

    /// Standard classification with the configured overrides applied.
    pub fn classification(&self) -> Result<ClassificationTable> {
        let mut table = ClassificationTable::standard();
        for (names, class) in [
            (&self.capital_categories, ExpenseClass::Capex),
            (&self.operating_categories, ExpenseClass::Opex),
        ] {
            for name in names {
                let category: ExpenseCategory = name.parse()?;
                table.set(category, class);
            }
        }
        Ok(table)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Settings(format!("unknown timezone '{}'", self.timezone)))
    }

    /// Current date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    fn args_for(file: &tempfile::NamedTempFile) -> SettingsArgs {
        SettingsArgs {
            config: Some(file.path().to_string_lossy().into_owned()),
            ..SettingsArgs::default()
        }
    }

    const PROJECT_TOML: &str = r#"
duration_months = 24
currency = "EUR"
market_price_per_kg = 1500.0
expenses = "data/expenses.csv"
"#;

    #[test]
    fn file_values_override_defaults() {
        let file = config_file(PROJECT_TOML);
        let settings = Settings::load_with_env(&args_for(&file), env(&[])).unwrap();

        assert_eq!(settings.duration_months, 24);
        assert_eq!(settings.currency().unwrap(), Currency::Eur);
        assert_eq!(settings.market_price_per_kg, 1_500.0);
        assert_eq!(settings.expenses.as_deref(), Some("data/expenses.csv"));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.decimals().unwrap(), 2);
    }

    #[test]
    fn environment_overrides_file() {
        let file = config_file(PROJECT_TOML);
        let vars = env(&[
            ("FARMCOST_DURATION_MONTHS", "12"),
            ("FARMCOST_CAPITAL_CATEGORIES", "equipment,vaccines"),
            ("OTHER_DURATION_MONTHS", "99"),
        ]);
        let settings = Settings::load_with_env(&args_for(&file), vars).unwrap();

        assert_eq!(settings.duration_months, 12);
        assert_eq!(settings.market_price_per_kg, 1_500.0);
        assert_eq!(settings.capital_categories, vec!["equipment", "vaccines"]);
    }

    #[test]
    fn flags_override_environment_and_file() {
        let file = config_file(PROJECT_TOML);
        let args = SettingsArgs {
            duration_months: Some(6),
            expenses: Some("other.csv".to_string()),
            log_level: Some("debug".to_string()),
            ..args_for(&file)
        };
        let vars = env(&[("FARMCOST_DURATION_MONTHS", "12"), ("FARMCOST_LOG_LEVEL", "warn")]);
        let settings = Settings::load_with_env(&args, vars).unwrap();

        assert_eq!(settings.duration_months, 6);
        assert_eq!(settings.expenses.as_deref(), Some("other.csv"));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let args = SettingsArgs {
            config: Some("/nonexistent/farmcost/settings.toml".to_string()),
            ..SettingsArgs::default()
        };
        assert!(matches!(
            Settings::load_with_env(&args, env(&[])),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn decimals_follow_currency_unless_set() {
        let mut settings = Settings::default();
        assert_eq!(settings.decimals().unwrap(), 0);
        settings.decimals = Some(3);
        assert_eq!(settings.decimals().unwrap(), 3);
    }

    #[test]
    fn defaults_match_project_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.duration_months, 36);
        assert_eq!(settings.effective_duration(), 36);
        assert_eq!(settings.currency().unwrap(), Currency::Xof);
        assert!(settings.timezone().is_ok());
    }

    #[test]
    fn non_positive_duration_falls_back_to_default() {
        let settings = Settings {
            duration_months: 0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_duration(), DEFAULT_DURATION_MONTHS);
    }

    #[test]
    fn overrides_reach_the_classification() {
        let settings = Settings {
            capital_categories: vec!["Équipement".to_string()],
            operating_categories: vec!["achat_sujet".to_string()],
            ..Settings::default()
        };
        let table = settings.classification().unwrap();
        let capex: Vec<_> = table.categories(ExpenseClass::Capex).collect();
        assert_eq!(
            capex,
            vec![
                ExpenseCategory::Equipment,
                ExpenseCategory::BuildingFitout,
                ExpenseCategory::HeavyEquipment,
            ]
        );
    }

    #[test]
    fn unknown_override_is_rejected() {
        let settings = Settings {
            capital_categories: vec!["spaceship".to_string()],
            ..Settings::default()
        };
        assert!(matches!(
            settings.classification(),
            Err(AppError::Engine(_))
        ));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let settings = Settings {
            timezone: "Mars/Olympus".to_string(),
            ..Settings::default()
        };
        assert!(matches!(settings.timezone(), Err(AppError::Settings(_))));
    }
}
