use crate::core::period::PeriodKind;
use crate::core::plan::{DayOff, Plan};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_work_duration;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Period used by `report` when `--period` is not given.
    #[serde(default = "default_period")]
    pub default_period: String,
    /// Whether `report` sums per project when neither flag is given.
    #[serde(default)]
    pub accumulate: bool,
    #[serde(default)]
    pub plan: PlanConfig,
}

/// Planned working time, used for the overtime lines of `report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Expected time on a weekday, e.g. `8h` or `7h30m`.
    #[serde(default = "default_daily_work")]
    pub daily_work: String,
    /// First day of the running overtime balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    /// Balance carried over from before `start`.
    #[serde(default = "default_overtime_offset")]
    pub overtime_offset: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_off: Vec<DayOff>,
}

fn default_daily_work() -> String {
    "8h".to_string()
}

fn default_overtime_offset() -> String {
    "0h".to_string()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            daily_work: default_daily_work(),
            start: None,
            overtime_offset: default_overtime_offset(),
            days_off: Vec::new(),
        }
    }
}

impl PlanConfig {
    pub fn to_plan(&self) -> AppResult<Plan> {
        let plan = Plan::new(parse_work_duration(&self.daily_work)?, &self.days_off);
        Ok(match self.start {
            Some(start) => {
                plan.with_balance_start(start, parse_work_duration(&self.overtime_offset)?)
            }
            None => plan,
        })
    }
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_period() -> String {
    PeriodKind::Day.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_period: default_period(),
            accumulate: false,
            plan: PlanConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.tire`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tire")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tire.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("tire.sqlite")
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn default_period_kind(&self) -> AppResult<PeriodKind> {
        self.default_period.parse()
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("failed to parse configuration: {}", e)))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize configuration: {}", e)))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Write the configuration file, creating the config directory if needed.
    pub fn save(&self) -> AppResult<PathBuf> {
        fs::create_dir_all(Self::config_dir())?;

        let path = Self::config_file();
        let mut file = fs::File::create(&path)?;
        file.write_all(self.to_yaml()?.as_bytes())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg = Config::from_yaml("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.default_period, "day");
        assert!(!cfg.accumulate);
    }

    #[test]
    fn parses_report_preferences() {
        let cfg = Config::from_yaml(
            "database: db.sqlite\ndefault_period: week\naccumulate: true\n",
        )
        .unwrap();
        assert_eq!(cfg.default_period_kind().unwrap(), PeriodKind::Week);
        assert!(cfg.accumulate);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        assert!(matches!(
            Config::from_yaml("database: [unclosed"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn yaml_round_trip_keeps_values() {
        let cfg = Config {
            database: "/data/tire.sqlite".into(),
            default_period: "month".into(),
            accumulate: true,
            plan: PlanConfig::default(),
        };
        assert_eq!(Config::from_yaml(&cfg.to_yaml().unwrap()).unwrap(), cfg);
    }

    #[test]
    fn plan_section_builds_a_plan() {
        use crate::core::plan::DayKind;
        use chrono::TimeDelta;

        let cfg = Config::from_yaml(
            "plan:\n  daily_work: 7h30m\n  start: 2026-01-05\n  overtime_offset: -2h\n  days_off:\n    - date: 2026-01-06\n      kind: holiday\n",
        )
        .unwrap();
        let plan = cfg.plan.to_plan().unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();

        assert_eq!(plan.planned(monday, TimeDelta::zero()), TimeDelta::minutes(450));
        assert_eq!(plan.kind(tuesday), DayKind::Holiday);
        assert_eq!(plan.start(), Some(monday));
        assert_eq!(plan.overtime_offset(), TimeDelta::hours(-2));
    }

    #[test]
    fn default_plan_is_eight_hours_without_balance() {
        let plan = Config::default().plan.to_plan().unwrap();
        assert_eq!(plan.start(), None);

        let bad = PlanConfig {
            daily_work: "lots".into(),
            ..PlanConfig::default()
        };
        assert!(matches!(bad.to_plan(), Err(AppError::InvalidDuration(_))));
    }
}
