use crate::workflows::expiry::WeeklySchedule;
use chrono::Weekday;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the sweep. Everything the original operator
/// script hardcoded (recipient, roster location, cadence) is an explicit
/// field here, injected at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub roster: RosterConfig,
    pub notify: NotifyConfig,
    pub schedule: ScheduleConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let roster_path =
            PathBuf::from(env::var("ROSTER_CSV_PATH").unwrap_or_else(|_| "roster.csv".to_string()));

        let recipient =
            env::var("REPORT_RECIPIENT").unwrap_or_else(|_| "records@example.org".to_string());

        let weekday_raw = env::var("SCHEDULE_WEEKDAY").unwrap_or_else(|_| "monday".to_string());
        let weekday = weekday_raw
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ConfigError::InvalidWeekday { value: weekday_raw })?;

        let hour = env::var("SCHEDULE_HOUR")
            .unwrap_or_else(|_| "7".to_string())
            .parse::<u32>()
            .ok()
            .filter(|hour| *hour < 24)
            .ok_or(ConfigError::InvalidHour)?;

        let timezone =
            env::var("SCHEDULE_TIMEZONE").unwrap_or_else(|_| "America/Chicago".to_string());

        let state_path = PathBuf::from(
            env::var("SCHEDULE_STATE_PATH").unwrap_or_else(|_| "triggers.json".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            roster: RosterConfig { path: roster_path },
            notify: NotifyConfig { recipient },
            schedule: ScheduleConfig {
                weekday,
                hour,
                timezone,
                state_path,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the roster snapshot is read from.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub path: PathBuf,
}

/// The single static notification target.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub recipient: String,
}

/// Weekly cadence settings plus the trigger-state location.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub weekday: Weekday,
    pub hour: u32,
    pub timezone: String,
    pub state_path: PathBuf,
}

impl ScheduleConfig {
    pub fn weekly_schedule(&self) -> WeeklySchedule {
        WeeklySchedule {
            weekday: self.weekday,
            hour: self.hour,
            timezone: self.timezone.clone(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidHour,
    InvalidWeekday { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHour => write!(f, "SCHEDULE_HOUR must be an hour from 0 to 23"),
            ConfigError::InvalidWeekday { value } => {
                write!(f, "SCHEDULE_WEEKDAY '{}' is not a weekday name", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
