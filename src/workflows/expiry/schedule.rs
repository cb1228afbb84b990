use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// The fixed weekly cadence the pipeline runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    pub weekday: Weekday,
    pub hour: u32,
    pub timezone: String,
}

impl WeeklySchedule {
    /// Five-field cron line for the host scheduler, always on the hour.
    pub fn cron_expression(&self) -> String {
        format!("0 {} * * {}", self.hour, cron_day(self.weekday))
    }
}

fn cron_day(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("could not access trigger state: {0}")]
    Io(#[from] std::io::Error),
    #[error("trigger state is not valid JSON: {0}")]
    State(#[from] serde_json::Error),
    #[error("stored trigger carries an unknown weekday '{0}'")]
    CorruptWeekday(String),
}

/// Management surface for the weekly trigger. Both operations are
/// idempotent: install never leaves two triggers for the same job, and
/// remove succeeds when nothing is installed.
pub trait TriggerHost {
    fn install(&self, schedule: &WeeklySchedule) -> Result<(), ScheduleError>;
    fn remove(&self) -> Result<bool, ScheduleError>;
    fn current(&self) -> Result<Option<WeeklySchedule>, ScheduleError>;
}

/// Serialized form of one installed trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTrigger {
    weekday: String,
    hour: u32,
    timezone: String,
    cron: String,
}

impl StoredTrigger {
    fn from_schedule(schedule: &WeeklySchedule) -> Self {
        Self {
            weekday: cron_day(schedule.weekday).to_string(),
            hour: schedule.hour,
            timezone: schedule.timezone.clone(),
            cron: schedule.cron_expression(),
        }
    }

    fn to_schedule(&self) -> Result<WeeklySchedule, ScheduleError> {
        let weekday = self
            .weekday
            .parse::<Weekday>()
            .map_err(|_| ScheduleError::CorruptWeekday(self.weekday.clone()))?;
        Ok(WeeklySchedule {
            weekday,
            hour: self.hour,
            timezone: self.timezone.clone(),
        })
    }
}

/// JSON-file-backed trigger registry keyed by job name. The file is what
/// the host cron/timer provisioning reads.
#[derive(Debug, Clone)]
pub struct FileTriggerStore {
    path: PathBuf,
    job: String,
}

impl FileTriggerStore {
    pub const WEEKLY_SWEEP_JOB: &'static str = "weekly_expiry_sweep";

    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            job: Self::WEEKLY_SWEEP_JOB.to_string(),
        }
    }

    pub fn for_job<P: Into<PathBuf>>(path: P, job: &str) -> Self {
        Self {
            path: path.into(),
            job: job.to_string(),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, StoredTrigger>, ScheduleError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, triggers: &BTreeMap<String, StoredTrigger>) -> Result<(), ScheduleError> {
        let raw = serde_json::to_string_pretty(triggers)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl TriggerHost for FileTriggerStore {
    fn install(&self, schedule: &WeeklySchedule) -> Result<(), ScheduleError> {
        let mut triggers = self.load()?;
        if triggers.remove(&self.job).is_some() {
            info!(job = %self.job, "replacing previously installed trigger");
        }
        triggers.insert(self.job.clone(), StoredTrigger::from_schedule(schedule));
        self.save(&triggers)?;
        info!(job = %self.job, cron = %schedule.cron_expression(), tz = %schedule.timezone, "trigger installed");
        Ok(())
    }

    fn remove(&self) -> Result<bool, ScheduleError> {
        let mut triggers = self.load()?;
        let removed = triggers.remove(&self.job).is_some();
        if removed {
            self.save(&triggers)?;
            info!(job = %self.job, "trigger removed");
        }
        Ok(removed)
    }

    fn current(&self) -> Result<Option<WeeklySchedule>, ScheduleError> {
        let triggers = self.load()?;
        triggers
            .get(&self.job)
            .map(StoredTrigger::to_schedule)
            .transpose()
    }
}
