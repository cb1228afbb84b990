pub mod domain;
mod engine;
pub mod notify;
pub mod report;
mod rules;
mod schedule;
mod sweep;

pub use engine::classify;
pub use rules::{ExpiryRule, ExpiryRuleTable};
pub use schedule::{FileTriggerStore, ScheduleError, TriggerHost, WeeklySchedule};
pub use sweep::{render_summary_html, ExpirySweep, SweepOutcome};
