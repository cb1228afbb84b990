use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Documents flagged this many days ahead of expiration are reported as
/// expiring soon.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Physical,
    PcpForm,
    Mds,
    Isp,
    PriorAuthorization,
    TbScreening,
    DentalExam,
    VisionExam,
    LevelOfCare,
}

impl DocumentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Physical => "Annual Physical",
            Self::PcpForm => "PCP Consent Form",
            Self::Mds => "MDS Assessment",
            Self::Isp => "Individual Support Plan",
            Self::PriorAuthorization => "Prior Authorization",
            Self::TbScreening => "TB Screening",
            Self::DentalExam => "Dental Exam",
            Self::VisionExam => "Vision Exam",
            Self::LevelOfCare => "Level of Care Determination",
        }
    }
}

/// How a recorded cell date maps to an expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// The recorded value is itself the expiration date.
    ExactDate,
    /// The document expires a fixed number of days after the recorded date.
    DaysAfter(u32),
}

impl ExpiryPolicy {
    pub(crate) fn resolve(&self, recorded: NaiveDate) -> NaiveDate {
        match self {
            ExpiryPolicy::ExactDate => recorded,
            ExpiryPolicy::DaysAfter(days) => recorded + Duration::days(*days as i64),
        }
    }
}

/// Placeholder strings marking a document as intentionally absent. Matching
/// is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelValue {
    Missing,
    Discharged,
}

impl SentinelValue {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Discharged => "discharged",
        }
    }

    pub fn from_cell(raw: &str) -> Option<Self> {
        match raw {
            "missing" => Some(Self::Missing),
            "discharged" => Some(Self::Discharged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStanding {
    Expired,
    ExpiringSoon,
}

impl ExpiryStanding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring Soon",
        }
    }

    /// Bins a whole-day distance into a reportable standing, or `None` when
    /// the document is too far out to report.
    pub fn from_days_remaining(days_remaining: i64) -> Option<Self> {
        if days_remaining < 0 {
            Some(Self::Expired)
        } else if days_remaining <= EXPIRING_SOON_WINDOW_DAYS {
            Some(Self::ExpiringSoon)
        } else {
            None
        }
    }
}

/// One reportable document for one patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub patient_name: String,
    pub contact: String,
    pub kind: DocumentKind,
    pub recorded_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub days_remaining: i64,
}

impl DocumentRecord {
    pub fn standing(&self) -> ExpiryStanding {
        if self.days_remaining < 0 {
            ExpiryStanding::Expired
        } else {
            ExpiryStanding::ExpiringSoon
        }
    }
}

/// A cell whose value could not be read as a calendar date. Recovered
/// locally: the pair is skipped and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unreadable date '{raw_value}' in {kind:?} column for '{patient_name}'")]
pub struct InvalidDateError {
    pub patient_name: String,
    pub kind: DocumentKind,
    pub raw_value: String,
}
