use super::domain::{DocumentKind, ExpiryPolicy};

/// One tracked document column: where it lives in the roster grid and how
/// its recorded date maps to an expiration date.
#[derive(Debug, Clone)]
pub struct ExpiryRule {
    pub kind: DocumentKind,
    pub column: usize,
    pub policy: ExpiryPolicy,
}

/// The full tracking policy: identity-column positions plus one rule per
/// tracked document type, in report order.
#[derive(Debug, Clone)]
pub struct ExpiryRuleTable {
    name_column: usize,
    contact_column: usize,
    rules: Vec<ExpiryRule>,
}

impl ExpiryRuleTable {
    /// The production roster layout: patient name and contact in the first
    /// two columns, nine tracked document columns after them.
    pub fn standard() -> Self {
        Self {
            name_column: 0,
            contact_column: 1,
            rules: standard_rules(),
        }
    }

    pub fn new(name_column: usize, contact_column: usize, rules: Vec<ExpiryRule>) -> Self {
        Self {
            name_column,
            contact_column,
            rules,
        }
    }

    pub fn name_column(&self) -> usize {
        self.name_column
    }

    pub fn contact_column(&self) -> usize {
        self.contact_column
    }

    pub fn rules(&self) -> &[ExpiryRule] {
        &self.rules
    }

    pub fn rule_for(&self, kind: DocumentKind) -> Option<&ExpiryRule> {
        self.rules.iter().find(|rule| rule.kind == kind)
    }
}

fn standard_rules() -> Vec<ExpiryRule> {
    vec![
        ExpiryRule {
            kind: DocumentKind::Physical,
            column: 2,
            policy: ExpiryPolicy::DaysAfter(365),
        },
        ExpiryRule {
            kind: DocumentKind::PcpForm,
            column: 3,
            policy: ExpiryPolicy::DaysAfter(365),
        },
        ExpiryRule {
            kind: DocumentKind::Mds,
            column: 4,
            policy: ExpiryPolicy::DaysAfter(92),
        },
        ExpiryRule {
            kind: DocumentKind::Isp,
            column: 5,
            policy: ExpiryPolicy::DaysAfter(182),
        },
        ExpiryRule {
            kind: DocumentKind::PriorAuthorization,
            column: 6,
            policy: ExpiryPolicy::ExactDate,
        },
        ExpiryRule {
            kind: DocumentKind::TbScreening,
            column: 7,
            policy: ExpiryPolicy::DaysAfter(365),
        },
        ExpiryRule {
            kind: DocumentKind::DentalExam,
            column: 8,
            policy: ExpiryPolicy::DaysAfter(365),
        },
        ExpiryRule {
            kind: DocumentKind::VisionExam,
            column: 9,
            policy: ExpiryPolicy::DaysAfter(730),
        },
        ExpiryRule {
            kind: DocumentKind::LevelOfCare,
            column: 10,
            policy: ExpiryPolicy::ExactDate,
        },
    ]
}
