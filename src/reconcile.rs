//! Advisory comparison of the reorg file's current assignment with the
//! identity service's view.
//!
//! A mismatch is logged and returned; it never excludes the identity.

use log::{info, warn};

use crate::input::ReorgRecord;
use crate::model::IdentityRecord;

/// Outcome of comparing one record with its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Department and team agree.
    Match,
    /// Department or team differ.
    Mismatch(Mismatch),
}

/// Both sides of a disagreement, trimmed. Absent service values are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Department id from the reorg file.
    pub csv_department_id: String,
    /// Department id held by the service.
    pub api_department_id: String,
    /// Team id from the reorg file.
    pub csv_team_id: String,
    /// Team id held by the service.
    pub api_team_id: String,
}

impl Reconciliation {
    /// Returns `true` for [`Reconciliation::Match`].
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Compares the record's current department and team with the identity's.
#[must_use]
pub fn compare(record: &ReorgRecord, identity: &IdentityRecord) -> Reconciliation {
    let attributes = &identity.attributes;
    let csv_department_id = record.current_department_id.trim();
    let csv_team_id = record.current_team_id.trim();
    let api_department_id = attributes.department_id.as_deref().unwrap_or_default().trim();
    let api_team_id = attributes.team_id.as_deref().unwrap_or_default().trim();

    if csv_department_id == api_department_id && csv_team_id == api_team_id {
        Reconciliation::Match
    } else {
        Reconciliation::Mismatch(Mismatch {
            csv_department_id: csv_department_id.to_string(),
            api_department_id: api_department_id.to_string(),
            csv_team_id: csv_team_id.to_string(),
            api_team_id: api_team_id.to_string(),
        })
    }
}

/// Compares and logs the outcome.
pub fn reconcile(record: &ReorgRecord, identity: &IdentityRecord) -> Reconciliation {
    let outcome = compare(record, identity);
    let alias = &record.payroll_id;
    match &outcome {
        Reconciliation::Match => {
            info!("Match for alias {alias}: departmentId and teamId are correct.");
        }
        Reconciliation::Mismatch(m) => warn!(
            "Mismatch for alias {alias}: CSV departmentId={}, API departmentId={}; \
             CSV teamId={}, API teamId={}",
            m.csv_department_id, m.api_department_id, m.csv_team_id, m.api_team_id
        ),
    }
    outcome
}
