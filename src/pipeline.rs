//! One sync run over the reorg records.

use log::info;

use crate::fetch::{AccessFetcher, IdentityResolver};
use crate::input::ReorgRecord;
use crate::model::Identity;
use crate::ports::IdentityService;
use crate::reconcile::reconcile;
use crate::sources::SourceRegistry;

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records processed.
    pub records: usize,
    /// Records whose alias resolved to an identity.
    pub resolved: usize,
    /// Records whose alias did not resolve.
    pub unresolved: usize,
    /// Resolved records whose department or team disagreed.
    pub mismatches: usize,
    /// Distinct roles looked up.
    pub roles: usize,
}

/// Identities gathered by a run.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Enriched identities, in record order.
    pub identities: Vec<Identity>,
    /// Run counts.
    pub summary: RunSummary,
}

/// Resolves, enriches and reconciles every record, one at a time.
///
/// Records whose alias does not resolve are left out; mismatches are kept.
pub async fn run(
    service: &dyn IdentityService,
    registry: &SourceRegistry,
    records: &[ReorgRecord],
) -> RunOutput {
    let resolver = IdentityResolver::new(service);
    let mut fetcher = AccessFetcher::new(service, registry);
    let mut output = RunOutput::default();

    for record in records {
        output.summary.records += 1;
        let Some(found) = resolver.resolve(&record.payroll_id).await else {
            output.summary.unresolved += 1;
            continue;
        };
        output.summary.resolved += 1;

        let mut identity = Identity::new(found);
        identity.roles = fetcher.fetch_roles(&identity.record.id).await;
        identity.accounts = fetcher.fetch_accounts(&identity.record.id).await;

        if !reconcile(record, &identity.record).is_match() {
            output.summary.mismatches += 1;
        }
        output.identities.push(identity);
    }

    output.summary.roles = fetcher.role_cache().len();
    info!(
        "Processed {} records: {} resolved, {} not found, {} mismatched",
        output.summary.records,
        output.summary.resolved,
        output.summary.unresolved,
        output.summary.mismatches
    );
    output
}
