//! Service context bundling the identity-service port.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::LiveIdentityService;
use crate::adapters::recording::RecordingIdentityService;
use crate::adapters::replaying::ReplayingIdentityService;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::error::ReorgResult;
use crate::ports::IdentityService;

/// Bundles the identity-service port with an optional recording session.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying). A recording context must be closed with [`finish`] to write
/// its cassette.
///
/// [`finish`]: ServiceContext::finish
pub struct ServiceContext {
    /// Identity service used for every lookup.
    pub identity: Box<dyn IdentityService>,
    session: Option<RecordingSession>,
}

impl ServiceContext {
    /// Wraps an arbitrary identity-service implementation.
    #[must_use]
    pub fn new(identity: Box<dyn IdentityService>) -> Self {
        Self { identity, session: None }
    }

    /// Authenticates against the live service.
    ///
    /// # Errors
    ///
    /// Returns an error if the trust anchor is unusable or the token
    /// exchange fails.
    pub async fn live(settings: &Settings) -> ReorgResult<Self> {
        let service = LiveIdentityService::connect(settings).await?;
        Ok(Self::new(Box::new(service)))
    }

    /// Wraps `inner` so that every call is recorded into a new session
    /// under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording(
        inner: Box<dyn IdentityService>,
        root: &Path,
        base_url: &str,
    ) -> ReorgResult<Self> {
        let session = RecordingSession::new(root, base_url)?;
        let identity = RecordingIdentityService::new(inner, Arc::clone(&session.identity));
        Ok(Self { identity: Box::new(identity), session: Some(session) })
    }

    /// Serves every call from the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> ReorgResult<Self> {
        Ok(Self::new(Box::new(ReplayingIdentityService::load(path)?)))
    }

    /// Returns `true` if calls are being recorded.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Closes the context, writing the cassette of a recording session.
    ///
    /// Returns the session directory when recording, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> ReorgResult<Option<PathBuf>> {
        let Self { identity, session } = self;
        drop(identity);
        session.map(RecordingSession::finish).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::cassette::session::IDENTITY_CASSETTE;
    use crate::model::IdentityRecord;
    use crate::ports::{AccountRef, RawEntitlement, RoleAssignment, RoleResponse, ServiceFuture};
    use serde_json::json;

    struct NoAccounts;

    impl IdentityService for NoAccounts {
        fn find_identities(&self, _: &str) -> ServiceFuture<'_, Vec<IdentityRecord>> {
            Box::pin(async { Ok(vec![]) })
        }
        fn list_role_assignments(&self, _: &str) -> ServiceFuture<'_, Vec<RoleAssignment>> {
            Box::pin(async { Ok(vec![]) })
        }
        fn get_role(&self, _: &str) -> ServiceFuture<'_, RoleResponse> {
            Box::pin(async {
                Ok(RoleResponse { name: "R".into(), owner: None, entitlements: vec![] })
            })
        }
        fn list_accounts(&self, _: &str) -> ServiceFuture<'_, Vec<AccountRef>> {
            Box::pin(async { Ok(vec![]) })
        }
        fn list_entitlements(&self, _: &str) -> ServiceFuture<'_, Vec<RawEntitlement>> {
            Box::pin(async { Ok(vec![]) })
        }
    }

    #[tokio::test]
    async fn recording_context_writes_replayable_cassette() {
        let root = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::recording(Box::new(NoAccounts), root.path(), "https://t/")
            .unwrap();
        assert!(ctx.is_recording());
        assert!(ctx.identity.list_accounts("id-1").await.unwrap().is_empty());

        let dir = ctx.finish().unwrap().expect("recording returns its directory");
        let cassette_path = dir.join(IDENTITY_CASSETTE);
        let cassette = Cassette::load(&cassette_path).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].input, json!({"identity_id": "id-1"}));

        let replay = ServiceContext::replaying(&cassette_path).unwrap();
        assert!(!replay.is_recording());
        assert!(replay.identity.list_accounts("id-1").await.unwrap().is_empty());
        assert_eq!(replay.finish().unwrap(), None);
    }

    #[test]
    fn replaying_missing_cassette_is_an_error() {
        assert!(ServiceContext::replaying(Path::new("/nonexistent/c.yaml")).is_err());
    }
}
