use chrono::{DateTime, Utc};
use liftlog_domain::SessionState;

#[allow(async_fn_in_trait)]
pub trait OngoingSessionService {
    async fn get_ongoing_session(&self) -> Result<Option<OngoingSession>, String>;
    async fn set_ongoing_session(
        &self,
        ongoing_session: Option<OngoingSession>,
    ) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait OngoingSessionRepository {
    async fn read_ongoing_session(&self) -> Result<Option<OngoingSession>, String>;
    async fn write_ongoing_session(
        &self,
        ongoing_session: Option<OngoingSession>,
    ) -> Result<(), String>;
}

/// Snapshot of a running session, stored when the app is sent to the background.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct OngoingSession {
    pub state: SessionState,
    pub saved_at: DateTime<Utc>,
}

impl OngoingSession {
    #[must_use]
    pub fn new(state: SessionState, saved_at: DateTime<Utc>) -> Self {
        Self { state, saved_at }
    }

    /// Whole seconds passed since the snapshot was taken.
    ///
    /// A clock set back before `saved_at` results in zero.
    #[must_use]
    pub fn elapsed_since_saved(&self, now: DateTime<Utc>) -> u32 {
        u32::try_from((now - self.saved_at).num_seconds().max(0)).unwrap_or(u32::MAX)
    }
}
