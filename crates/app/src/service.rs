use crate::{
    OngoingSession, OngoingSessionRepository, OngoingSessionService, Settings, SettingsRepository,
    SettingsService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, String> {
        self.repository.read_settings().await
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), String> {
        self.repository.write_settings(settings).await
    }
}

impl<R: OngoingSessionRepository> OngoingSessionService for Service<R> {
    async fn get_ongoing_session(&self) -> Result<Option<OngoingSession>, String> {
        self.repository.read_ongoing_session().await
    }

    async fn set_ongoing_session(
        &self,
        ongoing_session: Option<OngoingSession>,
    ) -> Result<(), String> {
        self.repository.write_ongoing_session(ongoing_session).await
    }
}
