use std::{collections::VecDeque, sync::Arc};

use liftlog_app::{
    OngoingSession, OngoingSessionRepository, Settings, SettingsRepository, log,
};
use liftlog_domain::{
    CreateError, DeleteError, GoalRepository, ReadError, StorageError, UpdateError, WeeklyGoal,
    Workout, WorkoutRepository,
};

use crate::key_value::{self, KeyValueStore};

const KEY_WORKOUTS: &str = "workouts";
const KEY_WEEKLY_GOAL: &str = "weeklyWorkoutGoal";
const KEY_SETTINGS: &str = "settings";
const KEY_ONGOING_SESSION: &str = "ongoing session";
const KEY_LOG: &str = "log";

const MAX_LOG_ENTRIES: usize = 100;

/// Repositories on top of a [`KeyValueStore`], persisting only as long as that store.
pub struct LocalStorage {
    store: Arc<KeyValueStore>,
}

impl LocalStorage {
    #[must_use]
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        Self { store }
    }
}

fn storage_error(key: &str, err: key_value::Error) -> StorageError {
    match err {
        key_value::Error::Poisoned => StorageError::Unavailable,
        err => StorageError::InvalidValue {
            key: key.to_string(),
            reason: err.to_string(),
        },
    }
}

impl WorkoutRepository for LocalStorage {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        match self.store.get(KEY_WORKOUTS) {
            Ok(workouts) => Ok(workouts),
            Err(key_value::Error::KeyNotFound(_)) => Ok(vec![]),
            Err(err) => Err(storage_error(KEY_WORKOUTS, err).into()),
        }
    }

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        let mut workouts = self.read_workouts().await?;
        workouts.push(workout.clone());
        self.store
            .set(KEY_WORKOUTS, workouts)
            .map_err(|err| storage_error(KEY_WORKOUTS, err))?;
        Ok(workout)
    }
}

impl GoalRepository for LocalStorage {
    async fn read_weekly_goal(&self) -> Result<Option<WeeklyGoal>, ReadError> {
        let value = match self.store.get_raw(KEY_WEEKLY_GOAL) {
            Ok(value) => value,
            Err(key_value::Error::KeyNotFound(_)) => return Ok(None),
            Err(err) => return Err(storage_error(KEY_WEEKLY_GOAL, err).into()),
        };
        match WeeklyGoal::try_from(value.as_str()) {
            Ok(goal) => Ok(Some(goal)),
            Err(err) => Err(StorageError::InvalidValue {
                key: KEY_WEEKLY_GOAL.to_string(),
                reason: err.to_string(),
            }
            .into()),
        }
    }

    async fn write_weekly_goal(&self, goal: WeeklyGoal) -> Result<WeeklyGoal, UpdateError> {
        self.store
            .set_raw(KEY_WEEKLY_GOAL, goal.to_string())
            .map_err(|err| storage_error(KEY_WEEKLY_GOAL, err))?;
        Ok(goal)
    }

    async fn delete_weekly_goal(&self) -> Result<(), DeleteError> {
        self.store
            .delete(KEY_WEEKLY_GOAL)
            .map_err(|err| storage_error(KEY_WEEKLY_GOAL, err))?;
        Ok(())
    }
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        match self.store.get(KEY_SETTINGS) {
            Ok(settings) => Ok(settings),
            Err(err) => match err {
                key_value::Error::KeyNotFound(_) => Ok(Settings::default()),
                err => Err(err),
            },
        }
        .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        self.store
            .set(KEY_SETTINGS, settings)
            .map_err(|err| err.to_string())
    }
}

impl OngoingSessionRepository for LocalStorage {
    async fn read_ongoing_session(&self) -> Result<Option<OngoingSession>, String> {
        match self.store.get(KEY_ONGOING_SESSION) {
            Ok(ongoing_session) => Ok(ongoing_session),
            Err(err) => match err {
                key_value::Error::KeyNotFound(_) => Ok(None),
                err => Err(err),
            },
        }
        .map_err(|err| err.to_string())
    }

    async fn write_ongoing_session(
        &self,
        ongoing_session: Option<OngoingSession>,
    ) -> Result<(), String> {
        self.store
            .set(KEY_ONGOING_SESSION, ongoing_session)
            .map_err(|err| err.to_string())
    }
}

/// Most recent log entries, newest first.
pub struct Log {
    store: Arc<KeyValueStore>,
}

impl Log {
    #[must_use]
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        Self { store }
    }
}

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self.store.get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                key_value::Error::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        self.store
            .set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
