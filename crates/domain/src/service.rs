use chrono::NaiveDate;
use log::{debug, error, info};

use crate::{
    CreateError, DeleteError, GoalRepository, GoalService, ReadError, UpdateError, WeeklyGoal,
    Workout, WorkoutRepository, WorkoutService, count_since, start_of_week, weekly_progress,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyProgress {
    pub count: usize,
    pub goal: WeeklyGoal,
    pub percent: f32,
}

impl<R> Service<R>
where
    R: WorkoutRepository + GoalRepository,
{
    /// Workouts of the current week measured against the weekly goal.
    ///
    /// Returns `None` if no goal is set.
    pub async fn get_weekly_progress(
        &self,
        today: NaiveDate,
    ) -> Result<Option<WeeklyProgress>, ReadError> {
        let Some(goal) = self.get_weekly_goal().await? else {
            return Ok(None);
        };
        let count = count_since(&self.get_workouts().await?, start_of_week(today));
        Ok(Some(WeeklyProgress {
            count,
            goal,
            percent: weekly_progress(count, goal),
        }))
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(self.repository.read_workouts(), ReadError, "get", "workouts")
    }

    async fn add_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        info!(
            "saving workout \"{}\" of {} with {} exercises",
            workout.title,
            workout.date,
            workout.exercises.len()
        );
        log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "add",
            "workout"
        )
    }
}

impl<R: GoalRepository> GoalService for Service<R> {
    async fn get_weekly_goal(&self) -> Result<Option<WeeklyGoal>, ReadError> {
        log_on_error!(
            self.repository.read_weekly_goal(),
            ReadError,
            "get",
            "weekly goal"
        )
    }

    async fn set_weekly_goal(&self, goal: WeeklyGoal) -> Result<WeeklyGoal, UpdateError> {
        log_on_error!(
            self.repository.write_weekly_goal(goal),
            UpdateError,
            "set",
            "weekly goal"
        )
    }

    async fn clear_weekly_goal(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_weekly_goal(),
            DeleteError,
            "clear",
            "weekly goal"
        )
    }
}
