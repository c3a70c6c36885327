use chrono::{Datelike, Days, NaiveDate};
use derive_more::{Display, Into};
use thiserror::Error;

use crate::{DeleteError, ReadError, UpdateError, Workout};

#[allow(async_fn_in_trait)]
pub trait GoalService {
    async fn get_weekly_goal(&self) -> Result<Option<WeeklyGoal>, ReadError>;
    async fn set_weekly_goal(&self, goal: WeeklyGoal) -> Result<WeeklyGoal, UpdateError>;
    async fn clear_weekly_goal(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait GoalRepository {
    async fn read_weekly_goal(&self) -> Result<Option<WeeklyGoal>, ReadError>;
    async fn write_weekly_goal(&self, goal: WeeklyGoal) -> Result<WeeklyGoal, UpdateError>;
    async fn delete_weekly_goal(&self) -> Result<(), DeleteError>;
}

/// Number of workouts the user commits to per week.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq)]
pub struct WeeklyGoal(u32);

impl WeeklyGoal {
    pub fn new(value: u32) -> Result<Self, WeeklyGoalError> {
        if !(1..=14).contains(&value) {
            return Err(WeeklyGoalError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for WeeklyGoal {
    type Error = WeeklyGoalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => WeeklyGoal::new(parsed_value),
            Err(_) => Err(WeeklyGoalError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WeeklyGoalError {
    #[error("Weekly goal must be in the range 1 to 14")]
    OutOfRange,
    #[error("Weekly goal must be an integer")]
    ParseError,
}

/// The Sunday starting the week which contains `today`.
#[must_use]
pub fn start_of_week(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_sunday())))
        .unwrap_or(today)
}

#[must_use]
pub fn count_since(workouts: &[Workout], cutoff: NaiveDate) -> usize {
    workouts.iter().filter(|w| w.date >= cutoff).count()
}

/// Progress towards the weekly goal in percent, clamped to 100.
#[must_use]
pub fn weekly_progress(count: usize, goal: WeeklyGoal) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let ratio = count as f32 / goal.0 as f32;
    ratio.min(1.0) * 100.0
}
