use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{CreateError, LastPerformance, ReadError, Workout, count_since, last_performance};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn add_workout(&self, workout: Workout) -> Result<Workout, CreateError>;

    async fn count_workouts_since(&self, cutoff: NaiveDate) -> Result<usize, ReadError> {
        Ok(count_since(&self.get_workouts().await?, cutoff))
    }

    async fn get_last_performance(
        &self,
        exercise: &str,
    ) -> Result<Option<LastPerformance>, ReadError> {
        Ok(last_performance(&self.get_workouts().await?, exercise))
    }
}

/// Append-only store of finished workouts.
///
/// `read_workouts` must return the workouts in the order they were created.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
}

#[must_use]
pub fn newest_first(workouts: &[Workout]) -> Vec<&Workout> {
    workouts.iter().rev().collect()
}

/// Dates with at least one workout, used to mark training days in a calendar.
#[must_use]
pub fn workout_dates(workouts: &[Workout]) -> BTreeSet<NaiveDate> {
    workouts.iter().map(|w| w.date).collect()
}
