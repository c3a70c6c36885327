#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
mod error;
mod goal;
mod heatmap;
mod history;
mod service;
mod session;
mod workout;

use std::{fmt, ops::Mul};

use derive_more::{Display, Into};
use thiserror::Error;

pub use catalog::{DayType, Muscle, Property, SubCategory};
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use goal::{
    GoalRepository, GoalService, WeeklyGoal, WeeklyGoalError, count_since, start_of_week,
    weekly_progress,
};
pub use heatmap::{heatmap, opacity, volume_per_muscle};
pub use history::{WorkoutRepository, WorkoutService, newest_first, workout_dates};
pub use service::{Service, WeeklyProgress};
pub use session::{
    Effect, Feedback, Msg, Phase, Recap, SetDialog, SetDraft, SessionState, ShakeIntensity,
    DEFAULT_REST_DURATION,
};
pub use workout::{ExerciseLog, LastPerformance, SetLog, Workout, WorkoutLog, last_performance};

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<u32> for Reps {
    type Error = RepsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Reps::new(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

impl Mul<RPE> for Reps {
    type Output = f32;

    #[allow(clippy::cast_precision_loss)]
    fn mul(self, rhs: RPE) -> Self::Output {
        self.0 as f32 * f32::from(rhs)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if ((value * 10.0).round() - value * 10.0).abs() > 0.001 {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<f32> for Weight {
    type Error = WeightError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Weight::new(value)
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct RPE(u8);

impl RPE {
    pub const ONE: RPE = RPE(10);
    pub const TWO: RPE = RPE(20);
    pub const THREE: RPE = RPE(30);
    pub const FOUR: RPE = RPE(40);
    pub const FIVE: RPE = RPE(50);
    pub const SIX: RPE = RPE(60);
    pub const SEVEN: RPE = RPE(70);
    pub const EIGHT: RPE = RPE(80);
    pub const NINE: RPE = RPE(90);
    pub const TEN: RPE = RPE(100);

    pub fn new(value: f32) -> Result<Self, RPEError> {
        if !(1.0..=10.0).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        let tenths = value * 10.0;

        if (tenths.round() - tenths).abs() > 0.001 {
            return Err(RPEError::InvalidResolution);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = tenths.round() as u8;

        if v % 5 != 0 {
            return Err(RPEError::InvalidResolution);
        }

        Ok(Self(v))
    }
}

impl From<RPE> for f32 {
    fn from(value: RPE) -> Self {
        f32::from(value.0) / 10.0
    }
}

impl TryFrom<f32> for RPE {
    type Error = RPEError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        RPE::new(value)
    }
}

impl TryFrom<&str> for RPE {
    type Error = RPEError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => RPE::new(parsed_value),
            Err(_) => Err(RPEError::ParseError),
        }
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f32::from(*self))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 1.0 to 10.0")]
    OutOfRange,
    #[error("RPE must be a multiple of 0.5")]
    InvalidResolution,
    #[error("RPE must be a decimal")]
    ParseError,
}

/// Format seconds as `MM:SS` for running timers.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as `Xm Ys` for summaries.
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}
