use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{RPE, Reps, Weight};

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SetLog {
    pub weight: Weight,
    pub reps: Reps,
    pub rpe: RPE,
}

impl SetLog {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.reps * self.rpe
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub name: String,
    pub sets: Vec<SetLog>,
    pub work_time: u32,
    pub rest_time: u32,
}

impl ExerciseLog {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sets: vec![],
            work_time: 0,
            rest_time: 0,
        }
    }

    /// Sum of reps × RPE over all sets.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(SetLog::volume).sum()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub date: NaiveDate,
    pub title: String,
    pub total_time: u32,
    pub exercises: Vec<ExerciseLog>,
}

impl Workout {
    #[must_use]
    pub fn work_time(&self) -> u32 {
        self.exercises.iter().map(|e| e.work_time).sum()
    }

    #[must_use]
    pub fn rest_time(&self) -> u32 {
        self.exercises.iter().map(|e| e.rest_time).sum()
    }

    #[must_use]
    pub fn exercise(&self, name: &str) -> Option<&ExerciseLog> {
        self.exercises.iter().find(|e| e.name == name)
    }
}

/// Exercise logs of an ongoing session, keyed by exercise name.
///
/// Iteration follows the order in which exercises were first touched. Entries are
/// created on demand and never removed.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct WorkoutLog(IndexMap<String, ExerciseLog>);

impl WorkoutLog {
    pub fn upsert(&mut self, name: &str, mutation: impl FnOnce(&mut ExerciseLog)) {
        let log = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| ExerciseLog::new(name));
        mutation(log);
    }

    pub fn log_set(&mut self, name: &str, set: SetLog) {
        self.upsert(name, |log| log.sets.push(set));
    }

    pub fn add_work_time(&mut self, name: &str, seconds: u32) {
        self.upsert(name, |log| log.work_time += seconds);
    }

    pub fn add_rest_time(&mut self, name: &str, seconds: u32) {
        self.upsert(name, |log| log.rest_time += seconds);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExerciseLog> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn exercises(&self) -> impl Iterator<Item = &ExerciseLog> {
        self.0.values()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<ExerciseLog> {
        self.0.values().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LastPerformance(pub SetLog);

impl fmt::Display for LastPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kg × {} @ RPE {}",
            self.0.weight, self.0.reps, self.0.rpe
        )
    }
}

/// Find the first set of `exercise` in the most recently added workout containing it.
///
/// `history` is expected in insertion order, so it is scanned from the back. Older
/// workouts are not consulted if the most recent log of `exercise` has no sets.
#[must_use]
pub fn last_performance(history: &[Workout], exercise: &str) -> Option<LastPerformance> {
    history
        .iter()
        .rev()
        .find_map(|w| w.exercise(exercise))
        .and_then(|e| e.sets.first())
        .copied()
        .map(LastPerformance)
}
