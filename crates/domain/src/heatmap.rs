use std::collections::BTreeMap;

use crate::{ExerciseLog, Muscle, catalog};

const OPACITY_FLOOR: f32 = 0.15;
const OPACITY_CEILING: f32 = 0.9;
const VOLUME_PER_OPACITY: f32 = 400.0;

/// Accumulate the volume (reps × RPE) of all sets per muscle group.
///
/// Exercises without a muscle mapping in the catalog are ignored.
#[must_use]
pub fn volume_per_muscle(exercises: &[ExerciseLog]) -> BTreeMap<Muscle, f32> {
    let mut result: BTreeMap<Muscle, f32> = BTreeMap::new();
    for exercise in exercises {
        if let Some(muscle) = catalog::muscle(&exercise.name) {
            *result.entry(muscle).or_insert(0.0) += exercise.volume();
        }
    }
    result
}

#[must_use]
pub fn opacity(volume: f32) -> f32 {
    (OPACITY_FLOOR + volume / VOLUME_PER_OPACITY).min(OPACITY_CEILING)
}

/// Map each trained muscle group to the opacity of its highlight.
///
/// Muscle groups without volume are omitted rather than drawn at the floor opacity.
#[must_use]
pub fn heatmap(exercises: &[ExerciseLog]) -> BTreeMap<Muscle, f32> {
    volume_per_muscle(exercises)
        .into_iter()
        .filter(|(_, volume)| *volume > 0.0)
        .map(|(muscle, volume)| (muscle, opacity(volume)))
        .collect()
}
