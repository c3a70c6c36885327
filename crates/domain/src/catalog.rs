use std::{collections::BTreeMap, slice::Iter};

use strum::{Display, EnumIter};

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum DayType {
    #[strum(to_string = "PPL")]
    Ppl,
    #[strum(to_string = "Upper / Lower")]
    UpperLower,
    #[strum(to_string = "Full Body")]
    FullBody,
    #[strum(to_string = "Bro Split")]
    BroSplit,
}

impl DayType {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            DayType::Ppl => "ppl",
            DayType::UpperLower => "upperlower",
            DayType::FullBody => "fullbody",
            DayType::BroSplit => "bro",
        }
    }

    /// The sub-categories offered after choosing this day type.
    ///
    /// An empty slice means the day type leads directly to the exercise list.
    #[must_use]
    pub fn sub_categories(self) -> &'static [SubCategory] {
        match self {
            DayType::Ppl => &[SubCategory::Push, SubCategory::Pull, SubCategory::Legs],
            DayType::UpperLower => &[SubCategory::Upper, SubCategory::Lower],
            DayType::FullBody => &[],
            DayType::BroSplit => &[
                SubCategory::Chest,
                SubCategory::Back,
                SubCategory::Arms,
                SubCategory::Legs,
            ],
        }
    }

    #[must_use]
    pub fn skips_sub_category(self) -> bool {
        self.sub_categories().is_empty()
    }
}

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum SubCategory {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    Chest,
    Back,
    Arms,
}

impl SubCategory {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SubCategory::Push => "push",
            SubCategory::Pull => "pull",
            SubCategory::Legs => "legs",
            SubCategory::Upper => "upper",
            SubCategory::Lower => "lower",
            SubCategory::Chest => "chest",
            SubCategory::Back => "back",
            SubCategory::Arms => "arms",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Muscle {
    Chest,
    Shoulders,
    Triceps,
    Back,
    Biceps,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
}

impl Property for Muscle {
    fn iter() -> Iter<'static, Muscle> {
        static MUSCLES: [Muscle; 9] = [
            Muscle::Chest,
            Muscle::Shoulders,
            Muscle::Triceps,
            Muscle::Back,
            Muscle::Biceps,
            Muscle::Quads,
            Muscle::Hamstrings,
            Muscle::Glutes,
            Muscle::Calves,
        ];
        MUSCLES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Muscle::Chest => "chest",
            Muscle::Shoulders => "shoulders",
            Muscle::Triceps => "triceps",
            Muscle::Back => "back",
            Muscle::Biceps => "biceps",
            Muscle::Quads => "quads",
            Muscle::Hamstrings => "hamstrings",
            Muscle::Glutes => "glutes",
            Muscle::Calves => "calves",
        }
    }
}

const PUSH: &[&str] = &[
    "Bench Press",
    "Overhead Press",
    "Incline Dumbbell Press",
    "Triceps Pushdown",
    "Lateral Raises",
    "Chest Fly",
];
const PULL: &[&str] = &[
    "Deadlift",
    "Pull-ups",
    "Bent Over Row",
    "Face Pulls",
    "Bicep Curls",
    "Lat Pulldowns",
];
const LEGS: &[&str] = &[
    "Squat",
    "Romanian Deadlift",
    "Leg Press",
    "Leg Curls",
    "Calf Raises",
    "Lunges",
];
const UPPER: &[&str] = &[
    "Bench Press",
    "Bent Over Row",
    "Overhead Press",
    "Pull-ups",
    "Bicep Curls",
    "Triceps Pushdown",
];
const LOWER: &[&str] = &[
    "Squat",
    "Deadlift",
    "Leg Press",
    "Leg Curls",
    "Calf Raises",
    "Glute Bridges",
];
const CHEST: &[&str] = &[
    "Bench Press",
    "Incline Bench Press",
    "Dumbbell Press",
    "Chest Fly",
    "Dips",
];
const ARMS: &[&str] = &[
    "Bicep Curls",
    "Triceps Pushdown",
    "Hammer Curls",
    "Skull Crushers",
    "Preacher Curls",
];
const BACK: &[&str] = &[
    "Pull-ups",
    "Bent Over Row",
    "Lat Pulldowns",
    "T-Bar Row",
    "Face Pulls",
];

pub(crate) static WORKOUTS: std::sync::LazyLock<BTreeMap<&'static str, &'static [&'static str]>> =
    std::sync::LazyLock::new(|| {
        BTreeMap::from([
            ("push", PUSH),
            ("pull", PULL),
            ("legs", LEGS),
            ("upper", UPPER),
            ("lower", LOWER),
            ("chest", CHEST),
            ("arms", ARMS),
            ("back", BACK),
        ])
    });

const MUSCLE_GROUPS: [(&str, Muscle); 24] = [
    // Push
    ("Bench Press", Muscle::Chest),
    ("Overhead Press", Muscle::Shoulders),
    ("Incline Dumbbell Press", Muscle::Chest),
    ("Triceps Pushdown", Muscle::Triceps),
    ("Lateral Raises", Muscle::Shoulders),
    ("Chest Fly", Muscle::Chest),
    ("Dips", Muscle::Triceps),
    ("Skull Crushers", Muscle::Triceps),
    // Pull
    ("Deadlift", Muscle::Back),
    ("Pull-ups", Muscle::Back),
    ("Bent Over Row", Muscle::Back),
    ("Face Pulls", Muscle::Shoulders),
    ("Bicep Curls", Muscle::Biceps),
    ("Lat Pulldowns", Muscle::Back),
    ("T-Bar Row", Muscle::Back),
    ("Hammer Curls", Muscle::Biceps),
    ("Preacher Curls", Muscle::Biceps),
    // Legs
    ("Squat", Muscle::Quads),
    ("Romanian Deadlift", Muscle::Hamstrings),
    ("Leg Press", Muscle::Quads),
    ("Leg Curls", Muscle::Hamstrings),
    ("Calf Raises", Muscle::Calves),
    ("Lunges", Muscle::Quads),
    ("Glute Bridges", Muscle::Glutes),
];

static MUSCLES_BY_EXERCISE: std::sync::LazyLock<BTreeMap<&'static str, Muscle>> =
    std::sync::LazyLock::new(|| MUSCLE_GROUPS.into_iter().collect());

/// Resolve the exercises offered for a day type and an optional sub-category.
///
/// Full body combines the upper and lower lists. Leg days of PPL and bro splits
/// share the dedicated leg list. Unknown combinations yield an empty list.
#[must_use]
pub fn exercises(day_type: DayType, sub_category: Option<SubCategory>) -> Vec<&'static str> {
    if day_type == DayType::FullBody {
        return UPPER.iter().chain(LOWER).copied().collect();
    }
    let Some(sub_category) = sub_category else {
        return vec![];
    };
    if matches!(day_type, DayType::BroSplit | DayType::Ppl) && sub_category == SubCategory::Legs {
        return LEGS.to_vec();
    }
    WORKOUTS
        .get(sub_category.key())
        .map(|list| list.to_vec())
        .unwrap_or_default()
}

#[must_use]
pub fn muscle(exercise: &str) -> Option<Muscle> {
    MUSCLES_BY_EXERCISE.get(exercise).copied()
}
