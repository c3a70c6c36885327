use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::{
    DayType, ExerciseLog, LastPerformance, Muscle, RPE, Reps, SetLog, SubCategory, Weight,
    Workout, WorkoutLog, catalog, heatmap, last_performance,
};

pub const DEFAULT_REST_DURATION: u32 = 180;

const OVERTIME_WARNING_INTERVAL: u32 = 5;
const FALLBACK_TITLE: &str = "Workout";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    DayType,
    SubCategory,
    ExerciseList,
    Ready,
    Working,
    Resting,
}

impl Phase {
    #[must_use]
    pub fn is_selection(self) -> bool {
        matches!(self, Phase::DayType | Phase::SubCategory | Phase::ExerciseList)
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        !self.is_selection()
    }
}

/// Values shown in the set logging prompt.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SetDraft {
    pub weight: Weight,
    pub reps: Reps,
    pub rpe: RPE,
}

impl Default for SetDraft {
    fn default() -> Self {
        Self {
            weight: Weight(60.0),
            reps: Reps(8),
            rpe: RPE::EIGHT,
        }
    }
}

impl From<SetDraft> for SetLog {
    fn from(value: SetDraft) -> Self {
        SetLog {
            weight: value.weight,
            reps: value.reps,
            rpe: value.rpe,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SetDialog {
    pub draft: SetDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Warning,
    LightImpact,
    MediumImpact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeIntensity {
    Light,
    Heavy,
}

/// Side effects requested by a transition, to be executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Feedback(Feedback),
    Shake(ShakeIntensity),
    StartTicking,
    StopTicking,
    SaveWorkout(Workout),
    ShowRecap(Recap),
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recap {
    pub date: NaiveDate,
    pub total_time: u32,
    pub work_time: u32,
    pub rest_time: u32,
    pub exercises: Vec<ExerciseLog>,
    pub heatmap: BTreeMap<Muscle, f32>,
}

impl Recap {
    #[must_use]
    pub fn new(date: NaiveDate, total_time: u32, exercises: Vec<ExerciseLog>) -> Self {
        Self {
            date,
            total_time,
            work_time: exercises.iter().map(|e| e.work_time).sum(),
            rest_time: exercises.iter().map(|e| e.rest_time).sum(),
            heatmap: heatmap(&exercises),
            exercises,
        }
    }
}

impl From<&Workout> for Recap {
    fn from(value: &Workout) -> Self {
        Recap::new(value.date, value.total_time, value.exercises.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SelectDayType(DayType),
    SelectSubCategory(SubCategory),
    SelectExercise(String),
    GoBack,

    BeginWork,
    RequestRest,
    SetDraftChanged(SetDraft),
    ConfirmSet,
    CancelSet,
    SwapExercise,

    EditRestDuration,
    RestDurationChanged(u32),
    ConfirmRestDuration,

    Finish,
    Abandon,
}

/// State of a single workout session, from choosing the day type until finishing.
///
/// All transitions go through [`SessionState::update`] and [`SessionState::tick`],
/// which mutate the state and return the effects the host has to carry out.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionState {
    phase: Phase,
    day_type: Option<DayType>,
    sub_category: Option<SubCategory>,
    current_exercise: Option<String>,
    last_performance: Option<LastPerformance>,
    workout_log: WorkoutLog,
    session_timer: u32,
    work_timer: u32,
    rest_timer: u32,
    overtime: u32,
    session_active: bool,
    rest_duration: u32,
    rest_duration_input: Option<u32>,
    set_dialog: Option<SetDialog>,
    set_draft: SetDraft,
    finished: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_REST_DURATION)
    }
}

impl SessionState {
    #[must_use]
    pub fn new(rest_duration: u32) -> Self {
        Self {
            phase: Phase::DayType,
            day_type: None,
            sub_category: None,
            current_exercise: None,
            last_performance: None,
            workout_log: WorkoutLog::default(),
            session_timer: 0,
            work_timer: 0,
            rest_timer: rest_duration,
            overtime: 0,
            session_active: false,
            rest_duration,
            rest_duration_input: None,
            set_dialog: None,
            set_draft: SetDraft::default(),
            finished: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn day_type(&self) -> Option<DayType> {
        self.day_type
    }

    #[must_use]
    pub fn sub_category(&self) -> Option<SubCategory> {
        self.sub_category
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&str> {
        self.current_exercise.as_deref()
    }

    #[must_use]
    pub fn last_performance(&self) -> Option<LastPerformance> {
        self.last_performance
    }

    #[must_use]
    pub fn workout_log(&self) -> &WorkoutLog {
        &self.workout_log
    }

    #[must_use]
    pub fn session_timer(&self) -> u32 {
        self.session_timer
    }

    #[must_use]
    pub fn work_timer(&self) -> u32 {
        self.work_timer
    }

    #[must_use]
    pub fn rest_timer(&self) -> u32 {
        self.rest_timer
    }

    /// Seconds spent resting after the rest timer ran out.
    #[must_use]
    pub fn overtime(&self) -> u32 {
        self.overtime
    }

    #[must_use]
    pub fn is_overtime(&self) -> bool {
        self.phase == Phase::Resting && self.rest_timer == 0
    }

    #[must_use]
    pub fn session_active(&self) -> bool {
        self.session_active
    }

    #[must_use]
    pub fn rest_duration(&self) -> u32 {
        self.rest_duration
    }

    #[must_use]
    pub fn rest_duration_input(&self) -> Option<u32> {
        self.rest_duration_input
    }

    #[must_use]
    pub fn set_dialog(&self) -> Option<&SetDialog> {
        self.set_dialog.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the screen may be dismissed by a back gesture.
    #[must_use]
    pub fn allows_dismiss(&self) -> bool {
        self.phase.is_selection()
    }

    /// The exercises to choose from in the exercise list.
    #[must_use]
    pub fn available_exercises(&self) -> Vec<&'static str> {
        match self.day_type {
            Some(day_type) => catalog::exercises(day_type, self.sub_category),
            None => vec![],
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        match (self.sub_category, self.day_type) {
            (Some(sub_category), _) => sub_category.to_string(),
            (None, Some(day_type)) => day_type.to_string(),
            (None, None) => FALLBACK_TITLE.to_string(),
        }
    }

    pub fn update(&mut self, msg: Msg, history: &[Workout], today: NaiveDate) -> Vec<Effect> {
        if self.finished {
            debug!("ignoring {msg:?} after session end");
            return vec![];
        }

        match msg {
            Msg::SelectDayType(day_type) => {
                if self.phase != Phase::DayType {
                    return self.ignore("select day type");
                }
                self.day_type = Some(day_type);
                self.sub_category = None;
                self.phase = if day_type.skips_sub_category() {
                    Phase::ExerciseList
                } else {
                    Phase::SubCategory
                };
                vec![Effect::Feedback(Feedback::LightImpact)]
            }
            Msg::SelectSubCategory(sub_category) => {
                if self.phase != Phase::SubCategory {
                    return self.ignore("select sub-category");
                }
                let offered = self
                    .day_type
                    .is_some_and(|d| d.sub_categories().contains(&sub_category));
                if !offered {
                    warn!(
                        "sub-category {sub_category} not offered for day type {:?}",
                        self.day_type
                    );
                    return vec![];
                }
                self.sub_category = Some(sub_category);
                self.phase = Phase::ExerciseList;
                vec![Effect::Feedback(Feedback::LightImpact)]
            }
            Msg::SelectExercise(exercise) => {
                if self.phase != Phase::ExerciseList {
                    return self.ignore("select exercise");
                }
                if !self.available_exercises().contains(&exercise.as_str()) {
                    warn!("exercise \"{exercise}\" not offered for {}", self.title());
                    return vec![];
                }
                self.last_performance = last_performance(history, &exercise);
                self.current_exercise = Some(exercise);
                self.work_timer = 0;
                self.phase = Phase::Ready;
                vec![Effect::Feedback(Feedback::MediumImpact)]
            }
            Msg::GoBack => {
                match self.phase {
                    Phase::SubCategory => {
                        self.day_type = None;
                        self.phase = Phase::DayType;
                    }
                    Phase::ExerciseList => {
                        if self.day_type.is_none_or(DayType::skips_sub_category) {
                            self.day_type = None;
                            self.phase = Phase::DayType;
                        } else {
                            self.sub_category = None;
                            self.phase = Phase::SubCategory;
                        }
                    }
                    _ => return self.ignore("go back"),
                }
                vec![]
            }

            Msg::BeginWork => self.begin_work(),
            Msg::RequestRest => {
                if self.phase != Phase::Working || self.set_dialog.is_some() {
                    return self.ignore("request rest");
                }
                self.set_dialog = Some(SetDialog {
                    draft: self.set_draft,
                });
                vec![
                    Effect::Feedback(Feedback::MediumImpact),
                    Effect::Feedback(Feedback::LightImpact),
                    Effect::Shake(ShakeIntensity::Light),
                ]
            }
            Msg::SetDraftChanged(draft) => {
                let Some(dialog) = self.set_dialog.as_mut() else {
                    return self.ignore("change set draft");
                };
                dialog.draft = draft;
                vec![]
            }
            Msg::ConfirmSet => self.confirm_set(),
            Msg::CancelSet => {
                if self.set_dialog.take().is_none() {
                    return self.ignore("cancel set");
                }
                vec![]
            }
            Msg::SwapExercise => {
                if !self.phase.is_active() {
                    return self.ignore("swap exercise");
                }
                self.leave_working();
                self.current_exercise = None;
                self.last_performance = None;
                self.set_dialog = None;
                self.rest_duration_input = None;
                self.phase = Phase::ExerciseList;
                vec![]
            }

            Msg::EditRestDuration => {
                if self.phase != Phase::Resting {
                    return self.ignore("edit rest duration");
                }
                self.rest_duration_input = Some(self.rest_duration);
                vec![]
            }
            Msg::RestDurationChanged(seconds) => {
                if self.phase != Phase::Resting || self.rest_duration_input.is_none() {
                    return self.ignore("change rest duration");
                }
                self.rest_duration_input = Some(seconds);
                vec![]
            }
            Msg::ConfirmRestDuration => {
                if self.phase != Phase::Resting {
                    return self.ignore("confirm rest duration");
                }
                let Some(rest_duration) = self.rest_duration_input.take() else {
                    return self.ignore("confirm rest duration");
                };
                let elapsed = self.rest_duration.saturating_sub(self.rest_timer);
                self.rest_duration = rest_duration;
                self.rest_timer = rest_duration.saturating_sub(elapsed);
                info!("rest duration set to {rest_duration} s");
                vec![]
            }

            Msg::Finish => self.finish(today),
            Msg::Abandon => {
                self.finished = true;
                let mut effects = vec![];
                if self.session_active {
                    effects.push(Effect::StopTicking);
                }
                if !self.workout_log.is_empty() {
                    warn!(
                        "abandoning session with {} logged exercises",
                        self.workout_log.len()
                    );
                }
                effects.push(Effect::Close);
                effects
            }
        }
    }

    /// Advance the timers by one second.
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.finished || !self.session_active {
            return vec![];
        }

        self.session_timer += 1;

        match self.phase {
            Phase::Working => {
                self.work_timer += 1;
            }
            Phase::Resting => {
                if self.rest_timer > 0 {
                    self.rest_timer -= 1;
                } else {
                    self.overtime += 1;
                    if self.session_timer % OVERTIME_WARNING_INTERVAL == 0 {
                        return vec![Effect::Feedback(Feedback::Warning)];
                    }
                }
            }
            _ => {}
        }

        vec![]
    }

    /// Advance the timers by the time the session spent in the background.
    pub fn catch_up(&mut self, seconds: u32) {
        if self.finished || !self.session_active {
            return;
        }
        debug!("catching up {seconds} s");
        for _ in 0..seconds {
            self.tick();
        }
    }

    fn begin_work(&mut self) -> Vec<Effect> {
        if !matches!(self.phase, Phase::Ready | Phase::Resting) {
            return self.ignore("begin work");
        }
        debug_assert!(
            self.current_exercise.is_some(),
            "begin work without selected exercise"
        );
        let Some(exercise) = self.current_exercise.as_deref() else {
            warn!("begin work without selected exercise");
            return vec![];
        };

        let mut effects = vec![];

        if !self.session_active {
            self.session_active = true;
            effects.push(Effect::StartTicking);
        }

        if self.phase == Phase::Resting {
            let elapsed = self.rest_duration.saturating_sub(self.rest_timer);
            self.workout_log.add_rest_time(exercise, elapsed);
        }

        self.work_timer = 0;
        self.rest_timer = self.rest_duration;
        self.overtime = 0;
        self.rest_duration_input = None;
        self.phase = Phase::Working;

        effects.push(Effect::Feedback(Feedback::Success));
        effects.push(Effect::Shake(ShakeIntensity::Heavy));
        effects
    }

    fn confirm_set(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Working {
            return self.ignore("confirm set");
        }
        let Some(dialog) = self.set_dialog.take() else {
            return self.ignore("confirm set");
        };
        debug_assert!(
            self.current_exercise.is_some(),
            "log set without selected exercise"
        );
        let Some(exercise) = self.current_exercise.as_deref() else {
            warn!("log set without selected exercise");
            return vec![];
        };

        self.workout_log.log_set(exercise, dialog.draft.into());
        self.workout_log.add_work_time(exercise, self.work_timer);
        self.set_draft = dialog.draft;
        self.rest_timer = self.rest_duration;
        self.overtime = 0;
        self.phase = Phase::Resting;

        vec![]
    }

    fn finish(&mut self, today: NaiveDate) -> Vec<Effect> {
        if !self.phase.is_active() && !self.session_active {
            return self.ignore("finish");
        }

        self.finished = true;

        let mut effects = vec![];

        if self.session_active {
            effects.push(Effect::StopTicking);
        }

        self.leave_working();
        self.set_dialog = None;
        self.rest_duration_input = None;

        let exercises = self.workout_log.to_vec();

        if exercises.iter().all(|e| e.sets.is_empty()) {
            info!("finishing session without logged sets");
        } else {
            let workout = Workout {
                date: today,
                title: self.title(),
                total_time: self.session_timer,
                exercises: exercises.clone(),
            };
            info!(
                "finishing \"{}\" after {} s with {} exercises",
                workout.title,
                workout.total_time,
                workout.exercises.len()
            );
            effects.push(Effect::SaveWorkout(workout));
        }

        effects.push(Effect::ShowRecap(Recap::new(
            today,
            self.session_timer,
            exercises,
        )));
        effects
    }

    /// Credit the running work timer to the current exercise when leaving the working phase.
    fn leave_working(&mut self) {
        if self.phase != Phase::Working {
            return;
        }
        if let Some(exercise) = self.current_exercise.as_deref() {
            self.workout_log.add_work_time(exercise, self.work_timer);
        }
        self.work_timer = 0;
    }

    fn ignore(&self, action: &str) -> Vec<Effect> {
        debug!("ignoring {action} in phase {:?}", self.phase);
        vec![]
    }
}
