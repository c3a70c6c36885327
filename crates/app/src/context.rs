use std::rc::Rc;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("no {0} provider in context")]
    MissingProvider(&'static str),
}

/// Services shared by the screens of the app.
///
/// `W` provides the workout history and `G` the weekly goal. Both are usually the same
/// [`liftlog_domain::Service`] behind separate handles.
pub struct Context<W, G> {
    workouts: Option<Rc<W>>,
    goals: Option<Rc<G>>,
}

impl<W, G> Context<W, G> {
    pub fn workouts(&self) -> Result<Rc<W>, ContextError> {
        self.workouts
            .clone()
            .ok_or(ContextError::MissingProvider("workout history"))
    }

    pub fn goals(&self) -> Result<Rc<G>, ContextError> {
        self.goals
            .clone()
            .ok_or(ContextError::MissingProvider("weekly goal"))
    }
}

pub struct ContextBuilder<W, G> {
    workouts: Option<Rc<W>>,
    goals: Option<Rc<G>>,
}

impl<W, G> Default for ContextBuilder<W, G> {
    fn default() -> Self {
        Self {
            workouts: None,
            goals: None,
        }
    }
}

impl<W, G> ContextBuilder<W, G> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn workouts(mut self, workouts: Rc<W>) -> Self {
        self.workouts = Some(workouts);
        self
    }

    #[must_use]
    pub fn goals(mut self, goals: Rc<G>) -> Self {
        self.goals = Some(goals);
        self
    }

    #[must_use]
    pub fn build(self) -> Context<W, G> {
        Context {
            workouts: self.workouts,
            goals: self.goals,
        }
    }
}
