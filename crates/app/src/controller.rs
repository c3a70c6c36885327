use std::rc::Rc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use liftlog_domain::{
    Effect, Feedback, Msg, Recap, SessionState, ShakeIntensity, Workout, WorkoutService,
};
use log::{debug, error, info, warn};

use crate::{OngoingSession, OngoingSessionService, Settings};

/// Haptic and visual cues. Calls are fire-and-forget.
pub trait FeedbackSink {
    fn notify(&self, feedback: Feedback);
    fn shake(&self, intensity: ShakeIntensity);
}

pub trait Navigator {
    fn present_recap(&self, recap: Recap);
    fn close(&self);
}

/// Source of the one second ticks driving the session timers.
///
/// While started, the host has to call [`SessionController::tick`] once per second.
pub trait Ticker {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Owner of a running [`SessionState`], executing the effects of its transitions.
///
/// User actions and ticks are both applied through `&mut self`, so they never interleave.
pub struct SessionController<S, F, N, T>
where
    S: WorkoutService,
    F: FeedbackSink,
    N: Navigator,
    T: Ticker,
{
    state: SessionState,
    history: Vec<Workout>,
    service: Rc<S>,
    feedback: F,
    navigator: N,
    ticker: T,
    haptics: bool,
    ticking: bool,
}

impl<S, F, N, T> SessionController<S, F, N, T>
where
    S: WorkoutService,
    F: FeedbackSink,
    N: Navigator,
    T: Ticker,
{
    pub async fn new(
        service: Rc<S>,
        feedback: F,
        navigator: N,
        ticker: T,
        settings: Settings,
    ) -> Self {
        let history = match service.get_workouts().await {
            Ok(workouts) => workouts,
            Err(err) => {
                warn!("starting session without workout history: {err}");
                vec![]
            }
        };
        Self {
            state: SessionState::new(settings.rest_duration),
            history,
            service,
            feedback,
            navigator,
            ticker,
            haptics: settings.haptics,
            ticking: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn dispatch(&mut self, msg: Msg) {
        self.dispatch_on(msg, Local::now().date_naive()).await;
    }

    pub async fn dispatch_on(&mut self, msg: Msg, today: NaiveDate) {
        let effects = self.state.update(msg, &self.history, today);
        self.execute(effects).await;
    }

    pub async fn tick(&mut self) {
        let effects = self.state.tick();
        self.execute(effects).await;
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> OngoingSession {
        OngoingSession::new(self.state.clone(), now)
    }

    /// Continue a session from a snapshot, accounting for the time spent in the background.
    pub fn resume(&mut self, ongoing_session: OngoingSession, now: DateTime<Utc>) {
        let elapsed = ongoing_session.elapsed_since_saved(now);
        self.state = ongoing_session.state;
        self.state.catch_up(elapsed);
        info!("resuming session after {elapsed} s in background");
        if self.state.session_active() && !self.state.is_finished() {
            self.start_ticking();
        }
    }

    /// Store the running session, or clear the stored one once the session has ended.
    pub async fn suspend(&self, sessions: &impl OngoingSessionService, now: DateTime<Utc>) {
        let ongoing_session = if self.state.is_finished() {
            None
        } else {
            Some(self.snapshot(now))
        };
        if let Err(err) = sessions.set_ongoing_session(ongoing_session).await {
            error!("failed to store ongoing session: {err}");
        }
    }

    /// Continue the stored session, if there is one, and remove it from the store.
    pub async fn restore(
        &mut self,
        sessions: &impl OngoingSessionService,
        now: DateTime<Utc>,
    ) -> bool {
        let ongoing_session = match sessions.get_ongoing_session().await {
            Ok(Some(ongoing_session)) => ongoing_session,
            Ok(None) => return false,
            Err(err) => {
                error!("failed to read ongoing session: {err}");
                return false;
            }
        };
        self.resume(ongoing_session, now);
        if let Err(err) = sessions.set_ongoing_session(None).await {
            error!("failed to clear ongoing session: {err}");
        }
        true
    }

    async fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Feedback(feedback) => {
                    if self.haptics {
                        self.feedback.notify(feedback);
                    } else {
                        debug!("haptics disabled, skipping {feedback:?}");
                    }
                }
                Effect::Shake(intensity) => self.feedback.shake(intensity),
                Effect::StartTicking => self.start_ticking(),
                Effect::StopTicking => self.stop_ticking(),
                Effect::SaveWorkout(workout) => match self.service.add_workout(workout).await {
                    Ok(workout) => self.history.push(workout),
                    Err(err) => error!("finished workout lost: {err}"),
                },
                Effect::ShowRecap(recap) => self.navigator.present_recap(recap),
                Effect::Close => self.navigator.close(),
            }
        }
    }

    fn start_ticking(&mut self) {
        if !self.ticking {
            self.ticker.start();
            self.ticking = true;
        }
    }

    fn stop_ticking(&mut self) {
        if self.ticking {
            self.ticker.stop();
            self.ticking = false;
        }
    }
}

impl<S, F, N, T> Drop for SessionController<S, F, N, T>
where
    S: WorkoutService,
    F: FeedbackSink,
    N: Navigator,
    T: Ticker,
{
    fn drop(&mut self) {
        if self.ticking {
            debug!("stopping ticker of dropped session");
        }
        self.stop_ticking();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::TimeZone;
    use futures::executor::block_on;
    use liftlog_domain::{
        CreateError, DayType, ReadError, RPE, Reps, SetDraft, StorageError, SubCategory, Weight,
    };
    use pretty_assertions::assert_eq;

    use crate::{
        OngoingSessionRepository, Service, SettingsRepository, SettingsService, current_settings,
    };

    use super::*;

    type Events = Rc<RefCell<Vec<String>>>;

    struct FakeFeedback(Events);

    impl FeedbackSink for FakeFeedback {
        fn notify(&self, feedback: Feedback) {
            self.0.borrow_mut().push(format!("notify {feedback:?}"));
        }

        fn shake(&self, intensity: ShakeIntensity) {
            self.0.borrow_mut().push(format!("shake {intensity:?}"));
        }
    }

    struct FakeNavigator(Events);

    impl Navigator for FakeNavigator {
        fn present_recap(&self, recap: Recap) {
            self.0.borrow_mut().push(format!(
                "recap {} s, {} exercises",
                recap.total_time,
                recap.exercises.len()
            ));
        }

        fn close(&self) {
            self.0.borrow_mut().push(String::from("close"));
        }
    }

    struct FakeTicker(Events);

    impl Ticker for FakeTicker {
        fn start(&mut self) {
            self.0.borrow_mut().push(String::from("start"));
        }

        fn stop(&mut self) {
            self.0.borrow_mut().push(String::from("stop"));
        }
    }

    #[derive(Default)]
    struct FakeService {
        workouts: RefCell<Vec<Workout>>,
        unavailable: bool,
    }

    impl WorkoutService for FakeService {
        async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
            if self.unavailable {
                return Err(StorageError::Unavailable.into());
            }
            Ok(self.workouts.borrow().clone())
        }

        async fn add_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
            if self.unavailable {
                return Err(StorageError::Unavailable.into());
            }
            self.workouts.borrow_mut().push(workout.clone());
            Ok(workout)
        }
    }

    type Controller = SessionController<FakeService, FakeFeedback, FakeNavigator, FakeTicker>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    fn controller(service: &Rc<FakeService>, settings: Settings) -> (Controller, Events) {
        let events = Events::default();
        let controller = block_on(SessionController::new(
            service.clone(),
            FakeFeedback(events.clone()),
            FakeNavigator(events.clone()),
            FakeTicker(events.clone()),
            settings,
        ));
        (controller, events)
    }

    fn dispatch(controller: &mut Controller, msg: Msg) {
        block_on(controller.dispatch_on(msg, today()));
    }

    fn ticks(controller: &mut Controller, n: u32) {
        for _ in 0..n {
            block_on(controller.tick());
        }
    }

    fn start_bench_press(controller: &mut Controller) {
        dispatch(controller, Msg::SelectDayType(DayType::Ppl));
        dispatch(controller, Msg::SelectSubCategory(SubCategory::Push));
        dispatch(controller, Msg::SelectExercise(String::from("Bench Press")));
        dispatch(controller, Msg::BeginWork);
    }

    fn log_set(controller: &mut Controller) {
        dispatch(controller, Msg::RequestRest);
        dispatch(
            controller,
            Msg::SetDraftChanged(SetDraft {
                weight: Weight::new(70.0).unwrap(),
                reps: Reps::new(6).unwrap(),
                rpe: RPE::new(8.5).unwrap(),
            }),
        );
        dispatch(controller, Msg::ConfirmSet);
    }

    #[test]
    fn test_session() {
        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(&service, Settings::default());

        start_bench_press(&mut controller);
        ticks(&mut controller, 20);
        log_set(&mut controller);
        ticks(&mut controller, 30);
        dispatch(&mut controller, Msg::Finish);

        assert_eq!(
            *events.borrow(),
            vec![
                "notify LightImpact",
                "notify LightImpact",
                "notify MediumImpact",
                "start",
                "notify Success",
                "shake Heavy",
                "notify MediumImpact",
                "notify LightImpact",
                "shake Light",
                "stop",
                "recap 50 s, 1 exercises",
            ]
        );

        let workouts = service.workouts.borrow();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].date, today());
        assert_eq!(workouts[0].title, "Push");
        assert_eq!(workouts[0].total_time, 50);
        assert_eq!(workouts[0].exercises[0].work_time, 20);
    }

    #[test]
    fn test_haptics_disabled() {
        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(
            &service,
            Settings {
                haptics: false,
                ..Settings::default()
            },
        );

        start_bench_press(&mut controller);
        dispatch(&mut controller, Msg::RequestRest);

        assert_eq!(*events.borrow(), vec!["start", "shake Heavy", "shake Light"]);
    }

    #[test]
    fn test_overtime_warning() {
        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(
            &service,
            Settings {
                rest_duration: 10,
                ..Settings::default()
            },
        );

        start_bench_press(&mut controller);
        log_set(&mut controller);
        events.borrow_mut().clear();
        ticks(&mut controller, 20);

        assert_eq!(controller.state().rest_timer(), 0);
        assert_eq!(*events.borrow(), vec!["notify Warning", "notify Warning"]);
    }

    #[test]
    fn test_last_performance_from_history() {
        let service = Rc::new(FakeService::default());
        let (mut first, _) = controller(&service, Settings::default());
        start_bench_press(&mut first);
        log_set(&mut first);
        dispatch(&mut first, Msg::Finish);
        drop(first);

        let (mut second, _) = controller(&service, Settings::default());
        dispatch(&mut second, Msg::SelectDayType(DayType::Ppl));
        dispatch(&mut second, Msg::SelectSubCategory(SubCategory::Push));
        dispatch(&mut second, Msg::SelectExercise(String::from("Bench Press")));

        assert_eq!(
            second.state().last_performance().map(|p| p.to_string()),
            Some(String::from("70 kg × 6 @ RPE 8.5"))
        );
    }

    #[test]
    fn test_save_failure_still_shows_recap() {
        let service = Rc::new(FakeService {
            unavailable: true,
            ..FakeService::default()
        });
        let (mut controller, events) = controller(&service, Settings::default());

        start_bench_press(&mut controller);
        log_set(&mut controller);
        dispatch(&mut controller, Msg::Finish);

        assert_eq!(
            events.borrow().last().map(String::as_str),
            Some("recap 0 s, 1 exercises")
        );
    }

    #[test]
    fn test_abandon() {
        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(&service, Settings::default());

        start_bench_press(&mut controller);
        events.borrow_mut().clear();
        dispatch(&mut controller, Msg::Abandon);
        drop(controller);

        assert_eq!(*events.borrow(), vec!["stop", "close"]);
        assert!(service.workouts.borrow().is_empty());
    }

    #[test]
    fn test_drop_stops_ticker() {
        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(&service, Settings::default());

        start_bench_press(&mut controller);
        drop(controller);

        assert_eq!(events.borrow().last().map(String::as_str), Some("stop"));
    }

    #[test]
    fn test_drop_before_session() {
        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(&service, Settings::default());

        dispatch(&mut controller, Msg::SelectDayType(DayType::FullBody));
        drop(controller);

        assert_eq!(*events.borrow(), vec!["notify LightImpact"]);
    }

    #[test]
    fn test_snapshot_and_resume() {
        let service = Rc::new(FakeService::default());
        let saved_at = Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap();

        let (mut first, _) = controller(&service, Settings::default());
        start_bench_press(&mut first);
        ticks(&mut first, 3);
        let snapshot = first.snapshot(saved_at);
        drop(first);

        let (mut second, events) = controller(&service, Settings::default());
        second.resume(snapshot, saved_at + chrono::Duration::seconds(10));

        assert_eq!(second.state().session_timer(), 13);
        assert_eq!(second.state().work_timer(), 13);
        assert_eq!(*events.borrow(), vec!["start"]);
    }

    fn stored(app: &Service<FakeAppStore>) -> Option<OngoingSession> {
        block_on(app.get_ongoing_session()).unwrap()
    }

    #[derive(Default)]
    struct FakeAppStore {
        settings: RefCell<Option<Settings>>,
        ongoing_session: RefCell<Option<OngoingSession>>,
        unavailable: bool,
    }

    impl SettingsRepository for FakeAppStore {
        async fn read_settings(&self) -> Result<Settings, String> {
            if self.unavailable {
                return Err(String::from("storage unavailable"));
            }
            Ok(self.settings.borrow().unwrap_or_default())
        }

        async fn write_settings(&self, settings: Settings) -> Result<(), String> {
            *self.settings.borrow_mut() = Some(settings);
            Ok(())
        }
    }

    impl OngoingSessionRepository for FakeAppStore {
        async fn read_ongoing_session(&self) -> Result<Option<OngoingSession>, String> {
            if self.unavailable {
                return Err(String::from("storage unavailable"));
            }
            Ok(self.ongoing_session.borrow().clone())
        }

        async fn write_ongoing_session(
            &self,
            ongoing_session: Option<OngoingSession>,
        ) -> Result<(), String> {
            *self.ongoing_session.borrow_mut() = ongoing_session;
            Ok(())
        }
    }

    #[test]
    fn test_settings_from_service() {
        let app = Service::new(FakeAppStore::default());
        let settings = Settings {
            rest_duration: 60,
            haptics: false,
        };
        block_on(app.set_settings(settings)).unwrap();

        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(&service, block_on(current_settings(&app)));
        start_bench_press(&mut controller);

        assert_eq!(controller.state().rest_duration(), 60);
        assert_eq!(*events.borrow(), vec!["start", "shake Heavy"]);
    }

    #[test]
    fn test_settings_unavailable() {
        let app = Service::new(FakeAppStore {
            unavailable: true,
            ..FakeAppStore::default()
        });

        assert_eq!(block_on(current_settings(&app)), Settings::default());
    }

    #[test]
    fn test_suspend_and_restore() {
        let app = Service::new(FakeAppStore::default());
        let service = Rc::new(FakeService::default());
        let saved_at = Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap();

        let (mut first, _) = controller(&service, Settings::default());
        start_bench_press(&mut first);
        ticks(&mut first, 5);
        block_on(first.suspend(&app, saved_at));
        drop(first);
        assert!(stored(&app).is_some());

        let (mut second, events) = controller(&service, Settings::default());
        assert!(block_on(second.restore(&app, saved_at + chrono::Duration::seconds(20))));

        assert_eq!(second.state().session_timer(), 25);
        assert_eq!(second.state().current_exercise(), Some("Bench Press"));
        assert_eq!(*events.borrow(), vec!["start"]);
        assert!(stored(&app).is_none());
        assert!(!block_on(second.restore(&app, saved_at)));
    }

    #[test]
    fn test_suspend_after_finish_clears_session() {
        let app = Service::new(FakeAppStore::default());
        let service = Rc::new(FakeService::default());
        let saved_at = Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap();

        let (mut controller, _) = controller(&service, Settings::default());
        start_bench_press(&mut controller);
        block_on(controller.suspend(&app, saved_at));
        assert!(stored(&app).is_some());

        dispatch(&mut controller, Msg::Finish);
        block_on(controller.suspend(&app, saved_at));
        assert!(stored(&app).is_none());
    }

    #[test]
    fn test_restore_unavailable() {
        let app = Service::new(FakeAppStore {
            unavailable: true,
            ..FakeAppStore::default()
        });
        let service = Rc::new(FakeService::default());
        let (mut controller, events) = controller(&service, Settings::default());

        assert!(!block_on(controller.restore(&app, Utc::now())));
        assert_eq!(controller.state().phase(), liftlog_domain::Phase::DayType);
        assert!(events.borrow().is_empty());
    }
}
