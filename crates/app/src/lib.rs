#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod context;
mod controller;
pub mod log;
mod ongoing_session;
mod service;
mod settings;

pub use context::{Context, ContextBuilder, ContextError};
pub use controller::{FeedbackSink, Navigator, SessionController, Ticker};
pub use ongoing_session::{OngoingSession, OngoingSessionRepository, OngoingSessionService};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, current_settings};
