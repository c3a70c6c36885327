use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

impl Entry {
    #[must_use]
    pub fn new(level: Level, message: String) -> Self {
        Self {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level,
            message,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if a logger has already been initialized.
pub fn init(
    repository: Arc<Mutex<dyn Repository>>,
    max_level: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(max_level))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(log) = LOG.lock() else {
            return;
        };
        if let Some(repository) = log.as_ref() {
            if let Ok(repository) = repository.lock() {
                let entry = Entry::new(record.level(), record.args().to_string());
                let _ = repository.write_entry(entry);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Entries(Mutex<VecDeque<Entry>>);

    impl Repository for Entries {
        fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
            Ok(self
                .0
                .lock()
                .map_err(|err| Error::Unknown(err.to_string()))?
                .clone())
        }

        fn write_entry(&self, entry: Entry) -> Result<(), Error> {
            self.0
                .lock()
                .map_err(|err| Error::Unknown(err.to_string()))?
                .push_front(entry);
            Ok(())
        }
    }

    #[test]
    fn test_logger_writes_entries() {
        let entries = Arc::new(Mutex::new(Entries::default()));
        init(entries.clone(), LevelFilter::Info).unwrap();

        log::info!("logger test: session started");
        log::debug!("logger test: not recorded");
        log::warn!("logger test: rest overtime");

        let recorded = entries.lock().unwrap().read_entries().unwrap();
        assert_eq!(
            recorded
                .iter()
                .filter(|e| e.message.starts_with("logger test"))
                .map(|e| (e.level, e.message.as_str()))
                .collect::<Vec<_>>(),
            vec![
                (Level::Warn, "logger test: rest overtime"),
                (Level::Info, "logger test: session started")
            ]
        );
    }

    #[test]
    fn test_entry_serialization() {
        let entry = Entry {
            time: String::from("Mar 06 18:30:00"),
            level: Level::Warn,
            message: String::from("rest overtime"),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"time":"Mar 06 18:30:00","level":"Warn","message":"rest overtime"}"#
        );
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), entry);
    }
}
