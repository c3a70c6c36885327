use std::{collections::BTreeMap, sync::RwLock};

use serde::{Serialize, de::DeserializeOwned};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("key \"{0}\" not found")]
    KeyNotFound(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// In-memory string key-value store with the semantics of browser local storage.
///
/// Entries live as long as the store. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct KeyValueStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl KeyValueStore {
    pub fn get_raw(&self, key: &str) -> Result<String, Error> {
        self.entries
            .read()
            .map_err(|_| Error::Poisoned)?
            .get(key)
            .cloned()
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    pub fn set_raw(&self, key: &str, value: String) -> Result<(), Error> {
        self.entries
            .write()
            .map_err(|_| Error::Poisoned)?
            .insert(key.to_string(), value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.get_raw(key)?)?)
    }

    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<(), Error> {
        self.set_raw(key, serde_json::to_string(&value)?)
    }

    pub fn delete(&self, key: &str) -> Result<(), Error> {
        self.entries
            .write()
            .map_err(|_| Error::Poisoned)?
            .remove(key);
        Ok(())
    }
}
