#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod key_value;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;

pub use key_value::KeyValueStore;
pub use local_storage::{LocalStorage, Log};
