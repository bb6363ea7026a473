#![warn(clippy::pedantic)]

pub mod local_storage;
pub mod log;
pub mod rest;
pub mod settings;

pub use settings::{Settings, SettingsRepository, VideoApi};
