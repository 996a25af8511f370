pub mod state;

pub use state::{MessengerSettings, SettingsStore};
