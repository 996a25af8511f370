use chrono::Local;

/// Label used for freshly created items before any real time applies.
pub const NOW_LABEL: &str = "Now";

const TIME_FORMAT: &str = "%I:%M %p";

/// Source of the display time stamped onto sent and received messages.
pub trait Clock {
    fn now_label(&self) -> String;
}

/// Wall clock in the local timezone, formatted like "03:07 PM".
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now_label(&self) -> String {
        Local::now().format(TIME_FORMAT).to_string()
    }
}

/// Always reports the same label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl Clock for FixedClock {
    fn now_label(&self) -> String {
        self.0.clone()
    }
}
