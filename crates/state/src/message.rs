use std::fmt;

use crate::ids::MessageId;

pub const YOU: &str = "You";
pub const SYSTEM: &str = "System";

/// Who authored a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sender {
    You,
    System,
    Contact(String),
}

impl Sender {
    /// Maps a display label back into a sender, treating the reserved labels specially.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        match label.as_str() {
            YOU => Self::You,
            SYSTEM => Self::System,
            _ => Self::Contact(label),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::You => YOU,
            Self::System => SYSTEM,
            Self::Contact(name) => name,
        }
    }

    pub fn is_you(&self) -> bool {
        matches!(self, Self::You)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Horizontal placement of a bubble inside the message column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub body: String,
    pub display_time: String,
}

impl Message {
    pub fn new(
        id: MessageId,
        sender: Sender,
        body: impl Into<String>,
        display_time: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender,
            body: body.into(),
            display_time: display_time.into(),
        }
    }

    pub fn alignment(&self) -> BubbleAlignment {
        if self.sender.is_you() {
            BubbleAlignment::Right
        } else {
            BubbleAlignment::Left
        }
    }

    /// Caption drawn above the body. Only left-aligned bubbles carry one.
    pub fn caption(&self) -> Option<&str> {
        match self.alignment() {
            BubbleAlignment::Left => Some(self.sender.label()),
            BubbleAlignment::Right => None,
        }
    }

    /// `(sender, body, time)` view used by tests and logs.
    pub fn as_triple(&self) -> (&str, &str, &str) {
        (self.sender.label(), &self.body, &self.display_time)
    }
}
