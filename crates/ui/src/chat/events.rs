use natter_state::Screen;

/// Emitted by `Messenger` after a state mutation views may care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessengerEvent {
    ScreenChanged(Screen),
    /// A conversation summary was inserted.
    ConversationsChanged,
    /// The conversation screen was (re)seeded for `name`.
    ConversationLoaded { name: String },
    /// A sent message or an auto-reply was appended.
    MessagesAppended,
    CreateDialogToggled { open: bool },
}

/// Emitted when the user submits non-blank text from the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub content: String,
}

impl Submit {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

