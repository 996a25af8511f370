#![deny(unsafe_code)]

//! In-memory state and view-model layer for the natter messenger mock-up.
//!
//! Nothing here depends on a UI toolkit, so the whole chat flow can be driven
//! from plain tests.

pub mod chat_list;
pub mod clock;
pub mod error;
pub mod ids;
pub mod message;
pub mod messenger;
pub mod navigation;
pub mod placeholder;
pub mod reply;
pub mod script;
pub mod session;

pub use chat_list::{ChatList, ConversationSummary, CreateOutcome, NEW_CHAT_PREVIEW};
pub use clock::{Clock, FixedClock, LocalClock, NOW_LABEL};
pub use error::{StateError, StateResult};
pub use ids::{MessageId, ReplyTicket};
pub use message::{BubbleAlignment, Message, Sender};
pub use messenger::{MessengerState, SessionConfig};
pub use navigation::{NavigationHost, Screen};
pub use placeholder::Placeholder;
pub use reply::{
    DEFAULT_AUTO_REPLY_DELAY, PendingReply, ReplyPicker, ReplyRouting, RngPicker, SequencePicker,
};
pub use script::{FRIEND, ScriptBook, ScriptedMessage};
pub use session::{ConversationSession, ReplyDelivery};
