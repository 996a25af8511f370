/// Chat list screen with search, theme toggle and the create dialog.
pub mod chat_list;
pub mod conversation;
/// Events shared between the messenger model and its views.
pub mod events;
pub mod message_input;
pub mod message_list;
pub mod scroll_manager;

pub use chat_list::ChatListView;
pub use conversation::ConversationView;
pub use events::{MessengerEvent, Submit};
pub use message_input::MessageInput;
pub use message_list::MessageList;
pub use scroll_manager::ScrollManager;
