use std::time::Duration;

use crate::chat_list::{ChatList, CreateOutcome};
use crate::clock::{Clock, LocalClock};
use crate::error::StateResult;
use crate::ids::ReplyTicket;
use crate::message::Message;
use crate::navigation::{NavigationHost, Screen};
use crate::reply::{
    DEFAULT_AUTO_REPLY_DELAY, PendingReply, ReplyPicker, ReplyRouting, RngPicker,
};
use crate::session::{ConversationSession, ReplyDelivery};
use crate::script::ScriptBook;

/// Tunables for the conversation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub routing: ReplyRouting,
    pub reply_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            routing: ReplyRouting::default(),
            reply_delay: DEFAULT_AUTO_REPLY_DELAY,
        }
    }
}

/// All mutable messenger state: navigation, chat list and the open conversation.
///
/// Rendering code borrows this; nothing lives in statics.
pub struct MessengerState {
    navigation: NavigationHost,
    chat_list: ChatList,
    session: ConversationSession,
    scripts: ScriptBook,
    picker: Box<dyn ReplyPicker>,
    clock: Box<dyn Clock>,
}

impl MessengerState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            navigation: NavigationHost::with_default_screens(),
            chat_list: ChatList::seeded(),
            session: ConversationSession::new(config.routing, config.reply_delay),
            scripts: ScriptBook::default(),
            picker: Box::new(RngPicker::thread()),
            clock: Box::new(LocalClock),
        }
    }

    pub fn with_picker(mut self, picker: impl ReplyPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_scripts(mut self, scripts: ScriptBook) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn navigation(&self) -> &NavigationHost {
        &self.navigation
    }

    pub fn current_screen(&self) -> Option<Screen> {
        self.navigation.current()
    }

    pub fn chat_list(&self) -> &ChatList {
        &self.chat_list
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn active_conversation(&self) -> Option<&str> {
        self.session.active()
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn scripts(&self) -> &ScriptBook {
        &self.scripts
    }

    pub fn show(&mut self, screen: Screen) -> StateResult<()> {
        self.navigation.show(screen)
    }

    /// Loads `name` into the conversation screen and makes it visible.
    ///
    /// Returns tickets whose timers the caller should drop.
    pub fn open(&mut self, name: &str) -> StateResult<Vec<ReplyTicket>> {
        let cancelled = self.session.set_chat(name, &self.scripts);
        self.navigation.show(Screen::ChatWindow)?;
        Ok(cancelled)
    }

    /// Leaves the conversation screen for the chat list.
    pub fn go_back(&mut self) -> StateResult<Vec<ReplyTicket>> {
        let cancelled = self.session.go_back();
        self.navigation.show(Screen::Chats)?;
        Ok(cancelled)
    }

    pub fn open_create_dialog(&mut self) {
        self.chat_list.open_create_dialog();
    }

    pub fn close_create_dialog(&mut self) {
        self.chat_list.close_create_dialog();
    }

    pub fn create_conversation(&mut self, name: &str) -> CreateOutcome {
        self.chat_list.create_conversation(name)
    }

    pub fn send(&mut self, text: &str) -> Option<PendingReply> {
        self.session.send(text, self.clock.as_ref())
    }

    pub fn deliver_auto_reply(&mut self, ticket: ReplyTicket) -> ReplyDelivery {
        self.session.deliver_auto_reply(
            ticket,
            &self.scripts,
            self.picker.as_mut(),
            self.clock.as_ref(),
        )
    }
}

impl Default for MessengerState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
