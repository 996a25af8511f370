use std::collections::HashMap;

use gpui::*;
use natter_state::{
    CreateOutcome, MessengerState, PendingReply, ReplyDelivery, ReplyTicket, Screen,
    SessionConfig, StateResult,
};

use crate::chat::events::MessengerEvent;

/// Shared model entity owning `MessengerState` and the reply timers.
///
/// Views read state through `state()` and mutate only through the methods
/// here, which notify observers and emit `MessengerEvent`s.
pub struct Messenger {
    state: MessengerState,
    reply_tasks: HashMap<ReplyTicket, Task<()>>,
}

impl EventEmitter<MessengerEvent> for Messenger {}

impl Messenger {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_state(MessengerState::new(config))
    }

    pub fn with_state(state: MessengerState) -> Self {
        Self {
            state,
            reply_tasks: HashMap::new(),
        }
    }

    pub fn state(&self) -> &MessengerState {
        &self.state
    }

    pub fn pending_reply_count(&self) -> usize {
        self.reply_tasks.len()
    }

    pub fn show(&mut self, screen: Screen, cx: &mut Context<Self>) {
        let result = self.state.show(screen);
        self.finish_navigation(result, cx);
    }

    pub fn open(&mut self, name: &str, cx: &mut Context<Self>) {
        let cancelled = self.state.open(name);
        let cancelled = self.finish_navigation(cancelled, cx);
        self.drop_reply_tasks(cancelled.unwrap_or_default());

        cx.emit(MessengerEvent::ConversationLoaded {
            name: name.to_string(),
        });
        cx.notify();
    }

    pub fn go_back(&mut self, cx: &mut Context<Self>) {
        let cancelled = self.state.go_back();
        let cancelled = self.finish_navigation(cancelled, cx);
        self.drop_reply_tasks(cancelled.unwrap_or_default());
        cx.notify();
    }

    /// Closes the open conversation, then shows `screen`.
    pub fn leave_conversation_for(&mut self, screen: Screen, cx: &mut Context<Self>) {
        self.go_back(cx);
        self.show(screen, cx);
    }

    pub fn open_create_dialog(&mut self, cx: &mut Context<Self>) {
        self.state.open_create_dialog();
        cx.emit(MessengerEvent::CreateDialogToggled { open: true });
        cx.notify();
    }

    pub fn close_create_dialog(&mut self, cx: &mut Context<Self>) {
        self.state.close_create_dialog();
        cx.emit(MessengerEvent::CreateDialogToggled { open: false });
        cx.notify();
    }

    pub fn create_conversation(&mut self, name: &str, cx: &mut Context<Self>) -> CreateOutcome {
        let outcome = self.state.create_conversation(name);
        if outcome.is_created() {
            cx.emit(MessengerEvent::ConversationsChanged);
            cx.emit(MessengerEvent::CreateDialogToggled { open: false });
            cx.notify();
        }
        outcome
    }

    /// Appends the user's message and arms its auto-reply timer.
    pub fn send(&mut self, text: &str, cx: &mut Context<Self>) -> bool {
        let Some(pending) = self.state.send(text) else {
            return false;
        };

        cx.emit(MessengerEvent::MessagesAppended);
        self.schedule_reply(pending, cx);
        cx.notify();
        true
    }

    fn schedule_reply(&mut self, pending: PendingReply, cx: &mut Context<Self>) {
        let ticket = pending.ticket;
        let delay = pending.delay;

        // The task is the timer handle: removing it from the map cancels the reply.
        let task = cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;

            let _ = this.update(cx, |this, cx| {
                this.reply_tasks.remove(&ticket);
                this.deliver_reply(ticket, cx);
            });
        });
        self.reply_tasks.insert(ticket, task);
    }

    fn deliver_reply(&mut self, ticket: ReplyTicket, cx: &mut Context<Self>) {
        match self.state.deliver_auto_reply(ticket) {
            ReplyDelivery::Delivered(_) => {
                cx.emit(MessengerEvent::MessagesAppended);
                cx.notify();
            }
            ReplyDelivery::UnknownTicket
            | ReplyDelivery::NoActiveConversation
            | ReplyDelivery::Stale { .. } => {}
        }
    }

    fn drop_reply_tasks(&mut self, tickets: Vec<ReplyTicket>) {
        for ticket in tickets {
            if self.reply_tasks.remove(&ticket).is_some() {
                tracing::debug!(%ticket, "pending auto-reply cancelled");
            }
        }
    }

    fn finish_navigation<T>(&mut self, result: StateResult<T>, cx: &mut Context<Self>) -> Option<T> {
        match result {
            Ok(value) => {
                if let Some(screen) = self.state.current_screen() {
                    cx.emit(MessengerEvent::ScreenChanged(screen));
                }
                cx.notify();
                Some(value)
            }
            Err(error) => {
                tracing::error!("navigation failed: {error}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use natter_state::{FixedClock, ReplyRouting, SequencePicker};

    use super::*;

    fn messenger(routing: ReplyRouting) -> Messenger {
        Messenger::with_state(
            MessengerState::new(SessionConfig {
                routing,
                reply_delay: Duration::from_millis(50),
            })
            .with_clock(FixedClock::new("09:00 AM"))
            .with_picker(SequencePicker::new([0])),
        )
    }

    #[gpui::test]
    async fn reply_arrives_after_delay(cx: &mut TestAppContext) {
        let entity = cx.new(|_| messenger(ReplyRouting::ActiveConversation));

        entity.update(cx, |messenger, cx| {
            messenger.open("Amit", cx);
            assert!(messenger.send("hello", cx));
            assert_eq!(messenger.pending_reply_count(), 1);
        });

        cx.executor().advance_clock(Duration::from_millis(60));
        cx.run_until_parked();

        entity.read_with(cx, |messenger, _| {
            let messages = messenger.state().messages();
            assert_eq!(messages.len(), 4);
            assert_eq!(messages[3].as_triple(), ("Amit", "Theek hai", "09:00 AM"));
            assert_eq!(messenger.pending_reply_count(), 0);
        });
    }

    #[gpui::test]
    async fn reply_waits_for_the_full_delay(cx: &mut TestAppContext) {
        let entity = cx.new(|_| messenger(ReplyRouting::ActiveConversation));

        entity.update(cx, |messenger, cx| {
            messenger.open("Amit", cx);
            messenger.send("hello", cx);
        });

        cx.executor().advance_clock(Duration::from_millis(49));
        cx.run_until_parked();

        entity.read_with(cx, |messenger, _| {
            assert_eq!(messenger.state().messages().len(), 3);
            assert_eq!(messenger.pending_reply_count(), 1);
        });

        cx.executor().advance_clock(Duration::from_millis(2));
        cx.run_until_parked();

        entity.read_with(cx, |messenger, _| {
            assert_eq!(messenger.state().messages().len(), 4);
            assert_eq!(messenger.pending_reply_count(), 0);
        });
    }

    #[gpui::test]
    async fn leaving_for_calls_closes_the_conversation(cx: &mut TestAppContext) {
        let entity = cx.new(|_| messenger(ReplyRouting::OriginatingConversation));

        entity.update(cx, |messenger, cx| {
            messenger.open("Amit", cx);
            messenger.send("hello", cx);
            messenger.leave_conversation_for(Screen::Calls, cx);

            assert_eq!(messenger.state().current_screen(), Some(Screen::Calls));
            assert_eq!(messenger.state().active_conversation(), None);
            assert_eq!(messenger.pending_reply_count(), 0);

            messenger.show(Screen::Chats, cx);
            assert!(messenger.state().messages().is_empty());
        });
    }

    #[gpui::test]
    async fn blank_send_schedules_nothing(cx: &mut TestAppContext) {
        let entity = cx.new(|_| messenger(ReplyRouting::ActiveConversation));

        entity.update(cx, |messenger, cx| {
            messenger.open("Neha", cx);
            assert!(!messenger.send("   ", cx));
            assert_eq!(messenger.pending_reply_count(), 0);
            assert_eq!(messenger.state().messages().len(), 1);
        });
    }

    #[gpui::test]
    async fn originating_routing_cancels_timer_on_back(cx: &mut TestAppContext) {
        let entity = cx.new(|_| messenger(ReplyRouting::OriginatingConversation));

        entity.update(cx, |messenger, cx| {
            messenger.open("Amit", cx);
            messenger.send("hello", cx);
            messenger.go_back(cx);
            assert_eq!(messenger.pending_reply_count(), 0);
            assert_eq!(messenger.state().current_screen(), Some(Screen::Chats));
        });

        cx.executor().advance_clock(Duration::from_millis(60));
        cx.run_until_parked();

        entity.read_with(cx, |messenger, _| {
            assert!(messenger.state().messages().is_empty());
        });
    }
}
