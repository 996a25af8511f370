use std::time::Duration;

use crate::clock::{Clock, NOW_LABEL};
use crate::ids::{Counter, MessageId, ReplyTicket};
use crate::message::{Message, Sender};
use crate::reply::{DEFAULT_AUTO_REPLY_DELAY, PendingReply, ReplyPicker, ReplyRouting};
use crate::script::ScriptBook;

/// Outcome of a fired auto-reply timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyDelivery {
    Delivered(MessageId),
    /// The ticket was cancelled or already delivered.
    UnknownTicket,
    /// Nothing is open to receive the reply.
    NoActiveConversation,
    /// Originating routing is on and the user moved to another conversation.
    Stale { origin: String },
}

/// The conversation screen's state machine.
///
/// `Unloaded` while `active` is `None`, `Loaded` otherwise. Messages only ever
/// belong to the currently loaded conversation; leaving it discards them.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    active: Option<String>,
    messages: Vec<Message>,
    pending: Vec<PendingReply>,
    message_ids: Counter,
    reply_tickets: Counter,
    routing: ReplyRouting,
    reply_delay: Duration,
}

impl ConversationSession {
    pub fn new(routing: ReplyRouting, reply_delay: Duration) -> Self {
        Self {
            active: None,
            messages: Vec::new(),
            pending: Vec::new(),
            message_ids: Counter::new(),
            reply_tickets: Counter::new(),
            routing,
            reply_delay,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending_replies(&self) -> &[PendingReply] {
        &self.pending
    }

    pub fn routing(&self) -> ReplyRouting {
        self.routing
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Loads `name`, replacing whatever was rendered before.
    ///
    /// Returns tickets cancelled by the switch; only originating routing cancels.
    pub fn set_chat(&mut self, name: &str, book: &ScriptBook) -> Vec<ReplyTicket> {
        let cancelled = self.cancel_pending_if_originating();

        self.active = Some(name.to_string());
        self.messages.clear();

        match book.script(name) {
            Some(script) => {
                for line in script {
                    self.push(
                        Sender::from_label(line.sender),
                        line.body,
                        line.display_time,
                    );
                }
            }
            None => {
                self.push(Sender::System, format!("Started chat with {name}"), NOW_LABEL);
            }
        }

        tracing::debug!(
            conversation = name,
            seeded = self.messages.len(),
            "conversation loaded"
        );
        cancelled
    }

    /// Returns to the unloaded state, discarding the rendered messages.
    pub fn go_back(&mut self) -> Vec<ReplyTicket> {
        let cancelled = self.cancel_pending_if_originating();
        if let Some(name) = self.active.take() {
            tracing::debug!(conversation = %name, "conversation closed");
        }
        self.messages.clear();
        cancelled
    }

    /// Appends the user's message and schedules a reply.
    ///
    /// Blank input and the unloaded state are silent no-ops.
    pub fn send(&mut self, text: &str, clock: &dyn Clock) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let origin = self.active.clone()?;

        let original_time = clock.now_label();
        self.push(Sender::You, text, original_time.clone());

        let pending = PendingReply {
            ticket: ReplyTicket::new(self.reply_tickets.bump()),
            origin,
            original_text: text.to_string(),
            original_time,
            delay: self.reply_delay,
        };
        self.pending.push(pending.clone());

        tracing::debug!(
            ticket = %pending.ticket,
            conversation = %pending.origin,
            delay_ms = pending.delay.as_millis() as u64,
            "auto-reply scheduled"
        );
        Some(pending)
    }

    /// Fires the reply for `ticket` against the conversation open right now.
    pub fn deliver_auto_reply(
        &mut self,
        ticket: ReplyTicket,
        book: &ScriptBook,
        picker: &mut dyn ReplyPicker,
        clock: &dyn Clock,
    ) -> ReplyDelivery {
        let Some(position) = self.pending.iter().position(|p| p.ticket == ticket) else {
            return ReplyDelivery::UnknownTicket;
        };
        let pending = self.pending.remove(position);

        let Some(active) = self.active.clone() else {
            tracing::debug!(%ticket, "no conversation open; reply dropped");
            return ReplyDelivery::NoActiveConversation;
        };

        if self.routing == ReplyRouting::OriginatingConversation && active != pending.origin {
            tracing::debug!(%ticket, origin = %pending.origin, "stale reply dropped");
            return ReplyDelivery::Stale {
                origin: pending.origin,
            };
        }

        let pool = book.reply_pool(&active);
        let body = pool.get(picker.pick(pool.len())).copied().unwrap_or_default();
        let sender = Sender::from_label(book.reply_sender(&active));
        let id = self.push(sender, body, clock.now_label());

        tracing::debug!(
            %ticket,
            conversation = %active,
            replying_to = %pending.original_text,
            sent_at = %pending.original_time,
            "auto-reply delivered"
        );
        ReplyDelivery::Delivered(id)
    }

    fn cancel_pending_if_originating(&mut self) -> Vec<ReplyTicket> {
        if self.routing != ReplyRouting::OriginatingConversation {
            return Vec::new();
        }

        self.pending.drain(..).map(|pending| pending.ticket).collect()
    }

    fn push(
        &mut self,
        sender: Sender,
        body: impl Into<String>,
        display_time: impl Into<String>,
    ) -> MessageId {
        let id = MessageId::new(self.message_ids.bump());
        self.messages
            .push(Message::new(id, sender, body, display_time));
        id
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new(ReplyRouting::default(), DEFAULT_AUTO_REPLY_DELAY)
    }
}
