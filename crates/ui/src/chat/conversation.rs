use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};
use natter_state::Screen;

use crate::chat::events::{MessengerEvent, Submit};
use crate::chat::message_input::MessageInput;
use crate::chat::message_list::MessageList;
use crate::messenger::Messenger;

/// Title shown before any conversation has been opened.
pub const FALLBACK_TITLE: &str = "Chat";

/// The open conversation: header, message bubbles and composer.
pub struct ConversationView {
    messenger: Entity<Messenger>,
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
}

impl ConversationView {
    pub fn new(messenger: Entity<Messenger>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let message_list = cx.new(MessageList::new);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        cx.subscribe(&message_input, |this, _, event: &Submit, cx| {
            this.handle_submit(event, cx);
        })
        .detach();

        cx.subscribe(&messenger, |this, _, event: &MessengerEvent, cx| {
            this.handle_messenger_event(event, cx);
        })
        .detach();

        let this = Self {
            messenger,
            message_list,
            message_input,
        };
        this.sync_messages(true, cx);
        this
    }

    fn handle_submit(&mut self, event: &Submit, cx: &mut Context<Self>) {
        self.messenger
            .update(cx, |messenger, cx| messenger.send(&event.content, cx));
    }

    fn handle_messenger_event(&mut self, event: &MessengerEvent, cx: &mut Context<Self>) {
        match event {
            MessengerEvent::ConversationLoaded { .. } => self.sync_messages(true, cx),
            MessengerEvent::MessagesAppended => self.sync_messages(false, cx),
            // Every path out of a conversation goes back first, which discards the buffer.
            MessengerEvent::ScreenChanged(Screen::Chats) => self.sync_messages(true, cx),
            MessengerEvent::ScreenChanged(_)
            | MessengerEvent::ConversationsChanged
            | MessengerEvent::CreateDialogToggled { .. } => {}
        }
    }

    fn sync_messages(&self, reset_scroll: bool, cx: &mut Context<Self>) {
        let messages = self.messenger.read(cx).state().messages().to_vec();

        self.message_list.update(cx, |list, cx| {
            if reset_scroll {
                list.reset_scroll_tracking(cx);
            }
            list.set_messages(messages, cx);
        });
        cx.notify();
    }

    fn render_header(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let title = self
            .messenger
            .read(cx)
            .state()
            .active_conversation()
            .unwrap_or(FALLBACK_TITLE)
            .to_string();

        h_flex()
            .id("conversation-header")
            .w_full()
            .flex_shrink_0()
            .items_center()
            .gap_2()
            .px_2()
            .py_2()
            .bg(theme.primary)
            .child(
                Button::new("conversation-back")
                    .ghost()
                    .small()
                    .icon(IconName::ArrowLeft)
                    .text_color(theme.primary_foreground)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.messenger
                            .update(cx, |messenger, cx| messenger.go_back(cx));
                    })),
            )
            .child(
                div().flex_1().min_w_0().truncate().child(
                    Label::new(title)
                        .text_base()
                        .font_weight(FontWeight::BOLD)
                        .text_color(theme.primary_foreground),
                ),
            )
            .child(
                Button::new("conversation-call")
                    .ghost()
                    .small()
                    .child("Call")
                    .text_color(theme.primary_foreground)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.show_calls(cx);
                    })),
            )
            .child(
                Button::new("conversation-video")
                    .ghost()
                    .small()
                    .child("Video")
                    .text_color(theme.primary_foreground)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.show_calls(cx);
                    })),
            )
    }

    fn show_calls(&mut self, cx: &mut Context<Self>) {
        self.messenger.update(cx, |messenger, cx| {
            messenger.leave_conversation_for(Screen::Calls, cx)
        });
    }
}

impl Render for ConversationView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id("conversation-view")
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .child(self.render_header(cx))
            .child(
                div()
                    .id("conversation-message-list")
                    .flex_1()
                    .min_h_0()
                    .child(self.message_list.clone()),
            )
            .child(
                div()
                    .id("conversation-message-input")
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(self.message_input.clone()),
            )
    }
}
