use std::rc::Rc;
use std::sync::Arc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable, VirtualListScrollHandle,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    label::Label,
    list::ListItem,
    v_flex, v_virtual_list,
};
use natter_state::{ChatList, ConversationSummary, CreateOutcome};

use crate::chat::events::MessengerEvent;
use crate::messenger::Messenger;
use crate::settings::SettingsStore;

const CONVERSATION_ROW_HEIGHT: f32 = 64.0;
const AVATAR_SIZE: f32 = 40.0;
const DIALOG_WIDTH: f32 = 320.0;
pub const CHAT_LIST_TITLE: &str = "Chats";

/// The conversation list screen: header, rows, "New Chat" and the create dialog.
pub struct ChatListView {
    messenger: Entity<Messenger>,
    settings: Arc<SettingsStore>,
    search_input: Entity<InputState>,
    search_visible: bool,
    search_query: String,
    name_input: Entity<InputState>,
    phone_input: Entity<InputState>,
    rows: Vec<ConversationSummary>,
    item_sizes: Rc<Vec<Size<Pixels>>>,
    scroll_handle: VirtualListScrollHandle,
}

impl ChatListView {
    pub fn new(
        messenger: Entity<Messenger>,
        settings: Arc<SettingsStore>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let search_input = cx.new(|cx| InputState::new(window, cx).placeholder("Search chats"));
        let name_input = cx.new(|cx| InputState::new(window, cx).placeholder("Contact name"));
        let phone_input = cx.new(|cx| InputState::new(window, cx).placeholder("Phone number"));

        cx.subscribe_in(
            &search_input,
            window,
            |this, _, _event: &InputEvent, _window, cx| {
                this.search_query = this.search_input.read(cx).value().to_string();
                this.rebuild_rows(cx);
            },
        )
        .detach();

        cx.subscribe_in(
            &name_input,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if let InputEvent::PressEnter { .. } = event {
                    this.submit_create_dialog(window, cx);
                }
            },
        )
        .detach();

        cx.subscribe(&messenger, |this, _, event: &MessengerEvent, cx| match event {
            MessengerEvent::ConversationsChanged => this.rebuild_rows(cx),
            MessengerEvent::CreateDialogToggled { .. } => cx.notify(),
            _ => {}
        })
        .detach();

        let mut view = Self {
            messenger,
            settings,
            search_input,
            search_visible: false,
            search_query: String::new(),
            name_input,
            phone_input,
            rows: Vec::new(),
            item_sizes: Rc::new(Vec::new()),
            scroll_handle: VirtualListScrollHandle::new(),
        };
        view.rebuild_rows(cx);
        view
    }

    fn rebuild_rows(&mut self, cx: &mut Context<Self>) {
        let query = self.search_visible.then_some(self.search_query.as_str());
        self.rows = visible_rows(self.messenger.read(cx).state().chat_list(), query);
        self.item_sizes = Rc::new(
            self.rows
                .iter()
                .map(|_| size(px(0.), px(CONVERSATION_ROW_HEIGHT)))
                .collect(),
        );
        cx.notify();
    }

    fn toggle_search(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.search_visible = !self.search_visible;
        if !self.search_visible {
            self.search_query.clear();
            self.search_input.update(cx, |state, cx| {
                state.set_value("", window, cx);
            });
        }
        self.rebuild_rows(cx);
    }

    fn toggle_theme(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let mode = self.settings.toggle_theme_mode();
        self.settings.settings().apply_theme(Some(window), cx);
        tracing::debug!(dark = mode.is_dark(), "theme mode toggled");
        cx.notify();
    }

    fn open_conversation(&mut self, name: String, cx: &mut Context<Self>) {
        self.messenger
            .update(cx, |messenger, cx| messenger.open(&name, cx));
    }

    fn open_create_dialog(&mut self, cx: &mut Context<Self>) {
        self.messenger
            .update(cx, |messenger, cx| messenger.open_create_dialog(cx));
    }

    fn cancel_create_dialog(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.clear_dialog_inputs(window, cx);
        self.messenger
            .update(cx, |messenger, cx| messenger.close_create_dialog(cx));
    }

    fn submit_create_dialog(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        // The phone number is collected for parity with the form but not stored.
        let name = self.name_input.read(cx).value().to_string();
        let outcome = self
            .messenger
            .update(cx, |messenger, cx| messenger.create_conversation(&name, cx));

        // Rejected names keep the dialog open with its text intact.
        if let CreateOutcome::Created(_) = outcome {
            self.clear_dialog_inputs(window, cx);
        }
    }

    fn clear_dialog_inputs(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        for input in [&self.name_input, &self.phone_input] {
            input.update(cx, |state, cx| {
                state.set_value("", window, cx);
            });
        }
    }

    fn render_header(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .w_full()
            .flex_shrink_0()
            .bg(theme.primary)
            .child(
                h_flex()
                    .w_full()
                    .items_center()
                    .justify_between()
                    .px_4()
                    .py_3()
                    .child(
                        Label::new(CHAT_LIST_TITLE)
                            .text_lg()
                            .font_weight(FontWeight::BOLD)
                            .text_color(theme.primary_foreground),
                    )
                    .child(
                        h_flex()
                            .gap_1()
                            .child(
                                Button::new("chat-list-search")
                                    .ghost()
                                    .small()
                                    .icon(IconName::Search)
                                    .text_color(theme.primary_foreground)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.toggle_search(window, cx);
                                    })),
                            )
                            .child(
                                Button::new("chat-list-menu")
                                    .ghost()
                                    .small()
                                    .icon(IconName::Ellipsis)
                                    .text_color(theme.primary_foreground)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.toggle_theme(window, cx);
                                    })),
                            ),
                    ),
            )
            .when(self.search_visible, |header| {
                header.child(
                    div()
                        .px_3()
                        .pb_2()
                        .child(Input::new(&self.search_input).w_full().small()),
                )
            })
    }

    fn render_empty_state(&mut self, cx: &mut Context<Self>) -> AnyElement {
        let theme = cx.theme();

        v_flex()
            .flex_1()
            .items_center()
            .justify_center()
            .px_4()
            .child(
                Label::new("No chats match your search")
                    .text_sm()
                    .text_color(theme.foreground.opacity(0.55)),
            )
            .into_any_element()
    }

    fn render_rows(&mut self, cx: &mut Context<Self>) -> AnyElement {
        if self.rows.is_empty() {
            return self.render_empty_state(cx);
        }

        let rows = self.rows.clone();

        v_flex()
            .flex_1()
            .min_h_0()
            .child(
                v_virtual_list(
                    cx.entity().clone(),
                    "conversation-list",
                    self.item_sizes.clone(),
                    move |_this, visible_range, _window, cx| {
                        visible_range
                            .filter_map(|index| {
                                rows.get(index)
                                    .map(|summary| render_row(index, summary, cx))
                            })
                            .collect::<Vec<_>>()
                    },
                )
                .w_full()
                .flex_1()
                .track_scroll(&self.scroll_handle),
            )
            .into_any_element()
    }

    fn render_footer(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        h_flex()
            .w_full()
            .flex_shrink_0()
            .justify_end()
            .px_4()
            .py_2()
            .child(
                Button::new("new-chat")
                    .primary()
                    .icon(IconName::Plus)
                    .child("New Chat")
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.open_create_dialog(cx);
                    })),
            )
    }

    fn render_create_dialog(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .id("create-dialog-backdrop")
            .absolute()
            .top_0()
            .left_0()
            .right_0()
            .bottom_0()
            .flex()
            .items_center()
            .justify_center()
            .bg(theme.background.opacity(0.6))
            .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
            .child(
                v_flex()
                    .id("create-dialog")
                    .w(px(DIALOG_WIDTH))
                    .gap_3()
                    .p_4()
                    .rounded_lg()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .shadow_lg()
                    .child(
                        Label::new("New Chat")
                            .text_base()
                            .font_weight(FontWeight::BOLD),
                    )
                    .child(Input::new(&self.name_input).w_full())
                    .child(Input::new(&self.phone_input).w_full())
                    .child(
                        h_flex()
                            .w_full()
                            .justify_end()
                            .gap_2()
                            .child(
                                Button::new("create-dialog-cancel")
                                    .ghost()
                                    .child("Cancel")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.cancel_create_dialog(window, cx);
                                    })),
                            )
                            .child(
                                Button::new("create-dialog-create")
                                    .primary()
                                    .child("Create")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.submit_create_dialog(window, cx);
                                    })),
                            ),
                    ),
            )
    }
}

impl Render for ChatListView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let dialog_open = self
            .messenger
            .read(cx)
            .state()
            .chat_list()
            .is_create_dialog_open();

        div()
            .size_full()
            .relative()
            .bg(theme.background)
            .child(
                v_flex()
                    .size_full()
                    .min_h_0()
                    .overflow_hidden()
                    .child(self.render_header(cx))
                    .child(self.render_rows(cx))
                    .child(self.render_footer(cx)),
            )
            .when(dialog_open, |el| el.child(self.render_create_dialog(cx)))
    }
}

fn render_row(index: usize, summary: &ConversationSummary, cx: &Context<ChatListView>) -> AnyElement {
    let theme = cx.theme();
    let name = summary.name.clone();

    div()
        .w_full()
        .h(px(CONVERSATION_ROW_HEIGHT))
        .px_2()
        .child(
            ListItem::new(("conversation", index))
                .w_full()
                .h_full()
                .px_2()
                .py_2()
                .rounded_md()
                .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                    this.open_conversation(name.clone(), cx);
                }))
                .child(
                    h_flex()
                        .w_full()
                        .gap_3()
                        .items_center()
                        .child(
                            div()
                                .size(px(AVATAR_SIZE))
                                .flex_shrink_0()
                                .rounded_full()
                                .bg(theme.muted)
                                .flex()
                                .items_center()
                                .justify_center()
                                .child(
                                    Label::new(summary.initial())
                                        .font_weight(FontWeight::BOLD)
                                        .text_color(theme.foreground),
                                ),
                        )
                        .child(
                            v_flex()
                                .flex_1()
                                .min_w_0()
                                .child(
                                    div().truncate().child(
                                        Label::new(summary.name.clone())
                                            .text_sm()
                                            .font_weight(FontWeight::SEMIBOLD),
                                    ),
                                )
                                .child(
                                    div().truncate().child(
                                        Label::new(summary.last_message.clone())
                                            .text_xs()
                                            .text_color(theme.muted_foreground),
                                    ),
                                ),
                        )
                        .child(
                            v_flex()
                                .flex_shrink_0()
                                .items_end()
                                .gap_1()
                                .child(
                                    Label::new(summary.display_time.clone())
                                        .text_xs()
                                        .text_color(theme.muted_foreground),
                                )
                                .when_some(summary.unread_badge(), |col, unread| {
                                    col.child(
                                        div()
                                            .px_2()
                                            .rounded_full()
                                            .bg(theme.primary)
                                            .text_xs()
                                            .text_color(theme.primary_foreground)
                                            .child(unread.to_string()),
                                    )
                                }),
                        ),
                ),
        )
        .into_any_element()
}

/// Rows to draw for the current search state. `None` means search is closed.
fn visible_rows(chat_list: &ChatList, query: Option<&str>) -> Vec<ConversationSummary> {
    match query {
        Some(query) => chat_list.filtered(query).into_iter().cloned().collect(),
        None => chat_list.conversations().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(rows: &[ConversationSummary]) -> Vec<&str> {
        rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn closed_search_shows_every_row_in_order() {
        let list = ChatList::seeded();
        let rows = visible_rows(&list, None);

        assert_eq!(rows.len(), list.len());
        assert_eq!(names(&rows)[0], "Maths Group");
    }

    #[test]
    fn open_search_filters_without_reordering() {
        let list = ChatList::seeded();

        assert_eq!(names(&visible_rows(&list, Some("AMIT"))), vec!["Amit"]);
        assert_eq!(visible_rows(&list, Some("")).len(), list.len());
        assert!(visible_rows(&list, Some("zzz")).is_empty());
    }
}
