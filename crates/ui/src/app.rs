use std::path::PathBuf;
use std::sync::Arc;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{
    ActiveTheme, Sizable,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};
use natter_state::{Placeholder, Screen};

use crate::chat::{ChatListView, ConversationView};
use crate::messenger::Messenger;
use crate::placeholder::PlaceholderView;
use crate::settings::SettingsStore;

/// Directory watched for theme presets, relative to the working directory.
pub fn default_themes_path() -> PathBuf {
    PathBuf::from("./themes")
}

/// Fixed window size in logical pixels.
pub const WINDOW_WIDTH: f32 = 400.0;
pub const WINDOW_HEIGHT: f32 = 700.0;

const TABS: [(Screen, &str); 3] = [
    (Screen::Chats, "Chats"),
    (Screen::Status, "Status"),
    (Screen::Calls, "Calls"),
];

gpui::actions!(shell, [NewChat, GoBack, Quit,]);

/// Whether the bottom tab bar is drawn on `screen`.
///
/// The conversation screen takes the full height and navigates with its back button.
pub fn shows_tab_bar(screen: Screen) -> bool {
    screen != Screen::ChatWindow
}

/// Root view that stacks the four screens and shows exactly one of them.
pub struct MessengerShell {
    messenger: Entity<Messenger>,
    chat_list: Entity<ChatListView>,
    conversation: Entity<ConversationView>,
    status: Entity<PlaceholderView>,
    calls: Entity<PlaceholderView>,
    focus_handle: FocusHandle,
}

impl MessengerShell {
    pub fn new(
        messenger: Entity<Messenger>,
        settings: Arc<SettingsStore>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let chat_list = cx.new(|cx| ChatListView::new(messenger.clone(), settings, window, cx));
        let conversation = cx.new(|cx| ConversationView::new(messenger.clone(), window, cx));
        let status = cx.new(|_| PlaceholderView::new(Placeholder::STATUS));
        let calls = cx.new(|_| PlaceholderView::new(Placeholder::CALLS));

        cx.observe(&messenger, |_, _, cx| cx.notify()).detach();

        Self {
            messenger,
            chat_list,
            conversation,
            status,
            calls,
            focus_handle: cx.focus_handle(),
        }
    }

    fn current_screen(&self, cx: &App) -> Screen {
        self.messenger
            .read(cx)
            .state()
            .current_screen()
            .unwrap_or(Screen::Chats)
    }

    fn show(&mut self, screen: Screen, cx: &mut Context<Self>) {
        self.messenger
            .update(cx, |messenger, cx| messenger.show(screen, cx));
    }

    /// Jumps to the chat list with the create dialog open.
    fn new_chat(&mut self, _: &NewChat, _window: &mut Window, cx: &mut Context<Self>) {
        self.messenger.update(cx, |messenger, cx| {
            if messenger.state().current_screen() == Some(Screen::ChatWindow) {
                messenger.go_back(cx);
            } else {
                messenger.show(Screen::Chats, cx);
            }
            messenger.open_create_dialog(cx);
        });
    }

    fn go_back(&mut self, _: &GoBack, _window: &mut Window, cx: &mut Context<Self>) {
        let screen = self.current_screen(cx);
        self.messenger.update(cx, |messenger, cx| match screen {
            Screen::ChatWindow => messenger.go_back(cx),
            Screen::Chats if messenger.state().chat_list().is_create_dialog_open() => {
                messenger.close_create_dialog(cx)
            }
            Screen::Chats | Screen::Status | Screen::Calls => {}
        });
    }

    fn render_screen(&self, screen: Screen) -> AnyElement {
        match screen {
            Screen::Chats => self.chat_list.clone().into_any_element(),
            Screen::ChatWindow => self.conversation.clone().into_any_element(),
            Screen::Status => self.status.clone().into_any_element(),
            Screen::Calls => self.calls.clone().into_any_element(),
        }
    }

    fn render_tab_bar(&self, current: Screen, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .id("tab-bar")
            .w_full()
            .flex_shrink_0()
            .items_center()
            .justify_around()
            .py_1()
            .border_t_1()
            .border_color(theme.border)
            .bg(theme.background)
            .children(TABS.into_iter().map(|(screen, label)| {
                Button::new(screen.name())
                    .small()
                    .child(label)
                    .when(screen == current, |button| button.primary())
                    .when(screen != current, |button| button.ghost())
                    .on_click(cx.listener(move |this, _, _window, cx| {
                        this.show(screen, cx);
                    }))
            }))
    }
}

impl Render for MessengerShell {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let screen = self.current_screen(cx);

        // Clicking anywhere focuses the shell so its actions are reachable.
        v_flex()
            .id("messenger-shell")
            .key_context("MessengerShell")
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::new_chat))
            .on_action(cx.listener(Self::go_back))
            .size_full()
            .bg(theme.background)
            .child(
                div()
                    .id("screen-host")
                    .flex_1()
                    .min_h_0()
                    .overflow_hidden()
                    .child(self.render_screen(screen)),
            )
            .when(shows_tab_bar(screen), |el| {
                el.child(self.render_tab_bar(screen, cx))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_path_is_relative_to_working_directory() {
        assert_eq!(default_themes_path(), PathBuf::from("./themes"));
    }

    #[test]
    fn tab_bar_is_hidden_only_in_a_conversation() {
        assert!(shows_tab_bar(Screen::Chats));
        assert!(shows_tab_bar(Screen::Status));
        assert!(shows_tab_bar(Screen::Calls));
        assert!(!shows_tab_bar(Screen::ChatWindow));
    }

    #[test]
    fn every_tab_targets_a_registered_screen() {
        let navigation = natter_state::NavigationHost::with_default_screens();
        for (screen, _) in TABS {
            assert!(navigation.is_registered(screen));
        }
    }
}
