use gpui::*;
use gpui_component::{ActiveTheme, h_flex, label::Label, v_flex};
use natter_state::Placeholder;

/// Static "coming soon" panel for the Status and Calls tabs.
pub struct PlaceholderView {
    placeholder: Placeholder,
}

impl PlaceholderView {
    pub fn new(placeholder: Placeholder) -> Self {
        Self { placeholder }
    }
}

impl Render for PlaceholderView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .size_full()
            .bg(theme.background)
            .child(
                h_flex()
                    .w_full()
                    .flex_shrink_0()
                    .px_4()
                    .py_3()
                    .bg(theme.primary)
                    .child(
                        Label::new(self.placeholder.title)
                            .text_lg()
                            .font_weight(FontWeight::BOLD)
                            .text_color(theme.primary_foreground),
                    ),
            )
            .child(
                v_flex()
                    .flex_1()
                    .items_center()
                    .justify_center()
                    .px_6()
                    .child(
                        Label::new(self.placeholder.body())
                            .text_sm()
                            .text_color(theme.muted_foreground),
                    ),
            )
    }
}
