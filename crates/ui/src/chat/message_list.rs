use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::Hasher;
use std::ops::Range;
use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme, label::Label, v_flex, v_virtual_list};
use natter_state::{BubbleAlignment, Message, MessageId};

use crate::chat::scroll_manager::{SETTLE_RESCROLL_DELAY, ScrollManager};

const DEFAULT_CONTENT_WIDTH: Pixels = px(368.);
const LIST_HORIZONTAL_PADDING: Pixels = px(16.);
const CONTENT_WIDTH_CHANGE_EPSILON: f32 = 1.0;
/// Bubbles take at most this share of the column, leaving the rest as gutter.
const BUBBLE_WIDTH_RATIO: f32 = 0.7;
const BUBBLE_PADDING_X: Pixels = px(10.);
const BUBBLE_PADDING_Y: Pixels = px(6.);
const CAPTION_HEIGHT: Pixels = px(16.);
const TIME_HEIGHT: Pixels = px(14.);
const ESTIMATED_TEXT_LINE_HEIGHT: Pixels = px(18.);
const ESTIMATED_CHAR_WIDTH: f32 = 7.0;

struct SizeCacheEntry {
    layout_hash: u64,
    height: Pixels,
    measured: bool,
}

/// Virtualized column of chat bubbles for the open conversation.
pub struct MessageList {
    messages: Vec<Message>,
    item_sizes: Rc<Vec<Size<Pixels>>>,
    scroll_manager: ScrollManager,
    size_cache: HashMap<MessageId, SizeCacheEntry>,
    content_width: Option<Pixels>,
    settle_task: Option<Task<()>>,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            messages: Vec::new(),
            item_sizes: Rc::new(Vec::new()),
            scroll_manager: ScrollManager::new(),
            size_cache: HashMap::new(),
            content_width: None,
            settle_task: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replaces the rendered messages and pins the view to the newest one.
    pub fn set_messages(&mut self, messages: Vec<Message>, cx: &mut Context<Self>) {
        let appended = messages.len() > self.messages.len()
            || messages.last().map(|m| m.id) != self.messages.last().map(|m| m.id);

        self.messages = messages;
        self.rebuild_item_sizes();

        if appended {
            self.scroll_to_bottom(cx);
        }

        cx.notify();
    }

    pub fn reset_scroll_tracking(&mut self, cx: &mut Context<Self>) {
        self.scroll_manager.reset();
        cx.notify();
    }

    fn scroll_to_bottom(&mut self, cx: &mut Context<Self>) {
        self.scroll_manager.request_scroll_to_bottom();

        // Rows measured after this frame can grow the list, so scroll once more after they settle.
        self.settle_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(SETTLE_RESCROLL_DELAY).await;

            let _ = this.update(cx, |this, cx| {
                this.scroll_manager.request_scroll_to_bottom();
                this.settle_task = None;
                cx.notify();
            });
        }));
    }

    fn update_content_width(&mut self, cx: &mut Context<Self>) {
        let list_width = self.scroll_manager.bounds().size.width;
        if list_width <= Pixels::ZERO {
            return;
        }

        let next_content_width = max_pixels(px(1.), list_width - LIST_HORIZONTAL_PADDING * 2);
        let width_changed = self.content_width.is_none_or(|current| {
            (f32::from(current) - f32::from(next_content_width)).abs()
                > CONTENT_WIDTH_CHANGE_EPSILON
        });

        if width_changed {
            self.content_width = Some(next_content_width);

            for entry in self.size_cache.values_mut() {
                entry.measured = false;
            }

            self.rebuild_item_sizes();
            cx.notify();
        }
    }

    fn rebuild_item_sizes(&mut self) {
        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        let mut active_ids = HashSet::with_capacity(self.messages.len());
        let mut sizes = Vec::with_capacity(self.messages.len());

        for message in &self.messages {
            let next_hash = layout_hash(message);
            let estimated_height = estimate_message_height(message, content_width);

            let entry = self.size_cache.entry(message.id).or_insert(SizeCacheEntry {
                layout_hash: next_hash,
                height: estimated_height,
                measured: false,
            });

            if entry.layout_hash != next_hash {
                entry.layout_hash = next_hash;
                entry.height = estimated_height;
                entry.measured = false;
            } else if !entry.measured {
                entry.height = estimated_height;
            }

            sizes.push(size(px(0.), entry.height));
            active_ids.insert(message.id);
        }

        self.size_cache.retain(|id, _| active_ids.contains(id));
        self.item_sizes = Rc::new(sizes);
    }

    fn measure_visible_items(
        &mut self,
        visible_range: Range<usize>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        let available_space = size(
            AvailableSpace::Definite(content_width),
            AvailableSpace::MinContent,
        );
        let mut updated = false;

        for index in visible_range {
            let Some(message) = self.messages.get(index).cloned() else {
                continue;
            };

            let mut row = self.render_message_row(&message, cx);
            let measured_height = row.layout_as_root(available_space, window, cx).height;
            let Some(entry) = self.size_cache.get_mut(&message.id) else {
                continue;
            };
            if !entry.measured || pixels_changed(entry.height, measured_height) {
                entry.height = measured_height;
                updated = true;
            }
            entry.measured = true;
        }

        if updated {
            self.rebuild_item_sizes();
            cx.notify();
        }
    }

    fn render_message_row(&self, message: &Message, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let alignment = message.alignment();
        let (bubble_bg, text_color, time_color) = match alignment {
            BubbleAlignment::Right => (
                theme.primary,
                theme.primary_foreground,
                theme.primary_foreground.opacity(0.7),
            ),
            BubbleAlignment::Left => (theme.muted, theme.foreground, theme.muted_foreground),
        };
        let caption = message.caption().map(str::to_string);

        let bubble = v_flex()
            .max_w(relative(BUBBLE_WIDTH_RATIO))
            .px(BUBBLE_PADDING_X)
            .py(BUBBLE_PADDING_Y)
            .rounded_lg()
            .bg(bubble_bg)
            .when_some(caption, |bubble, caption| {
                bubble.child(
                    Label::new(caption)
                        .text_xs()
                        .font_weight(FontWeight::BOLD)
                        .text_color(theme.foreground),
                )
            })
            .child(
                Label::new(message.body.clone())
                    .text_sm()
                    .text_color(text_color),
            )
            .child(
                Label::new(message.display_time.clone())
                    .text_xs()
                    .text_color(time_color),
            );

        v_flex()
            .w_full()
            .map(|row| match alignment {
                BubbleAlignment::Right => row.items_end(),
                BubbleAlignment::Left => row.items_start(),
            })
            .child(bubble)
            .into_any_element()
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.update_content_width(cx);
        self.scroll_manager.apply_pending_scroll();

        v_flex().size_full().min_h_0().child(
            v_virtual_list(
                cx.entity().clone(),
                "message-list",
                self.item_sizes.clone(),
                |this, visible_range, window, cx| {
                    this.update_content_width(cx);
                    this.measure_visible_items(visible_range.clone(), window, cx);
                    visible_range
                        .filter_map(|index| {
                            this.messages
                                .get(index)
                                .cloned()
                                .map(|message| this.render_message_row(&message, cx))
                        })
                        .collect::<Vec<_>>()
                },
            )
            .size_full()
            .px_4()
            .py_3()
            .gap_2()
            .track_scroll(self.scroll_manager.handle()),
        )
    }
}

fn layout_hash(message: &Message) -> u64 {
    let mut hasher = DefaultHasher::new();

    hasher.write_u64(message.id.0);
    hasher.write(message.sender.label().as_bytes());
    hasher.write(message.body.as_bytes());
    hasher.write(message.display_time.as_bytes());
    hasher.finish()
}

fn estimate_message_height(message: &Message, content_width: Pixels) -> Pixels {
    let bubble_width = content_width * BUBBLE_WIDTH_RATIO;
    let text_width = max_pixels(px(1.), bubble_width - BUBBLE_PADDING_X * 2);
    let mut height = estimate_text_height(&message.body, text_width) + TIME_HEIGHT;

    if message.caption().is_some() {
        height += CAPTION_HEIGHT;
    }

    height + BUBBLE_PADDING_Y * 2
}

fn estimate_text_height(content: &str, width: Pixels) -> Pixels {
    if content.is_empty() {
        return ESTIMATED_TEXT_LINE_HEIGHT;
    }

    let chars_per_line = (f32::from(width) / ESTIMATED_CHAR_WIDTH).floor().max(1.0) as usize;

    let line_count: usize = content
        .lines()
        .map(|line| line.chars().count().max(1).div_ceil(chars_per_line))
        .sum();

    ESTIMATED_TEXT_LINE_HEIGHT * line_count.max(1)
}

fn max_pixels(a: Pixels, b: Pixels) -> Pixels {
    if f32::from(a) >= f32::from(b) { a } else { b }
}

fn pixels_changed(a: Pixels, b: Pixels) -> bool {
    (f32::from(a) - f32::from(b)).abs() > 0.5
}

#[cfg(test)]
mod tests {
    use natter_state::Sender;

    use super::*;

    fn message(id: u64, sender: Sender, body: &str) -> Message {
        Message::new(MessageId::new(id), sender, body, "10:30 AM")
    }

    #[test]
    fn incoming_bubbles_reserve_caption_height() {
        let width = px(368.);
        let outgoing = message(1, Sender::You, "Ho gaya sab");
        let incoming = message(2, Sender::from_label("Neha"), "Ho gaya sab");

        let difference = estimate_message_height(&incoming, width)
            - estimate_message_height(&outgoing, width);
        assert_eq!(difference, CAPTION_HEIGHT);
    }

    #[test]
    fn long_bodies_wrap_to_more_lines() {
        let width = px(368.);
        let short = message(1, Sender::You, "Okay");
        let long = message(2, Sender::You, &"Kal lab hai, instruments le aana ".repeat(6));

        assert!(estimate_message_height(&long, width) > estimate_message_height(&short, width));
    }

    #[gpui::test]
    async fn append_rescrolls_once_rows_settle(cx: &mut TestAppContext) {
        let list = cx.new(MessageList::new);

        list.update(cx, |list, cx| {
            list.set_messages(vec![message(1, Sender::You, "hello")], cx);
            list.scroll_manager.apply_pending_scroll();
            list.set_messages(
                vec![
                    message(1, Sender::You, "hello"),
                    message(2, Sender::from_label("Amit"), "Theek hai"),
                ],
                cx,
            );

            assert_eq!(list.messages().len(), 2);
            assert!(list.settle_task.is_some());
            assert!(list.scroll_manager.apply_pending_scroll());
        });

        cx.executor().advance_clock(SETTLE_RESCROLL_DELAY);
        cx.run_until_parked();

        list.update(cx, |list, _| {
            assert!(list.settle_task.is_none());
            assert!(list.scroll_manager.has_pending_scroll());
        });
    }

    #[test]
    fn layout_hash_tracks_content_only_per_message() {
        let first = message(1, Sender::You, "hello");
        let same = message(1, Sender::You, "hello");
        let edited = message(1, Sender::You, "hello!");

        assert_eq!(layout_hash(&first), layout_hash(&same));
        assert_ne!(layout_hash(&first), layout_hash(&edited));
    }
}
