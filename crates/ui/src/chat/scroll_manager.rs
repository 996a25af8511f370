use std::time::Duration;

use gpui::{Bounds, Pixels, Point, point};
use gpui_component::VirtualListScrollHandle;

/// Delay before the follow-up scroll that catches rows whose height settled late.
pub const SETTLE_RESCROLL_DELAY: Duration = Duration::from_millis(100);

/// Keeps the message list pinned to its newest row after appends.
pub struct ScrollManager {
    scroll_handle: VirtualListScrollHandle,
    pending_scroll_to_bottom: bool,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: VirtualListScrollHandle::new(),
            pending_scroll_to_bottom: false,
        }
    }

    pub fn handle(&self) -> &VirtualListScrollHandle {
        &self.scroll_handle
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll_to_bottom
    }

    pub fn request_scroll_to_bottom(&mut self) {
        self.pending_scroll_to_bottom = true;
    }

    /// Forgets the previous conversation's offset and pins the next one to the tail.
    pub fn reset(&mut self) {
        let current_x = self.scroll_handle.offset().x;
        self.scroll_handle.set_offset(point(current_x, Pixels::ZERO));
        self.pending_scroll_to_bottom = true;
    }

    /// Applies a requested scroll during render. Returns whether one happened.
    pub fn apply_pending_scroll(&mut self) -> bool {
        if !self.pending_scroll_to_bottom {
            return false;
        }

        let max_offset = self.scroll_handle.max_offset().height;
        let current_x = self.scroll_handle.offset().x;
        // GPUI scrolls down with negative Y offsets.
        let target_y = if max_offset > Pixels::ZERO {
            -max_offset
        } else {
            Pixels::ZERO
        };
        self.scroll_handle.set_offset(point(current_x, target_y));

        self.pending_scroll_to_bottom = false;
        true
    }

    pub fn bounds(&self) -> Bounds<Pixels> {
        self.scroll_handle.bounds()
    }

    pub fn offset(&self) -> Point<Pixels> {
        self.scroll_handle.offset()
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_scroll_is_consumed_once() {
        let mut manager = ScrollManager::new();
        assert!(!manager.apply_pending_scroll());

        manager.request_scroll_to_bottom();
        assert!(manager.has_pending_scroll());
        assert!(manager.apply_pending_scroll());
        assert!(!manager.apply_pending_scroll());
    }

    #[test]
    fn reset_requests_tail_scroll() {
        let mut manager = ScrollManager::new();
        manager.reset();

        assert!(manager.has_pending_scroll());
        assert_eq!(manager.offset().y, Pixels::ZERO);
    }
}
