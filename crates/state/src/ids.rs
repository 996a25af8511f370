use std::fmt;

// Macro keeps all counter-backed IDs structurally identical.
macro_rules! define_counter_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_counter_id!(
    /// Stable render key for one message within the process.
    MessageId
);
define_counter_id!(
    /// Identifies one scheduled auto-reply.
    ReplyTicket
);

/// Monotonic allocator shared by both ID kinds.
#[derive(Debug, Clone)]
pub(crate) struct Counter {
    next: u64,
}

impl Counter {
    pub(crate) const fn new() -> Self {
        Self { next: 1 }
    }

    pub(crate) fn bump(&mut self) -> u64 {
        let current = self.next;
        self.next = self.next.saturating_add(1);
        current
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}
