use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};

use crate::ids::ReplyTicket;

pub const DEFAULT_AUTO_REPLY_DELAY: Duration = Duration::from_secs(2);

/// Chooses an index into a non-empty reply pool.
pub trait ReplyPicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform choice backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> ReplyPicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed index sequence, wrapping each index into the pool.
///
/// Once the sequence is exhausted it keeps returning 0.
#[derive(Debug, Clone, Default)]
pub struct SequencePicker {
    indices: VecDeque<usize>,
}

impl SequencePicker {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }
}

impl ReplyPicker for SequencePicker {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.indices.pop_front().unwrap_or(0) % len
    }
}

/// Where a reply lands when the user changed conversation before it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyRouting {
    /// Append to whichever conversation is open at fire time.
    #[default]
    ActiveConversation,
    /// Drop the reply unless its originating conversation is still open.
    OriginatingConversation,
}

/// A scheduled synthetic reply awaiting its timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: ReplyTicket,
    pub origin: String,
    pub original_text: String,
    pub original_time: String,
    pub delay: Duration,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn sequence_picker_wraps_and_exhausts_to_zero() {
        let mut picker = SequencePicker::new([2, 7]);
        assert_eq!(picker.pick(3), 2);
        assert_eq!(picker.pick(3), 1);
        assert_eq!(picker.pick(3), 0);
    }

    #[test]
    fn rng_picker_stays_in_bounds() {
        let mut picker = RngPicker::new(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            assert!(picker.pick(4) < 4);
        }
        assert_eq!(picker.pick(0), 0);
    }

    #[test]
    fn routing_uses_snake_case_names() {
        let routing: ReplyRouting =
            serde_json::from_str("\"originating_conversation\"").unwrap();
        assert_eq!(routing, ReplyRouting::OriginatingConversation);
    }
}
