/// Static content for a screen that has no behavior yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub title: &'static str,
    pub headline: &'static str,
    pub ideas: &'static [&'static str],
}

impl Placeholder {
    pub const STATUS: Placeholder = Placeholder {
        title: "Status",
        headline: "Status Feature Coming Soon...",
        ideas: &["Image/Video Status", "Text Status", "Status Views"],
    };

    pub const CALLS: Placeholder = Placeholder {
        title: "Calls",
        headline: "Call Feature Coming Soon...",
        ideas: &["Voice Calls", "Video Calls", "Call History"],
    };

    /// Body text as one block, bullets included.
    pub fn body(&self) -> String {
        let mut body = format!("{}\n\nYou can add:", self.headline);
        for idea in self.ideas {
            body.push_str("\n• ");
            body.push_str(idea);
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_lists_ideas() {
        assert_eq!(
            Placeholder::STATUS.body(),
            "Status Feature Coming Soon...\n\nYou can add:\n• Image/Video Status\n• Text Status\n• Status Views"
        );
    }
}
