use std::collections::HashMap;

/// One canned message seeded when a scripted conversation opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedMessage {
    pub sender: &'static str,
    pub body: &'static str,
    pub display_time: &'static str,
}

const fn line(
    sender: &'static str,
    body: &'static str,
    display_time: &'static str,
) -> ScriptedMessage {
    ScriptedMessage {
        sender,
        body,
        display_time,
    }
}

const MATHS_GROUP: &str = "Maths Group";
const SCIENCE_CLASS: &str = "Science Class";
const AMIT: &str = "Amit";

/// Sender label used for replies outside the one named contact.
pub const FRIEND: &str = "Friend";

const DEFAULT_REPLIES: &[&str] = &["Okay", "Samjha", "Achha idea hai", "Baad mein batata hun"];

/// Canned conversation openers and reply pools, keyed by exact conversation name.
#[derive(Debug, Clone)]
pub struct ScriptBook {
    scripts: HashMap<&'static str, Vec<ScriptedMessage>>,
    replies: HashMap<&'static str, Vec<&'static str>>,
    default_replies: Vec<&'static str>,
}

impl ScriptBook {
    pub fn empty() -> Self {
        Self {
            scripts: HashMap::new(),
            replies: HashMap::new(),
            default_replies: DEFAULT_REPLIES.to_vec(),
        }
    }

    pub fn with_script(mut self, name: &'static str, script: Vec<ScriptedMessage>) -> Self {
        self.scripts.insert(name, script);
        self
    }

    pub fn with_replies(mut self, name: &'static str, replies: Vec<&'static str>) -> Self {
        self.replies.insert(name, replies);
        self
    }

    /// Opening script for `name`. Lookup is exact and case-sensitive.
    pub fn script(&self, name: &str) -> Option<&[ScriptedMessage]> {
        self.scripts.get(name).map(Vec::as_slice)
    }

    /// Reply pool for `name`, falling back to the default pool.
    pub fn reply_pool(&self, name: &str) -> &[&'static str] {
        match self.replies.get(name) {
            Some(pool) if !pool.is_empty() => pool,
            _ => &self.default_replies,
        }
    }

    /// Label the synthetic reply is attributed to.
    pub fn reply_sender(&self, name: &str) -> &'static str {
        if name == AMIT { AMIT } else { FRIEND }
    }
}

impl Default for ScriptBook {
    fn default() -> Self {
        Self::empty()
            .with_script(
                MATHS_GROUP,
                vec![
                    line("Amit", "Assignment complete karo", "10:25 AM"),
                    line("You", "Ho gaya sab", "10:28 AM"),
                    line("Neha", "Mera bhi ho gaya", "10:30 AM"),
                ],
            )
            .with_script(
                SCIENCE_CLASS,
                vec![
                    line("Priya Ma'am", "Kal lab hai, instruments le aana", "9:10 AM"),
                    line("You", "Okay ma'am", "9:12 AM"),
                ],
            )
            .with_script(
                AMIT,
                vec![
                    line("Amit", "Bro, kal milte hain?", "Yesterday"),
                    line("You", "Haan, coaching ke baad", "Yesterday"),
                ],
            )
            .with_replies(
                MATHS_GROUP,
                vec!["Achha hai", "Mera bhi ho gaya", "Kal discuss karenge"],
            )
            .with_replies(
                SCIENCE_CLASS,
                vec!["Samjha", "Lab manual le aana", "Experiment record karna"],
            )
            .with_replies(AMIT, vec!["Theek hai", "Milte hain", "Location bhej"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_lookup_is_exact() {
        let book = ScriptBook::default();

        assert_eq!(book.script("Maths Group").map(<[_]>::len), Some(3));
        assert!(book.script("maths group").is_none());
        assert!(book.script("Amit ").is_none());
    }

    #[test]
    fn unknown_names_use_default_pool_and_friend() {
        let book = ScriptBook::default();

        assert_eq!(book.reply_pool("Neha"), DEFAULT_REPLIES);
        assert_eq!(book.reply_sender("Neha"), FRIEND);
        assert_eq!(book.reply_sender("Maths Group"), FRIEND);
        assert_eq!(book.reply_sender("Amit"), "Amit");
    }

    #[test]
    fn empty_pool_falls_back_to_default() {
        let book = ScriptBook::empty().with_replies("Quiet", Vec::new());
        assert_eq!(book.reply_pool("Quiet"), DEFAULT_REPLIES);
    }
}
