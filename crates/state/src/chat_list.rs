use crate::clock::NOW_LABEL;

pub const NEW_CHAT_PREVIEW: &str = "Say hello!";

/// One row of the chat list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub name: String,
    pub last_message: String,
    pub display_time: String,
    pub unread_count: u32,
}

impl ConversationSummary {
    pub fn new(
        name: impl Into<String>,
        last_message: impl Into<String>,
        display_time: impl Into<String>,
        unread_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            last_message: last_message.into(),
            display_time: display_time.into(),
            unread_count,
        }
    }

    /// Placeholder summary for a chat the user just created.
    pub fn fresh(name: impl Into<String>) -> Self {
        Self::new(name, NEW_CHAT_PREVIEW, NOW_LABEL, 0)
    }

    /// Badge value, present only when something is unread.
    pub fn unread_badge(&self) -> Option<u32> {
        (self.unread_count > 0).then_some(self.unread_count)
    }

    /// Uppercased first character used as the avatar glyph.
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Result of submitting the create-conversation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(String),
    /// Name was blank after trimming. The dialog stays open.
    IgnoredBlank,
    /// A conversation with this name already exists. The dialog stays open.
    IgnoredDuplicate(String),
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Conversation summaries in recency order plus the create dialog flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatList {
    conversations: Vec<ConversationSummary>,
    create_dialog_open: bool,
}

impl ChatList {
    pub fn new(conversations: Vec<ConversationSummary>) -> Self {
        Self {
            conversations,
            create_dialog_open: false,
        }
    }

    /// The fixed list shown at startup.
    pub fn seeded() -> Self {
        Self::new(vec![
            ConversationSummary::new("Maths Group", "Amit: Assignment complete?", "10:30 AM", 3),
            ConversationSummary::new("Science Class", "Priya Ma'am: Lab tomorrow", "9:15 AM", 1),
            ConversationSummary::new("Amit", "You: Kal milte hain", "Yesterday", 0),
            ConversationSummary::new("Neha", "Notes bhej diye", "Yesterday", 0),
            ConversationSummary::new("Physics Doubts", "Rajesh Sir: Concept clear?", "12/11/24", 5),
            ConversationSummary::new("Coaching Friends", "Rahul: Party kab?", "12/11/24", 0),
        ])
    }

    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.conversations
            .iter()
            .any(|conversation| conversation.name == name)
    }

    pub fn is_create_dialog_open(&self) -> bool {
        self.create_dialog_open
    }

    pub fn open_create_dialog(&mut self) {
        self.create_dialog_open = true;
    }

    pub fn close_create_dialog(&mut self) {
        self.create_dialog_open = false;
    }

    /// Prepends a fresh summary when `name` is non-blank and unused.
    ///
    /// Rejections are silent: the list is untouched and the dialog stays as it was.
    pub fn create_conversation(&mut self, name: &str) -> CreateOutcome {
        let name = name.trim();
        if name.is_empty() {
            return CreateOutcome::IgnoredBlank;
        }

        if self.contains(name) {
            tracing::debug!(name, "conversation already exists; ignoring create");
            return CreateOutcome::IgnoredDuplicate(name.to_string());
        }

        self.conversations.insert(0, ConversationSummary::fresh(name));
        self.create_dialog_open = false;
        tracing::debug!(name, total = self.conversations.len(), "conversation created");
        CreateOutcome::Created(name.to_string())
    }

    /// Rows whose name contains `query`, case-insensitively, in list order.
    pub fn filtered(&self, query: &str) -> Vec<&ConversationSummary> {
        let normalized_query = query.trim().to_lowercase();
        self.conversations
            .iter()
            .filter(|conversation| matches_query(conversation, &normalized_query))
            .collect()
    }
}

impl Default for ChatList {
    fn default() -> Self {
        Self::seeded()
    }
}

fn matches_query(conversation: &ConversationSummary, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    conversation.name.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn seeded_list_keeps_recency_order() {
        let list = ChatList::seeded();
        let names = list
            .conversations()
            .iter()
            .map(|conversation| conversation.name.as_str())
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                "Maths Group",
                "Science Class",
                "Amit",
                "Neha",
                "Physics Doubts",
                "Coaching Friends",
            ]
        );
    }

    #[test]
    fn blank_name_keeps_dialog_open() {
        let mut list = ChatList::seeded();
        list.open_create_dialog();

        assert_eq!(list.create_conversation("  "), CreateOutcome::IgnoredBlank);
        assert_eq!(list.len(), 6);
        assert!(list.is_create_dialog_open());
    }

    #[test]
    fn created_conversation_is_prepended_and_dialog_closes() {
        let mut list = ChatList::seeded();
        list.open_create_dialog();

        let outcome = list.create_conversation("  Ravi ");

        assert_eq!(outcome, CreateOutcome::Created("Ravi".to_string()));
        assert_eq!(
            list.conversations()[0],
            ConversationSummary::new("Ravi", "Say hello!", "Now", 0)
        );
        assert_eq!(list.len(), 7);
        assert!(!list.is_create_dialog_open());
    }

    #[test]
    fn duplicate_name_is_ignored() {
        let mut list = ChatList::seeded();
        list.open_create_dialog();

        assert_eq!(
            list.create_conversation("Neha"),
            CreateOutcome::IgnoredDuplicate("Neha".to_string())
        );
        assert_eq!(list.len(), 6);
        assert!(list.is_create_dialog_open());
    }

    #[test]
    fn padded_copy_of_existing_name_is_a_duplicate() {
        let mut list = ChatList::seeded();
        list.open_create_dialog();

        assert_eq!(
            list.create_conversation("Amit "),
            CreateOutcome::IgnoredDuplicate("Amit".to_string())
        );
        assert_eq!(list.len(), 6);
        assert!(list.is_create_dialog_open());
    }

    #[test]
    fn unread_badge_only_when_positive() {
        let list = ChatList::seeded();
        assert_eq!(list.conversations()[0].unread_badge(), Some(3));
        assert_eq!(list.conversations()[2].unread_badge(), None);
    }

    #[test]
    fn filter_is_case_insensitive_and_order_preserving() {
        let list = ChatList::seeded();
        let names = list
            .filtered("  GROUP")
            .into_iter()
            .map(|conversation| conversation.name.clone())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Maths Group".to_string()]);
        assert_eq!(list.filtered("").len(), 6);
    }

    #[test]
    fn initial_is_uppercased_first_letter() {
        assert_eq!(ConversationSummary::fresh("ravi").initial(), "R");
    }
}
