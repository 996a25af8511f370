use std::fmt;

use crate::error::{ScreenNotFoundSnafu, StateResult};

/// Screens the messenger knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Chats,
    Status,
    Calls,
    ChatWindow,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Chats,
        Screen::Status,
        Screen::Calls,
        Screen::ChatWindow,
    ];

    /// Registration name used by `NavigationHost::show_named`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chats => "chats",
            Self::Status => "status",
            Self::Calls => "calls",
            Self::ChatWindow => "chat_window",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.name() == name)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Holds registered screens and which one is visible.
///
/// The first registered screen becomes visible. Exactly one screen is visible
/// once anything has been registered.
#[derive(Debug, Clone, Default)]
pub struct NavigationHost {
    screens: Vec<Screen>,
    current: Option<Screen>,
}

impl NavigationHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with every screen registered, `chats` first.
    pub fn with_default_screens() -> Self {
        let mut host = Self::new();
        for screen in Screen::ALL {
            host.register(screen);
        }
        host
    }

    pub fn register(&mut self, screen: Screen) {
        if self.screens.contains(&screen) {
            return;
        }

        self.screens.push(screen);
        if self.current.is_none() {
            self.current = Some(screen);
        }
    }

    pub fn is_registered(&self, screen: Screen) -> bool {
        self.screens.contains(&screen)
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn current(&self) -> Option<Screen> {
        self.current
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.current == Some(screen)
    }

    pub fn show(&mut self, screen: Screen) -> StateResult<()> {
        if !self.is_registered(screen) {
            return ScreenNotFoundSnafu {
                stage: "show-screen",
                name: screen.name(),
            }
            .fail();
        }

        if self.current != Some(screen) {
            tracing::debug!(from = ?self.current, to = %screen, "switching screen");
        }
        self.current = Some(screen);
        Ok(())
    }

    pub fn show_named(&mut self, name: &str) -> StateResult<()> {
        let Some(screen) = Screen::from_name(name) else {
            return ScreenNotFoundSnafu {
                stage: "resolve-screen-name",
                name,
            }
            .fail();
        };

        self.show(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;

    #[test]
    fn first_registered_screen_is_visible() {
        let host = NavigationHost::with_default_screens();
        assert_eq!(host.current(), Some(Screen::Chats));
        assert_eq!(host.screens().len(), 4);
    }

    #[test]
    fn show_swaps_visible_screen() {
        let mut host = NavigationHost::with_default_screens();
        host.show(Screen::ChatWindow).unwrap();

        assert_eq!(host.current(), Some(Screen::ChatWindow));
        assert!(host.is_visible(Screen::ChatWindow));
        assert!(!host.is_visible(Screen::Chats));
    }

    #[test]
    fn unknown_name_is_not_found_and_keeps_current() {
        let mut host = NavigationHost::with_default_screens();
        host.show_named("status").unwrap();

        let error = host.show_named("settings").unwrap_err();
        assert_eq!(
            error,
            StateError::ScreenNotFound {
                stage: "resolve-screen-name",
                name: "settings".to_string(),
            }
        );
        assert_eq!(host.current(), Some(Screen::Status));
    }

    #[test]
    fn unregistered_screen_is_not_found() {
        let mut host = NavigationHost::new();
        host.register(Screen::Chats);

        assert!(host.show(Screen::Calls).is_err());
        assert_eq!(host.current(), Some(Screen::Chats));
    }

    #[test]
    fn registering_twice_is_ignored() {
        let mut host = NavigationHost::new();
        host.register(Screen::Calls);
        host.register(Screen::Calls);
        assert_eq!(host.screens(), &[Screen::Calls]);
    }
}
