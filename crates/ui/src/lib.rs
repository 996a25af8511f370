#![deny(unsafe_code)]

/// Mobile-style messenger mock-up built with GPUI and gpui-component.
///
/// All conversation state lives in `natter-state`; this crate wires it into
/// views, timers and the theme pipeline.
pub mod app;
/// Chat list and conversation screens.
pub mod chat;
pub mod messenger;
pub mod placeholder;
/// Read-only settings file and theme application.
pub mod settings;
