use std::sync::Arc;

use gpui::*;
use gpui_component::{Root, ThemeRegistry};

use natter::app::{
    GoBack, MessengerShell, NewChat, Quit, WINDOW_HEIGHT, WINDOW_WIDTH, default_themes_path,
};
use natter::messenger::Messenger;
use natter::settings::SettingsStore;

/// Application entry point.
///
/// Bootstraps the GPUI application with:
/// 1. Asset loading via gpui-component-assets
/// 2. gpui-component initialization (required for Root and themes)
/// 3. The read-only settings file and the ./themes watch (both non-fatal if missing)
/// 4. Global action handlers and key bindings
/// 5. A fixed-size phone-shaped window wrapped in Root
fn main() {
    tracing_subscriber::fmt::init();

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(|cx| {
        gpui_component::init(cx);

        let settings = Arc::new(SettingsStore::load());

        let watched_settings = settings.clone();
        if let Err(err) = ThemeRegistry::watch_dir(default_themes_path(), cx, move |cx| {
            watched_settings.settings().apply_theme(None, cx);
            tracing::info!("Theme directory watch initialized");
        }) {
            tracing::warn!(
                "Failed to watch themes directory: {}. Using default themes.",
                err
            );
            settings.settings().apply_theme(None, cx);
        }

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("ctrl-q", Quit, None),
            KeyBinding::new("cmd-n", NewChat, Some("MessengerShell")),
            KeyBinding::new("ctrl-n", NewChat, Some("MessengerShell")),
            KeyBinding::new("escape", GoBack, Some("MessengerShell")),
        ]);

        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(WINDOW_WIDTH), px(WINDOW_HEIGHT)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        title: Some("Natter".into()),
                        ..Default::default()
                    }),
                    is_resizable: false,
                    ..Default::default()
                };

                let session_config = settings.settings().session_config();
                let opened = cx.open_window(options, |window, cx| {
                    let messenger = cx.new(|_| Messenger::new(session_config));
                    let shell = cx.new(|cx| MessengerShell::new(messenger, settings, window, cx));

                    // Root is required by gpui-component for themed inputs and overlays.
                    cx.new(|cx| Root::new(shell, window, cx))
                });

                if let Err(err) = opened {
                    tracing::error!("failed to open main window: {err}");
                    cx.quit();
                    return;
                }

                cx.activate(true);
            })
        })
        .detach();
    });
}
