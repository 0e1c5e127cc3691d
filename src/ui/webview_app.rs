//! Desktop shell using `wry` + `tao`.
//!
//! Architecture:
//! - Every tao window carries one chrome webview (tab strip, toolbar, address
//!   bar) and one child webview per tab; only the active tab's is visible.
//! - Webview callbacks post [`UserEvent`]s through the loop proxy and all
//!   state changes happen on the event-loop thread, in [`BrowserWindow`].
//! - IPC from the chrome and from pages arrives via `window.ipc.postMessage()`.
//!   Pages may only send shortcut keys.

use std::collections::HashMap;

use log::{debug, error, info, warn};
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Fullscreen, WindowBuilder, WindowId};
use wry::{WebView, WebViewBuilder};

use crate::app::BrowserWindow;
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_registry::TabRegistryTrait;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::surface::SurfaceEvent;
use crate::types::action::{ShellAction, WindowCommand};
use crate::types::errors::{SurfaceError, TabError};
use crate::types::navigation::NavigationTarget;
use crate::types::settings::{ShellSettings, WindowGeometry};
use crate::types::tab::TabHandle;
use crate::ui::chrome::{key_capture_script, ChromeMessage, ChromeState, CHROME_HTML};
use crate::ui::surface::{chrome_bounds, content_bounds, GuiFactory, UserEvent};

const DEFAULT_WIDTH: f64 = 1280.0;
const DEFAULT_HEIGHT: f64 = 800.0;

/// What the event loop must do after a window handled an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Followup {
    Nothing,
    CloseWindow,
    SpawnWindow,
    QuitAll,
}

/// Settings shared by every window of the process.
struct ShellContext {
    settings: ShellSettings,
    shortcuts: ShortcutManager,
    key_script: String,
    proxy: EventLoopProxy<UserEvent>,
}

/// One top-level window: its chrome and its core state.
struct ShellWindow {
    chrome: WebView,
    browser: BrowserWindow<GuiFactory>,
}

impl ShellWindow {
    fn open(
        target: &EventLoopWindowTarget<UserEvent>,
        ctx: &ShellContext,
        geometry: Option<WindowGeometry>,
    ) -> Result<Self, TabError> {
        let mut builder = WindowBuilder::new()
            .with_title(ctx.settings.general.home_title.as_str())
            .with_inner_size(LogicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        builder = match geometry {
            Some(g) => builder
                .with_inner_size(LogicalSize::new(g.width, g.height))
                .with_position(LogicalPosition::new(g.x, g.y))
                .with_maximized(g.maximized),
            None => builder.with_maximized(true),
        };
        let window = builder
            .build(target)
            .map_err(|e| SurfaceError::Creation(e.to_string()))?;

        let window_id = window.id();
        let ipc_proxy = ctx.proxy.clone();
        let chrome = WebViewBuilder::new()
            .with_html(CHROME_HTML)
            .with_bounds(chrome_bounds(&window))
            .with_devtools(cfg!(debug_assertions))
            .with_initialization_script(ctx.key_script.as_str())
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                let _ = ipc_proxy.send_event(UserEvent::Ipc {
                    window: window_id,
                    from_page: false,
                    body: msg.body().clone(),
                });
            })
            .build_as_child(&window)
            .map_err(|e| SurfaceError::Creation(e.to_string()))?;

        let factory = GuiFactory::new(window, ctx.proxy.clone(), ctx.key_script.clone());
        let browser = BrowserWindow::new(factory, &ctx.settings)?;
        let shell = Self { chrome, browser };
        shell.show_active();
        info!("gui: window {:?} opened", window_id);
        Ok(shell)
    }

    fn geometry(&self) -> WindowGeometry {
        let window = self.browser.factory().window();
        let scale = window.scale_factor();
        let (x, y) = window
            .outer_position()
            .map(|p| {
                let p = p.to_logical::<f64>(scale);
                (p.x, p.y)
            })
            .unwrap_or((0.0, 0.0));
        let size = window.inner_size().to_logical::<f64>(scale);
        WindowGeometry {
            x,
            y,
            width: size.width,
            height: size.height,
            maximized: window.is_maximized(),
        }
    }

    fn layout(&self) {
        let window = self.browser.factory().window();
        if let Err(e) = self.chrome.set_bounds(chrome_bounds(window)) {
            warn!("gui: chrome bounds: {}", e);
        }
        let bounds = content_bounds(window);
        for &handle in self.browser.tabs().handles() {
            if let Some(session) = self.browser.tabs().get(handle) {
                session.surface().set_bounds(bounds);
            }
        }
    }

    /// Shows the active tab's webview and hides the others.
    fn show_active(&self) {
        let active = self.browser.active_handle();
        for &handle in self.browser.tabs().handles() {
            if let Some(session) = self.browser.tabs().get(handle) {
                session.surface().set_visible(active == Some(handle));
            }
        }
        self.refresh_chrome(true);
    }

    fn refresh_chrome(&self, reset_address: bool) {
        let state = ChromeState::of(&self.browser, reset_address);
        if let Err(e) = self.chrome.evaluate_script(&state.to_script()) {
            warn!("gui: chrome update failed: {}", e);
        }
        let title = self
            .browser
            .active_session()
            .map(|s| s.title())
            .filter(|t| !t.is_empty());
        let window = self.browser.factory().window();
        match title {
            Some(title) => window.set_title(title),
            None => window.set_title("Tabshell"),
        }
    }

    fn focus_address_bar(&self) {
        let _ = self
            .chrome
            .evaluate_script("window.__tabshell && window.__tabshell.focusAddress()");
    }

    fn toggle_fullscreen(&self) {
        let window = self.browser.factory().window();
        let next = match window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        debug!("gui: fullscreen {}", next.is_some());
        window.set_fullscreen(next);
    }

    fn focus_content(&self) {
        if let Some(session) = self.browser.active_session() {
            session.surface().focus();
        }
    }

    fn handle_at(&self, index: usize) -> Option<TabHandle> {
        self.browser.tabs().handles().get(index).copied()
    }

    fn on_surface_event(&mut self, tab: TabHandle, event: SurfaceEvent) {
        if self.browser.dispatch(tab, event) {
            self.refresh_chrome(false);
        }
    }

    fn on_message(&mut self, message: ChromeMessage, shortcuts: &ShortcutManager) -> Followup {
        match message {
            ChromeMessage::Ready => {
                self.refresh_chrome(true);
                Followup::Nothing
            }
            ChromeMessage::Submit { text } => {
                self.browser.submit_address(&text);
                self.refresh_chrome(true);
                self.focus_content();
                Followup::Nothing
            }
            ChromeMessage::Edit { text } => {
                self.browser.edit_address(&text);
                Followup::Nothing
            }
            ChromeMessage::Action { name } => match ShellAction::from_name(&name) {
                Some(action) => self.on_action(action),
                None => {
                    warn!("gui: unknown action '{}'", name);
                    Followup::Nothing
                }
            },
            ChromeMessage::Switch { index } => {
                if let Some(handle) = self.handle_at(index) {
                    if let Err(e) = self.browser.set_active(handle) {
                        warn!("gui: {}", e);
                    }
                    self.show_active();
                }
                Followup::Nothing
            }
            ChromeMessage::Close { index } => {
                let Some(handle) = self.handle_at(index) else {
                    return Followup::Nothing;
                };
                match self.browser.close_tab(handle) {
                    Some(WindowCommand::CloseWindow) => Followup::CloseWindow,
                    _ => {
                        self.show_active();
                        Followup::Nothing
                    }
                }
            }
            ChromeMessage::Key { keys } => match shortcuts.resolve(&keys) {
                Some(action) => self.on_action(action),
                None => Followup::Nothing,
            },
        }
    }

    fn on_action(&mut self, action: ShellAction) -> Followup {
        let followup = match self.browser.perform(action) {
            Ok(None) => Followup::Nothing,
            Ok(Some(WindowCommand::FocusAddressBar)) => {
                self.focus_address_bar();
                return Followup::Nothing;
            }
            Ok(Some(WindowCommand::ToggleFullscreen)) => {
                self.toggle_fullscreen();
                return Followup::Nothing;
            }
            Ok(Some(WindowCommand::SpawnWindow)) => Followup::SpawnWindow,
            Ok(Some(WindowCommand::CloseWindow)) if action == ShellAction::Quit => {
                Followup::QuitAll
            }
            Ok(Some(WindowCommand::CloseWindow)) => Followup::CloseWindow,
            Err(e) => {
                error!("gui: {} failed: {}", action.name(), e);
                Followup::Nothing
            }
        };
        if followup == Followup::Nothing {
            self.show_active();
        }
        followup
    }

    fn open_in_new_tab(&mut self, url: String) {
        let target = NavigationTarget::explicit(url);
        match self.browser.open_tab(Some(&target), true) {
            Ok(_) => self.show_active(),
            Err(e) => error!("gui: could not open {}: {}", target.as_str(), e),
        }
    }
}

/// Closes one window, remembering its geometry for the next start.
fn close_window(
    windows: &mut HashMap<WindowId, ShellWindow>,
    id: WindowId,
    settings_engine: &mut SettingsEngine,
) {
    if let Some(mut shell) = windows.remove(&id) {
        settings_engine.set_window_geometry(Some(shell.geometry()));
        shell.browser.shutdown();
        info!("gui: window {:?} closed ({} left)", id, windows.len());
    }
}

fn persist(settings_engine: &SettingsEngine) {
    if let Err(e) = settings_engine.save() {
        error!("gui: could not save settings: {}", e);
    }
}

// ─── Main entry point ───

pub fn run() -> Result<(), TabError> {
    let mut settings_engine = SettingsEngine::new(None);
    let settings = settings_engine.load_or_default();
    let shortcuts = ShortcutManager::from_bindings(&settings.shortcuts);
    let key_script = key_capture_script(&shortcuts.bound_keys());

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let ctx = ShellContext {
        settings,
        shortcuts,
        key_script,
        proxy: event_loop.create_proxy(),
    };

    let first = ShellWindow::open(&event_loop, &ctx, ctx.settings.window.geometry)?;
    let mut windows: HashMap<WindowId, ShellWindow> = HashMap::new();
    windows.insert(first.browser.factory().window().id(), first);

    let mut exiting = false;
    event_loop.run(move |event, target, control_flow| {
        if exiting {
            *control_flow = ControlFlow::Exit;
            return;
        }
        *control_flow = ControlFlow::Wait;

        let followup = match event {
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } => Some((window_id, Followup::CloseWindow)),

            Event::WindowEvent {
                window_id,
                event: WindowEvent::Resized(_),
                ..
            } => {
                if let Some(shell) = windows.get(&window_id) {
                    shell.layout();
                }
                None
            }

            Event::UserEvent(UserEvent::Surface { window, tab, event }) => {
                if let Some(shell) = windows.get_mut(&window) {
                    shell.on_surface_event(tab, event);
                }
                None
            }

            Event::UserEvent(UserEvent::Ipc {
                window,
                from_page,
                body,
            }) => {
                let message = ChromeMessage::parse(&body)
                    .filter(|m| !from_page || matches!(m, ChromeMessage::Key { .. }));
                match (windows.get_mut(&window), message) {
                    (Some(shell), Some(message)) => {
                        Some((window, shell.on_message(message, &ctx.shortcuts)))
                    }
                    (_, None) => {
                        debug!("gui: ignored IPC message from {:?}", window);
                        None
                    }
                    (None, Some(_)) => None,
                }
            }

            Event::UserEvent(UserEvent::OpenTab { window, url }) => {
                if let Some(shell) = windows.get_mut(&window) {
                    shell.open_in_new_tab(url);
                }
                None
            }

            _ => None,
        };

        match followup {
            Some((_, Followup::Nothing)) | None => {}
            Some((id, Followup::CloseWindow)) => {
                close_window(&mut windows, id, &mut settings_engine);
            }
            Some((_, Followup::SpawnWindow)) => match ShellWindow::open(target, &ctx, None) {
                Ok(shell) => {
                    windows.insert(shell.browser.factory().window().id(), shell);
                }
                Err(e) => error!("gui: could not open window: {}", e),
            },
            Some((_, Followup::QuitAll)) => {
                let ids: Vec<WindowId> = windows.keys().copied().collect();
                for id in ids {
                    close_window(&mut windows, id, &mut settings_engine);
                }
            }
        }

        if windows.is_empty() {
            exiting = true;
            persist(&settings_engine);
            *control_flow = ControlFlow::Exit;
        }
    })
}
