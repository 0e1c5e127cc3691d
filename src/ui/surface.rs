//! wry-backed rendering surfaces.
//!
//! Each tab gets its own child webview laid out below the chrome. Engine
//! callbacks run on the event-loop thread; they only post [`UserEvent`]s
//! through the loop proxy, tagged with the window and tab they belong to.

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event_loop::EventLoopProxy;
use tao::window::{Window, WindowId};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::surface::{RenderingSurface, SurfaceEvent, SurfaceFactory};
use crate::types::errors::SurfaceError;
use crate::types::tab::TabHandle;
use crate::ui::chrome::CHROME_HEIGHT;

/// Events posted to the tao event loop.
#[derive(Debug)]
pub enum UserEvent {
    /// Lifecycle event from a tab's webview.
    Surface {
        window: WindowId,
        tab: TabHandle,
        event: SurfaceEvent,
    },
    /// IPC message. `from_page` is set for messages from tab content.
    Ipc {
        window: WindowId,
        from_page: bool,
        body: String,
    },
    /// A page asked for a new window; it opens as a tab instead.
    OpenTab { window: WindowId, url: String },
}

/// Bounds of the chrome strip at the top of `window`.
pub fn chrome_bounds(window: &Window) -> Rect {
    let (width, _) = logical_size(window);
    Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: LogicalSize::new(width, CHROME_HEIGHT).into(),
    }
}

/// Bounds of the tab content area below the chrome.
pub fn content_bounds(window: &Window) -> Rect {
    let (width, height) = logical_size(window);
    Rect {
        position: LogicalPosition::new(0.0, CHROME_HEIGHT).into(),
        size: LogicalSize::new(width, (height - CHROME_HEIGHT).max(0.0)).into(),
    }
}

fn logical_size(window: &Window) -> (f64, f64) {
    let scale = window.scale_factor();
    let size = window.inner_size();
    (size.width as f64 / scale, size.height as f64 / scale)
}

/// Creates tab webviews inside one tao window. Owns the window.
pub struct GuiFactory {
    window: Window,
    proxy: EventLoopProxy<UserEvent>,
    key_script: String,
}

impl GuiFactory {
    pub fn new(window: Window, proxy: EventLoopProxy<UserEvent>, key_script: String) -> Self {
        Self {
            window,
            proxy,
            key_script,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl SurfaceFactory for GuiFactory {
    type Surface = GuiSurface;

    fn create_surface(&mut self, handle: TabHandle) -> Result<GuiSurface, SurfaceError> {
        let window = self.window.id();
        let title = Arc::new(Mutex::new(String::new()));

        let load_proxy = self.proxy.clone();
        let load_title = Arc::clone(&title);
        let title_proxy = self.proxy.clone();
        let title_sink = Arc::clone(&title);
        let ipc_proxy = self.proxy.clone();
        let popup_proxy = self.proxy.clone();

        let webview = WebViewBuilder::new()
            .with_bounds(content_bounds(&self.window))
            .with_visible(false)
            .with_devtools(cfg!(debug_assertions))
            .with_initialization_script(self.key_script.as_str())
            .with_on_page_load_handler(move |event, url| {
                let events = match event {
                    PageLoadEvent::Started => {
                        // The next document reports its own title, if any.
                        if let Ok(mut current) = load_title.lock() {
                            current.clear();
                        }
                        vec![SurfaceEvent::LoadStarted, SurfaceEvent::UrlChanged(url)]
                    }
                    PageLoadEvent::Finished => vec![
                        SurfaceEvent::UrlChanged(url),
                        SurfaceEvent::LoadProgress(100),
                        SurfaceEvent::LoadFinished(true),
                    ],
                };
                for event in events {
                    let _ = load_proxy.send_event(UserEvent::Surface {
                        window,
                        tab: handle,
                        event,
                    });
                }
            })
            .with_document_title_changed_handler(move |new_title| {
                if let Ok(mut current) = title_sink.lock() {
                    current.clone_from(&new_title);
                }
                let _ = title_proxy.send_event(UserEvent::Surface {
                    window,
                    tab: handle,
                    event: SurfaceEvent::TitleChanged(new_title),
                });
            })
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                let _ = ipc_proxy.send_event(UserEvent::Ipc {
                    window,
                    from_page: true,
                    body: msg.body().clone(),
                });
            })
            .with_new_window_req_handler(move |url, _features| {
                if url.starts_with("http://") || url.starts_with("https://") {
                    let _ = popup_proxy.send_event(UserEvent::OpenTab { window, url });
                }
                wry::NewWindowResponse::Deny
            })
            .build_as_child(&self.window)
            .map_err(|e| SurfaceError::Creation(e.to_string()))?;

        debug!("gui: webview created for tab {}", handle);
        Ok(GuiSurface {
            handle,
            webview,
            title,
        })
    }
}

/// One tab's webview.
pub struct GuiSurface {
    handle: TabHandle,
    webview: WebView,
    title: Arc<Mutex<String>>,
}

impl GuiSurface {
    pub fn set_visible(&self, visible: bool) {
        if let Err(e) = self.webview.set_visible(visible) {
            warn!("gui: tab {} visibility: {}", self.handle, e);
        }
    }

    pub fn set_bounds(&self, bounds: Rect) {
        if let Err(e) = self.webview.set_bounds(bounds) {
            warn!("gui: tab {} bounds: {}", self.handle, e);
        }
    }

    pub fn focus(&self) {
        let _ = self.webview.focus();
    }

    fn run_script(&self, script: &str) {
        if let Err(e) = self.webview.evaluate_script(script) {
            warn!("gui: tab {} script failed: {}", self.handle, e);
        }
    }
}

impl RenderingSurface for GuiSurface {
    fn navigate(&mut self, url: &str) {
        if let Err(e) = self.webview.load_url(url) {
            warn!("gui: tab {} could not load {}: {}", self.handle, url, e);
        }
    }

    fn load_html(&mut self, html: &str, _base_url: &str) {
        if let Err(e) = self.webview.load_html(html) {
            warn!("gui: tab {} could not load document: {}", self.handle, e);
        }
    }

    fn back(&mut self) {
        self.run_script("history.back();");
    }

    fn forward(&mut self) {
        self.run_script("history.forward();");
    }

    fn reload(&mut self) {
        self.run_script("location.reload();");
    }

    fn stop(&mut self) {
        self.run_script("window.stop();");
    }

    fn set_zoom(&mut self, factor: f64) {
        if let Err(e) = self.webview.zoom(factor) {
            warn!("gui: tab {} zoom: {}", self.handle, e);
        }
    }

    fn current_title(&self) -> String {
        self.title.lock().map(|t| t.clone()).unwrap_or_default()
    }

    fn current_url(&self) -> String {
        self.webview.url().unwrap_or_default()
    }

    /// Hides the webview; it is destroyed when the surface drops.
    fn release(&mut self) {
        self.set_visible(false);
        debug!("gui: webview for tab {} released", self.handle);
    }
}
