//! Tabshell desktop UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK (child webviews need X11)
//! - macOS: WKWebView
//!
//! The chrome is HTML/CSS/JS in its own webview; each tab is a separate
//! child webview implementing [`crate::surface::RenderingSurface`].

pub mod chrome;
pub mod surface;
pub mod webview_app;
