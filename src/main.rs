//! Tabshell: a minimal multi-tab browser shell.
//!
//! Entry point: with the `gui` feature, opens a wry/tao browser window.
//! Without it, runs a console shell over a headless surface: each input line
//! is either address-bar text or a `:command`.

#[cfg(feature = "gui")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = tabshell::ui::webview_app::run() {
        log::error!("tabshell: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use std::io::{self, BufRead, Write};

    use tabshell::app::BrowserWindow;
    use tabshell::services::settings_engine::SettingsEngine;
    use tabshell::surface::headless::HeadlessFactory;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut settings_engine = SettingsEngine::new(None);
    let settings = settings_engine.load_or_default();

    let mut window = match BrowserWindow::new(HeadlessFactory::new(), &settings) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("tabshell: {}", e);
            std::process::exit(1);
        }
    };

    println!("Tabshell v{} (headless)", env!("CARGO_PKG_VERSION"));
    println!("Type a URL or search terms. Commands: :back :forward :reload :home :new");
    println!("  :close :tab <n> :zoom+ :zoom- :zoom0 :done :fail :title <text> :quit");
    print_state(&window);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        match console::run_line(&mut window, line.trim()) {
            console::Outcome::Continue => print_state(&window),
            console::Outcome::Exit => break,
        }
    }

    window.shutdown();
}

#[cfg(not(feature = "gui"))]
fn print_state(
    window: &tabshell::app::BrowserWindow<tabshell::surface::headless::HeadlessFactory>,
) {
    println!("───────────────────────────────────────────────────────────────");
    for (i, tab) in window.summaries().iter().enumerate() {
        let marker = if tab.active { "*" } else { " " };
        println!(
            " {}[{}] {:<24} {:?} zoom {:.1}",
            marker, i, tab.label.text, tab.state, tab.zoom
        );
    }
    let progress = window.address_bar().progress();
    println!(
        "  address: {}{}",
        window.address_bar().current_text(),
        if progress.visible {
            format!("  [{}%]", progress.value)
        } else {
            String::new()
        }
    );
}

#[cfg(not(feature = "gui"))]
mod console {
    use log::warn;

    use tabshell::app::BrowserWindow;
    use tabshell::managers::tab_registry::TabRegistryTrait;
    use tabshell::surface::headless::HeadlessFactory;
    use tabshell::surface::{RenderingSurface, SurfaceEvent};
    use tabshell::types::action::{ShellAction, WindowCommand};

    pub enum Outcome {
        Continue,
        Exit,
    }

    /// Applies one console line. A headless surface never loads anything by
    /// itself, so after a navigation the line simulates the engine's
    /// start/url events; `:done`, `:fail` and `:title` finish the load.
    pub fn run_line(window: &mut BrowserWindow<HeadlessFactory>, line: &str) -> Outcome {
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        let action = match command {
            ":back" => Some(ShellAction::Back),
            ":forward" => Some(ShellAction::Forward),
            ":reload" => Some(ShellAction::Reload),
            ":home" => Some(ShellAction::Home),
            ":new" => Some(ShellAction::NewTab),
            ":close" => Some(ShellAction::CloseTab),
            ":zoom+" => Some(ShellAction::ZoomIn),
            ":zoom-" => Some(ShellAction::ZoomOut),
            ":zoom0" => Some(ShellAction::ZoomReset),
            ":quit" => Some(ShellAction::Quit),
            _ => None,
        };

        if let Some(action) = action {
            return match window.perform(action) {
                Ok(Some(WindowCommand::CloseWindow)) => Outcome::Exit,
                Ok(Some(_)) => Outcome::Continue,
                Ok(None) => {
                    if matches!(
                        action,
                        ShellAction::Back
                            | ShellAction::Forward
                            | ShellAction::Reload
                            | ShellAction::Home
                            | ShellAction::NewTab
                    ) {
                        simulate_start(window);
                    }
                    Outcome::Continue
                }
                Err(e) => {
                    warn!("{}", e);
                    Outcome::Continue
                }
            };
        }

        let Some(handle) = window.active_handle() else {
            return Outcome::Exit;
        };
        match command {
            ":tab" => {
                let target = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| window.tabs().handles().get(i).copied());
                match target {
                    Some(h) => {
                        let _ = window.set_active(h);
                    }
                    None => println!("  no such tab: {}", arg),
                }
            }
            ":done" => {
                window.dispatch(handle, SurfaceEvent::LoadProgress(100));
                window.dispatch(handle, SurfaceEvent::LoadFinished(true));
            }
            ":fail" => {
                window.dispatch(handle, SurfaceEvent::LoadFinished(false));
            }
            ":title" => {
                if let Some(session) = window.session_mut(handle) {
                    session.surface_mut().set_title(arg);
                }
                window.dispatch(handle, SurfaceEvent::TitleChanged(arg.to_string()));
            }
            _ => {
                window.submit_address(line);
                simulate_start(window);
            }
        }
        Outcome::Continue
    }

    fn simulate_start(window: &mut BrowserWindow<HeadlessFactory>) {
        let Some(handle) = window.active_handle() else {
            return;
        };
        let url = window
            .tabs()
            .get(handle)
            .map(|s| s.surface().current_url())
            .unwrap_or_default();
        window.dispatch(handle, SurfaceEvent::LoadStarted);
        window.dispatch(handle, SurfaceEvent::UrlChanged(url));
        window.dispatch(handle, SurfaceEvent::LoadProgress(10));
    }
}
