mod app;
mod draw;
mod keys;
mod state;

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::{RefresherEvent, RefresherHandle};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use std::io::Stdout;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let app = Arc::new(Mutex::new(App::new()));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Shared flag: the worker raises it while a poll is running so the
    // refresher can skip ticks instead of stacking them.
    let in_flight = Arc::new(AtomicBool::new(false));

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(network_req_rx, network_resp_tx, in_flight.clone());
    let network_task = tokio::spawn(network_worker.run());

    // Adaptive poll scheduler, started from AppStarted when auto-refresh is on
    let refresher = RefresherHandle::new(network_req_tx.clone(), in_flight);

    // Trigger the first fetch on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(
        terminal,
        app,
        ui_event_rx,
        network_req_tx,
        network_resp_rx,
        refresher,
    )
    .await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("astros-tui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "astros-tui - Houston Astros live score terminal UI

Usage:
  astros-tui
  astros-tui --help
  astros-tui --version

Environment:
  ASTROS_TUI_NO_AUTOREFRESH   Disable the auto-refresh poll on startup
  ASTROS_TUI_LOG              Log pane level: error, warn, info, debug"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
    mut refresher: RefresherHandle,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw =
                    handle_ui_event(ui_event, &app, &network_requests, &mut refresher).await;
                if should_redraw && !loading.is_loading {
                    let app_guard = app.lock().await;
                    draw::draw(&mut terminal, &app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &mut refresher, &mut loading).await;
                if should_redraw {
                    let app_guard = app.lock().await;
                    draw::draw(&mut terminal, &app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    refresher: &mut RefresherHandle,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            // Start the scheduler first so the epoch is settled before the
            // first request goes out; otherwise the first responses would
            // arrive already stale.
            let mut guard = app.lock().await;
            if guard.state.auto_refresh {
                refresher.start(None);
                guard.state.refresh_epoch = refresher.epoch();
            }
            let epoch = guard.state.refresh_epoch;
            drop(guard);
            let _ = network_requests
                .send(NetworkRequest::RefreshAll { epoch })
                .await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests, refresher).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::FocusLost => {
            refresher.notify(RefresherEvent::Suspend);
            app.lock().await.set_suspended(true);
            true
        }
        UiEvent::FocusGained => {
            refresher.notify(RefresherEvent::Resume);
            app.lock().await.set_suspended(false);
            true
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    refresher: &mut RefresherHandle,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            true
        }
        NetworkResponse::GameUpdated { view, degraded, epoch } => {
            let status = view.status;
            let mut guard = app.lock().await;
            let fresh = epoch == guard.state.refresh_epoch;
            let should_redraw = guard.on_game_updated(view, degraded, epoch);
            drop(guard);
            if fresh {
                refresher.notify(RefresherEvent::StatusObserved(status));
            }
            should_redraw
        }
        NetworkResponse::LastGameUpdated { view, degraded, epoch } => {
            app.lock().await.on_last_game_updated(view, degraded, epoch)
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                Event::FocusGained => Some(UiEvent::FocusGained),
                Event::FocusLost => Some(UiEvent::FocusLost),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, crossterm_event::EnableFocusChange).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, crossterm_event::DisableFocusChange).unwrap();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
