use crate::app::App;
use crate::state::messages::NetworkRequest;
use crate::state::refresher::RefresherHandle;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    refresher: &mut RefresherHandle,
) {
    let mut guard = app.lock().await;

    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Manual refresh — works whether or not auto-refresh is running.
        (Char('r'), _) => {
            guard.state.status_line = "Fetching game data...".into();
            let epoch = guard.state.refresh_epoch;
            drop(guard);
            let _ = network_requests
                .send(NetworkRequest::RefreshAll { epoch })
                .await;
        }

        // Auto-refresh toggle: start is stop-then-start, stop leaves any
        // pending timer inert.
        (Char('a'), _) => {
            if guard.toggle_auto_refresh() {
                refresher.start(guard.current_status());
                guard.state.refresh_epoch = refresher.epoch();
            } else {
                refresher.stop();
            }
        }

        (Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
