use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use mlb_api::client::MlbApi;
use mlb_api::{GameView, LastGameView};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the Stats API client and runs one poll tick per request: both view
/// fetches in parallel, fallback-view conversion on failure, and the shared
/// in-flight flag the refresher consults before firing another tick.
pub struct NetworkWorker {
    client: MlbApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicBool>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
        in_flight: Arc<AtomicBool>,
    ) -> Self {
        Self {
            client: MlbApi::new(),
            requests,
            responses,
            in_flight,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let NetworkRequest::RefreshAll { epoch } = request;

            self.in_flight.store(true, Ordering::Relaxed);
            self.start_loading_animation().await;

            let (game, last_game) = tokio::join!(
                self.client.fetch_game_view(),
                self.client.fetch_last_game_view()
            );

            let fetch_ok = game.is_ok() && last_game.is_ok();
            debug!("poll tick complete (epoch {epoch}, ok: {fetch_ok})");

            // Failures never propagate past this boundary: the scheduler must
            // not halt over one bad tick, so each error becomes a fixed
            // fallback view plus a degraded marker for the status line.
            let (game_view, game_degraded) = match game {
                Ok(view) => (view, false),
                Err(err) => {
                    error!("game fetch failed: {err}");
                    (GameView::fallback(), true)
                }
            };
            let (last_view, last_degraded) = match last_game {
                Ok(view) => (view, false),
                Err(err) => {
                    error!("last game fetch failed: {err}");
                    (LastGameView::fallback(), true)
                }
            };

            self.stop_loading_animation(fetch_ok).await;
            self.in_flight.store(false, Ordering::Relaxed);

            let game_sent = self
                .responses
                .send(NetworkResponse::GameUpdated {
                    view: game_view,
                    degraded: game_degraded,
                    epoch,
                })
                .await;
            let last_sent = self
                .responses
                .send(NetworkResponse::LastGameUpdated {
                    view: last_view,
                    degraded: last_degraded,
                    epoch,
                })
                .await;

            if game_sent.is_err() || last_sent.is_err() {
                error!("network response channel closed, stopping worker");
                break;
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
