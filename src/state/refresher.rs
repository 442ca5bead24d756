use crate::state::messages::NetworkRequest;
use log::debug;
use mlb_api::GameStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const LIVE_POLL: Duration = Duration::from_secs(15);
pub const SCHEDULED_POLL: Duration = Duration::from_secs(60);
pub const IDLE_POLL: Duration = Duration::from_secs(300);
pub const DEFAULT_POLL: Duration = Duration::from_secs(30);

/// Poll interval policy, decoupled from the timer mechanism. A live game
/// polls fast, a scheduled one slowly, a finished one (or an empty slate)
/// barely at all; before the first observation we split the difference.
pub fn interval_for(status: Option<GameStatus>) -> Duration {
    match status {
        Some(GameStatus::Live) => LIVE_POLL,
        Some(GameStatus::Scheduled) => SCHEDULED_POLL,
        Some(GameStatus::Final) | Some(GameStatus::NoGameToday) => IDLE_POLL,
        None => DEFAULT_POLL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefresherState {
    Idle,
    Scheduled,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefresherEvent {
    /// Status from the latest accepted update; retunes the next sleep.
    StatusObserved(GameStatus),
    /// Page not visible — stop firing until Resume.
    Suspend,
    /// Visible again — fire immediately, then fall back on the interval.
    Resume,
}

/// Self-tuning poll loop. Sleeps `interval_for(last_status)`, fires one tick,
/// and recomputes from whatever status the tick reveals.
struct AdaptiveRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    events: mpsc::Receiver<RefresherEvent>,
    in_flight: Arc<AtomicBool>,
    last_status: Option<GameStatus>,
    epoch: u64,
}

impl AdaptiveRefresher {
    async fn run(mut self) {
        let mut suspended = false;
        loop {
            if suspended {
                match self.events.recv().await {
                    Some(RefresherEvent::Resume) => {
                        suspended = false;
                        // Re-evaluate right away after coming back into view.
                        self.fire().await;
                    }
                    Some(RefresherEvent::StatusObserved(status)) => {
                        self.last_status = Some(status);
                    }
                    Some(RefresherEvent::Suspend) => {}
                    None => return,
                }
                continue;
            }

            let delay = interval_for(self.last_status);
            tokio::select! {
                _ = tokio::time::sleep(delay) => self.fire().await,
                event = self.events.recv() => match event {
                    Some(RefresherEvent::StatusObserved(status)) => {
                        self.last_status = Some(status);
                    }
                    Some(RefresherEvent::Suspend) => suspended = true,
                    Some(RefresherEvent::Resume) => {}
                    None => return,
                },
            }
        }
    }

    async fn fire(&self) {
        // Skip-if-busy: a tick that outlives its own interval is not joined
        // by a second one.
        if self.in_flight.load(Ordering::Relaxed) {
            debug!("previous poll still in flight, skipping this tick");
            return;
        }
        let _ = self
            .network_requests
            .send(NetworkRequest::RefreshAll { epoch: self.epoch })
            .await;
    }
}

/// Owner handle for the refresher task. `start` is stop-then-start, so two
/// calls in a row still leave exactly one timer running; `stop` aborts the
/// task and makes any pending timer inert. Every start bumps the epoch used
/// to discard responses from an earlier run.
pub struct RefresherHandle {
    network_requests: mpsc::Sender<NetworkRequest>,
    in_flight: Arc<AtomicBool>,
    events: Option<mpsc::Sender<RefresherEvent>>,
    task: Option<JoinHandle<()>>,
    epoch: u64,
    suspended: bool,
}

impl RefresherHandle {
    pub fn new(
        network_requests: mpsc::Sender<NetworkRequest>,
        in_flight: Arc<AtomicBool>,
    ) -> Self {
        Self {
            network_requests,
            in_flight,
            events: None,
            task: None,
            epoch: 0,
            suspended: false,
        }
    }

    pub fn start(&mut self, last_status: Option<GameStatus>) {
        self.stop();
        self.epoch += 1;

        let (events_tx, events_rx) = mpsc::channel(16);
        let refresher = AdaptiveRefresher {
            network_requests: self.network_requests.clone(),
            events: events_rx,
            in_flight: self.in_flight.clone(),
            last_status,
            epoch: self.epoch,
        };
        self.task = Some(tokio::spawn(refresher.run()));
        self.events = Some(events_tx);
        self.suspended = false;
        debug!("refresher started (epoch {})", self.epoch);
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("refresher stopped");
        }
        self.events = None;
        self.suspended = false;
    }

    pub fn state(&self) -> RefresherState {
        if self.task.is_none() {
            RefresherState::Idle
        } else if self.suspended {
            RefresherState::Suspended
        } else {
            RefresherState::Scheduled
        }
    }

    /// Current epoch; responses carrying an older one are stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn notify(&mut self, event: RefresherEvent) {
        match event {
            RefresherEvent::Suspend => self.suspended = true,
            RefresherEvent::Resume => self.suspended = false,
            RefresherEvent::StatusObserved(_) => {}
        }
        if let Some(events) = &self.events {
            let _ = events.try_send(event);
        }
    }
}

impl Drop for RefresherHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
