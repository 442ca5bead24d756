use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use mlb_api::{GameView, LastGameView};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// One poll tick: fetch + normalize both views. The epoch ties responses
    /// back to the scheduler run that asked for them.
    RefreshAll { epoch: u64 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// `degraded` marks a fallback view produced from a failed fetch.
    GameUpdated { view: GameView, degraded: bool, epoch: u64 },
    LastGameUpdated { view: LastGameView, degraded: bool, epoch: u64 },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    FocusGained,
    FocusLost,
}
