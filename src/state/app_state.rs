use mlb_api::{GameView, LastGameView};

/// Everything the presenter reads. The two views are the "last known" copies
/// used for diffing and are replaced wholesale on each accepted update.
#[derive(Debug)]
pub struct AppState {
    pub game: Option<GameView>,
    pub last_game: Option<LastGameView>,
    /// Transient line reflecting fetch-in-progress / failure / no-update.
    pub status_line: String,
    pub last_updated: Option<String>,
    /// Set when a live Astros score just went up; cleared on the next update.
    pub celebrate: bool,
    pub first_load: bool,
    pub auto_refresh: bool,
    /// Terminal lost focus; polling is suspended until it returns.
    pub suspended: bool,
    pub show_logs: bool,
    /// Scheduler run the app currently accepts responses from.
    pub refresh_epoch: u64,
}

impl AppState {
    pub fn new(auto_refresh: bool) -> Self {
        Self {
            game: None,
            last_game: None,
            status_line: "Fetching game data...".into(),
            last_updated: None,
            celebrate: false,
            first_load: true,
            auto_refresh,
            suspended: false,
            show_logs: false,
            refresh_epoch: 0,
        }
    }
}
