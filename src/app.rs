use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::diff;
use chrono::Local;
use log::debug;
use mlb_api::{GameStatus, GameView, LastGameView};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(settings.auto_refresh),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Accept or reject a freshly normalized game view. Returns whether the
    /// presenter needs to run. Stale epochs are discarded outright; views
    /// identical in the compared-field subset are dropped without replacing
    /// the last known copy.
    pub fn on_game_updated(&mut self, view: GameView, degraded: bool, epoch: u64) -> bool {
        if epoch != self.state.refresh_epoch {
            debug!(
                "dropping stale game update (epoch {epoch}, current {})",
                self.state.refresh_epoch
            );
            return false;
        }

        let changed = diff::game_view_changed(self.state.game.as_ref(), &view);

        self.state.celebrate = !self.state.first_load
            && view.is_live
            && self
                .state
                .game
                .as_ref()
                .is_some_and(|prev| view.astros_score > prev.astros_score);

        let status_line = if degraded {
            "Fetch failed — showing fallback data"
        } else if view.is_live {
            "Live game in progress"
        } else if changed {
            "Game data updated"
        } else {
            "No update"
        };
        let status_line_changed = self.state.status_line != status_line;
        self.state.status_line = status_line.into();
        self.state.first_load = false;

        if changed {
            self.state.game = Some(view);
        }

        // Timestamp moves only when the presenter actually runs; mutating it
        // on a suppressed update would leave it out of sync with the screen.
        let should_redraw = changed || degraded || status_line_changed;
        if should_redraw {
            self.state.last_updated = Some(Local::now().format("%-I:%M:%S %p").to_string());
        }
        should_redraw
    }

    pub fn on_last_game_updated(&mut self, view: LastGameView, degraded: bool, epoch: u64) -> bool {
        if epoch != self.state.refresh_epoch {
            debug!("dropping stale last-game update (epoch {epoch})");
            return false;
        }

        let changed = diff::last_game_changed(self.state.last_game.as_ref(), &view);
        if changed {
            self.state.last_game = Some(view);
        }
        changed || degraded
    }

    // -----------------------------------------------------------------------
    // UI state
    // -----------------------------------------------------------------------

    pub fn toggle_auto_refresh(&mut self) -> bool {
        self.state.auto_refresh = !self.state.auto_refresh;
        self.state.auto_refresh
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        self.state.suspended = suspended;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    /// Status of the last known game view, feeding the refresher's interval.
    pub fn current_status(&self) -> Option<GameStatus> {
        self.state.game.as_ref().map(|g| g.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let settings = AppSettings::default();
        let mut app = App {
            state: AppState::new(settings.auto_refresh),
            settings,
        };
        app.state.refresh_epoch = 1;
        app
    }

    fn live_view(astros: u32, opp: u32) -> GameView {
        GameView {
            is_live: true,
            astros_score: astros,
            opponent_score: opp,
            status: GameStatus::Live,
            inning: "7th Top".into(),
            opponent: "Texas Rangers".into(),
            ..GameView::no_game()
        }
    }

    #[test]
    fn first_update_is_always_accepted() {
        let mut app = app();
        assert!(app.on_game_updated(live_view(3, 2), false, 1));
        assert_eq!(app.current_status(), Some(GameStatus::Live));
        assert!(!app.state.first_load);
    }

    #[test]
    fn identical_update_is_suppressed_and_view_kept() {
        let mut app = app();
        app.on_game_updated(live_view(3, 2), false, 1);
        assert!(!app.on_game_updated(live_view(3, 2), false, 1));
        assert_eq!(app.state.status_line, "Live game in progress");
        assert_eq!(app.state.game.as_ref().unwrap().astros_score, 3);
    }

    #[test]
    fn settling_to_no_update_redraws_once_then_goes_quiet() {
        let mut app = app();
        assert!(app.on_game_updated(GameView::no_game(), false, 1));
        assert_eq!(app.state.status_line, "Game data updated");

        // The status line flips to "No update": one more redraw to show it.
        assert!(app.on_game_updated(GameView::no_game(), false, 1));
        assert_eq!(app.state.status_line, "No update");

        // Fully settled: no redraw, and the on-screen timestamp stays put.
        app.state.last_updated = Some("sentinel".into());
        assert!(!app.on_game_updated(GameView::no_game(), false, 1));
        assert_eq!(app.state.last_updated.as_deref(), Some("sentinel"));
    }

    #[test]
    fn stale_epoch_is_discarded() {
        let mut app = app();
        app.on_game_updated(live_view(3, 2), false, 1);
        app.state.refresh_epoch = 2;
        assert!(!app.on_game_updated(live_view(9, 2), false, 1));
        assert_eq!(app.state.game.as_ref().unwrap().astros_score, 3);
    }

    #[test]
    fn live_score_increase_sets_the_celebration_flag() {
        let mut app = app();
        app.on_game_updated(live_view(3, 2), false, 1);
        assert!(!app.state.celebrate, "no celebration on first load");
        app.on_game_updated(live_view(4, 2), false, 1);
        assert!(app.state.celebrate);
        app.on_game_updated(live_view(4, 3), false, 1);
        assert!(!app.state.celebrate, "opponent scoring is no cause for joy");
    }

    #[test]
    fn degraded_update_requests_a_redraw_and_flags_the_status_line() {
        let mut app = app();
        app.on_game_updated(GameView::fallback(), true, 1);
        assert!(app.state.status_line.contains("fallback"));
        // Same fallback again: unchanged view, but the failure still shows.
        assert!(app.on_game_updated(GameView::fallback(), true, 1));
    }

    #[test]
    fn last_game_updates_follow_the_same_rules() {
        let mut app = app();
        assert!(app.on_last_game_updated(LastGameView::fallback(), false, 1));
        assert!(!app.on_last_game_updated(LastGameView::fallback(), false, 1));
        assert!(!app.on_last_game_updated(LastGameView::no_recent(), false, 99));
    }
}
